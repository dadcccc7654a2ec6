//! Compression Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. Every encode/decode failure surfaces as one of these
//! kinds; nothing is retried or padded on the way out.

use derive_more::{Display, Error};

/// A compression error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for compression operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The encoder produced output that does not match the expected format.
    #[display("encoder produced an unexpected stream")]
    Encoder,
    /// Data is corrupt or malformed. Don't retry with the same input. Used for reading/decoding.
    #[display("invalid or corrupted data")]
    InvalidData,
    /// The stream ended before the destination could be filled.
    #[display("truncated data: expected {expected} bytes, decoded {actual}")]
    Truncated { expected: usize, actual: usize },
    /// The requested format is not supported.
    #[display("unsupported format: {_0}")]
    UnsupportedFormat(#[error(not(source))] String),
    /// An I/O operation failed. Used for writing/encoding.
    #[display("I/O error")]
    Io,
}
