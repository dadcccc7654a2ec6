//! Compression adapters for cache archive payloads.
//!
//! Archive payloads are stored either as BZIP2 or as GZIP. This crate hides
//! the two quirks that come with that:
//!
//! - **Headerless BZIP2**: stored payloads lack the 4-byte `BZh1` signature.
//!   [`compress_bzip2`] strips it after encoding and [`decompress_bzip2`] puts
//!   it back before decoding.
//! - **GZIP sniffing**: [`is_gzip`] (seekable readers) and [`sniff_gzip`]
//!   (any reader) tell whether a stream starts with the GZIP magic bytes
//!   without consuming it, so callers can branch between compressed and raw
//!   code paths.
//!
//! Everything works on whole in-memory buffers. Decoding into a fixed-size
//! destination either fills it completely or fails and leaves it untouched;
//! [`decompress_gzip_to_end`] is there for when the length is not known.
//!
//! The [`Compression`] enum dispatches to the same operations for callers that
//! pick the format at runtime.

mod construct;
pub mod error;
mod gzip;
mod headerless;
mod ops;
mod peekable;
mod sniff;
mod util;

pub use crate::gzip::{SCRATCH_WINDOW, compress_gzip, decompress_gzip, decompress_gzip_to_end};
pub use crate::headerless::{BZIP2_HEADER, compress_bzip2, decompress_bzip2};
pub use crate::peekable::PeekableReader;
pub use crate::sniff::{GZIP_MAGIC, is_gzip, is_gzip_bytes, sniff_gzip};

/// A payload compression format.
///
/// Defaults to [`None`](Self::None) (uncompressed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    /// Uncompressed
    #[default]
    None,
    /// BZIP2, stored without its `BZh1` signature
    Bzip2,
    /// GZIP, stored as a complete stream
    Gzip,
}
