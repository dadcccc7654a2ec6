//! GZIP signature sniffing.
//!
//! These helpers answer "is this GZIP?" without consuming any input. A reader
//! that can [`Seek`] is rewound to where it started. Any other reader goes
//! through [`sniff_gzip`], which wraps it in a [`PeekableReader`] that keeps
//! the inspected bytes buffered for the next read.

use crate::PeekableReader;
use std::io::{Read, Seek, SeekFrom};

/// The two GZIP magic bytes `1f 8b`, read as a little-endian `u16`.
pub const GZIP_MAGIC: u16 = 0x8b1f;

/// Returns `true` if `bytes` begins with the GZIP magic bytes.
#[must_use]
pub fn is_gzip_bytes(bytes: &[u8]) -> bool {
    match bytes {
        [first, second, ..] => u16::from_le_bytes([*first, *second]) == GZIP_MAGIC,
        _ => false,
    }
}

/// Check whether the stream starts with the GZIP magic bytes, then restore its
/// position.
///
/// This is a best-effort classification: a stream shorter than two bytes, a
/// read error, or a failure to report or restore the position all count as
/// "not GZIP" instead of being returned as errors. Pipes and sockets often
/// implement [`Seek`] without supporting it; use [`sniff_gzip`] for those.
///
/// # Examples
///
/// ```
/// use cachepack_compress::{compress_gzip, is_gzip};
/// use std::io::Cursor;
///
/// let mut stream = Cursor::new(compress_gzip(b"hello world").unwrap());
/// assert!(is_gzip(&mut stream));
/// assert_eq!(stream.position(), 0);
///
/// let mut stream = Cursor::new(b"hello world".to_vec());
/// assert!(!is_gzip(&mut stream));
/// ```
pub fn is_gzip<R: Read + Seek>(input: &mut R) -> bool {
    let mark = match input.stream_position() {
        Ok(mark) => mark,
        Err(error) => {
            tracing::warn!(%error, "unable to mark stream position for gzip sniffing");
            return false;
        },
    };
    let mut head = Vec::with_capacity(2);
    let read = (&mut *input).take(2).read_to_end(&mut head);
    if let Err(error) = input.seek(SeekFrom::Start(mark)) {
        tracing::warn!(%error, "unable to restore stream position after gzip sniffing");
        return false;
    }
    match read {
        Ok(_) => is_gzip_bytes(&head),
        Err(error) => {
            tracing::warn!(%error, "unable to read gzip magic bytes");
            false
        },
    }
}

/// Check whether any reader starts with the GZIP magic bytes.
///
/// The reader is wrapped in a [`PeekableReader`] and handed back; reading
/// from it yields every byte of the original stream, the inspected ones
/// included. Works whether or not the reader can seek.
///
/// # Examples
///
/// ```
/// use cachepack_compress::{compress_gzip, sniff_gzip};
/// use std::io::Read;
///
/// let compressed = compress_gzip(b"hello world").unwrap();
/// let (gzipped, mut reader) = sniff_gzip(compressed.as_slice());
/// assert!(gzipped);
///
/// let mut everything = Vec::new();
/// reader.read_to_end(&mut everything).unwrap();
/// assert_eq!(everything, compressed);
/// ```
pub fn sniff_gzip<R: Read>(input: R) -> (bool, PeekableReader<R>) {
    let mut reader = PeekableReader::new(input);
    let gzipped = reader.is_gzip();
    (gzipped, reader)
}
