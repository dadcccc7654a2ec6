//! GZIP
//!
//! Unlike BZIP2 payloads, GZIP payloads are stored as complete RFC 1952
//! streams, magic bytes included.

use crate::error::{ErrorKind, Result};
use crate::util::read_exact_into;
use exn::ResultExt;
use flate2::{Compression as GzCompression, read::GzDecoder, write::GzEncoder};
use std::io::{ErrorKind as IoErrorKind, Read, Write};
use tracing::instrument;

/// Size of the window used when the uncompressed length is not known up front.
pub const SCRATCH_WINDOW: usize = 1024;

/// GZIP-compress `input` with the default compression level.
///
/// # Examples
///
/// ```
/// use cachepack_compress::compress_gzip;
///
/// let compressed = compress_gzip(b"hello world").unwrap();
/// assert_eq!(&compressed[..2], &[0x1f, 0x8b]);
/// ```
#[instrument(skip(input), fields(input_size = input.len(), output_size))]
pub fn compress_gzip(input: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), GzCompression::default());
    encoder.write_all(input).or_raise(|| ErrorKind::Io)?;
    let output = encoder.finish().or_raise(|| ErrorKind::Io)?;
    tracing::Span::current().record("output_size", output.len());
    Ok(output)
}

/// Decode a GZIP stream into `output`, filling it completely.
///
/// Same contract as [`decompress_bzip2`](crate::decompress_bzip2): the stream
/// must decode to at least `output.len()` bytes, otherwise an error is
/// returned and `output` is left untouched.
///
/// # Examples
///
/// ```
/// use cachepack_compress::{compress_gzip, decompress_gzip};
///
/// let compressed = compress_gzip(b"hello world").unwrap();
/// let mut output = [0u8; 11];
/// decompress_gzip(&compressed, &mut output).unwrap();
/// assert_eq!(&output, b"hello world");
/// ```
#[instrument(skip(input, output), fields(input_size = input.len(), output_size = output.len()))]
pub fn decompress_gzip(input: &[u8], output: &mut [u8]) -> Result<()> {
    read_exact_into(GzDecoder::new(input), output)
}

/// Decode an entire GZIP stream whose uncompressed length is not known.
///
/// Output is accumulated [`SCRATCH_WINDOW`] bytes at a time until the decoder
/// reports end of stream. If decoding fails part way, whatever was already
/// decoded is thrown away with the error.
///
/// # Examples
///
/// ```
/// use cachepack_compress::{compress_gzip, decompress_gzip_to_end};
///
/// let compressed = compress_gzip(b"hello world").unwrap();
/// assert_eq!(decompress_gzip_to_end(&compressed).unwrap(), b"hello world");
/// ```
#[instrument(skip(input), fields(input_size = input.len(), output_size))]
pub fn decompress_gzip_to_end(input: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(input);
    let mut window = [0u8; SCRATCH_WINDOW];
    let mut output = Vec::new();
    loop {
        match decoder.read(&mut window) {
            Ok(0) => break,
            Ok(read) => output.extend_from_slice(&window[..read]),
            Err(e) if e.kind() == IoErrorKind::Interrupted => continue,
            Err(e) => return Err(e).or_raise(|| ErrorKind::InvalidData),
        }
    }
    tracing::Span::current().record("output_size", output.len());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn test_data() -> Vec<u8> {
        // Long enough to need several scratch windows.
        (0..10_000u32).flat_map(|i| (i % 251).to_le_bytes()).collect()
    }

    #[rstest]
    #[case(b"")]
    #[case(b"a")]
    #[case(b"hello world")]
    #[case(&[0u8; 1024])]
    #[case(&[7u8; 1025])]
    fn test_roundtrip(#[case] original: &[u8]) {
        let compressed = compress_gzip(original).unwrap();
        let mut output = vec![0u8; original.len()];
        decompress_gzip(&compressed, &mut output).unwrap();
        assert_eq!(output, original);
        assert_eq!(decompress_gzip_to_end(&compressed).unwrap(), original);
    }

    #[test]
    fn test_hello_world() {
        let compressed = compress_gzip(b"hello world").unwrap();
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);
        let mut output = [0u8; 11];
        decompress_gzip(&compressed, &mut output).unwrap();
        assert_eq!(&output, b"hello world");
    }

    #[test]
    fn test_to_end_multiple_windows() {
        let original = test_data();
        assert!(original.len() > SCRATCH_WINDOW * 4);
        let compressed = compress_gzip(&original).unwrap();
        assert_eq!(decompress_gzip_to_end(&compressed).unwrap(), original);
    }

    #[rstest]
    #[case(b"\x1f")]
    #[case(b"This is not compressed data")]
    fn test_invalid_compressed_data(#[case] input: &[u8]) {
        assert!(decompress_gzip_to_end(input).is_err());
        let mut output = [0u8; 4];
        assert!(decompress_gzip(input, &mut output).is_err());
    }

    #[test]
    fn test_truncated() {
        let original = test_data();
        let compressed = compress_gzip(&original).unwrap();
        let truncated = &compressed[..compressed.len() / 2];
        assert!(decompress_gzip_to_end(truncated).is_err());
        let mut output = vec![0u8; original.len()];
        assert!(decompress_gzip(truncated, &mut output).is_err());
        assert!(output.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_missing_trailer() {
        // Body decodes in full, but the CRC32/ISIZE trailer is cut short.
        let compressed = compress_gzip(b"hello world").unwrap();
        let truncated = &compressed[..compressed.len() - 4];
        let mut output = [0u8; 11];
        assert!(decompress_gzip(truncated, &mut output).is_err());
        assert_eq!(output, [0u8; 11]);
    }

    #[test]
    fn test_bad_checksum() {
        let mut compressed = compress_gzip(b"hello world").unwrap();
        let crc = compressed.len() - 8;
        compressed[crc] ^= 0xFF;
        assert!(decompress_gzip_to_end(&compressed).is_err());
        let mut output = [0u8; 11];
        assert!(decompress_gzip(&compressed, &mut output).is_err());
    }

    #[test]
    fn test_destination_size_mismatch() {
        let compressed = compress_gzip(b"hello world").unwrap();
        let mut output = [0u8; 20];
        let err = decompress_gzip(&compressed, &mut output).unwrap_err();
        assert_eq!(*err, ErrorKind::Truncated { expected: 20, actual: 11 });
        let mut output = [0u8; 5];
        decompress_gzip(&compressed, &mut output).unwrap();
        assert_eq!(&output, b"hello");
    }

    #[test]
    fn test_prefix_still_checks_trailer() {
        let mut compressed = compress_gzip(b"hello world").unwrap();
        let crc = compressed.len() - 8;
        compressed[crc] ^= 0xFF;
        let mut output = [0u8; 5];
        assert!(decompress_gzip(&compressed, &mut output).is_err());
        assert_eq!(output, [0u8; 5]);
    }
}
