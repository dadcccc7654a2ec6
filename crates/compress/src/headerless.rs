//! Headerless BZIP2
//!
//! Archive payloads are stored without the 4-byte `BZh1` signature that opens
//! every BZIP2 stream. It is stripped after encoding and put back before
//! decoding; this module is the only place that knows what it looks like.

use crate::error::{ErrorKind, Result};
use crate::util::read_exact_into;
use bzip2::{Compression as BzCompression, read::BzDecoder, write::BzEncoder};
use exn::ResultExt;
use std::io::{Read, Write};
use tracing::instrument;

/// Signature of a BZIP2 stream written with block size level 1.
///
/// `BZ` magic, `h` for Huffman coding, then the block size digit. The digit
/// has to agree with [`BZIP2_LEVEL`].
pub const BZIP2_HEADER: [u8; 4] = *b"BZh1";

// Fastest setting: 100k blocks, which is what produces the `1` in the header.
const BZIP2_LEVEL: BzCompression = BzCompression::fast();

/// Remove the signature from a freshly encoded BZIP2 stream.
fn strip_header(mut stream: Vec<u8>) -> Result<Vec<u8>> {
    if !stream.starts_with(&BZIP2_HEADER) {
        exn::bail!(ErrorKind::Encoder);
    }
    stream.drain(..BZIP2_HEADER.len());
    Ok(stream)
}

/// Rebuild a complete BZIP2 stream from a headerless payload.
fn attach_header(payload: &[u8]) -> Vec<u8> {
    let mut stream = Vec::with_capacity(BZIP2_HEADER.len() + payload.len());
    stream.extend_from_slice(&BZIP2_HEADER);
    stream.extend_from_slice(payload);
    stream
}

/// BZIP2-compress `input` at the fastest level and return the stream minus
/// its 4-byte signature.
///
/// # Examples
///
/// ```
/// use cachepack_compress::{compress_bzip2, decompress_bzip2};
///
/// let payload = compress_bzip2(b"hello world").unwrap();
/// assert!(!payload.starts_with(b"BZh"));
///
/// let mut output = [0u8; 11];
/// decompress_bzip2(&payload, &mut output).unwrap();
/// assert_eq!(&output, b"hello world");
/// ```
#[instrument(skip(input), fields(input_size = input.len(), output_size))]
pub fn compress_bzip2(input: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = BzEncoder::new(Vec::new(), BZIP2_LEVEL);
    encoder.write_all(input).or_raise(|| ErrorKind::Io)?;
    let stream = encoder.finish().or_raise(|| ErrorKind::Io)?;
    let payload = strip_header(stream)?;
    tracing::Span::current().record("output_size", payload.len());
    Ok(payload)
}

/// Decode a headerless BZIP2 payload into `output`, filling it completely.
///
/// `output` must be sized to the uncompressed length recorded alongside the
/// payload. A payload that decodes to fewer bytes than that, or fails to
/// decode at all, is an error and `output` is left untouched. Decoded bytes
/// beyond `output.len()` are dropped.
#[instrument(skip(input, output), fields(input_size = input.len(), output_size = output.len()))]
pub fn decompress_bzip2(input: &[u8], output: &mut [u8]) -> Result<()> {
    let stream = attach_header(input);
    read_exact_into(BzDecoder::new(stream.as_slice()), output)
}

/// Decode a headerless BZIP2 payload of unknown uncompressed length.
#[instrument(skip(input), fields(input_size = input.len(), output_size))]
pub(crate) fn decompress_bzip2_to_end(input: &[u8]) -> Result<Vec<u8>> {
    let stream = attach_header(input);
    let mut output = Vec::new();
    BzDecoder::new(stream.as_slice()).read_to_end(&mut output).or_raise(|| ErrorKind::InvalidData)?;
    tracing::Span::current().record("output_size", output.len());
    Ok(output)
}
