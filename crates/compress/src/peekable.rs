//! Lookahead for readers that cannot seek.
//!
//! Thin convenience wrapper around standard library I/O primitives
//! ([`Read::take`], [`Cursor`], [`Chain`]) so that magic bytes can be
//! inspected on pipes, sockets and decoders without losing them.

use crate::Compression;
use crate::error::{ErrorKind, Result};
use crate::sniff::is_gzip_bytes;
use exn::ResultExt;
use std::io::{Chain, Cursor, Read};

/// A [`Read`]er that can look ahead without consuming.
///
/// Peeked bytes are kept in an internal buffer and handed out again by the
/// next [`read`](Read::read), so from the caller's point of view the stream
/// position never moves when peeking.
pub struct PeekableReader<R> {
    inner: R,
    buffer: Vec<u8>,
    consumed: usize,
}

impl<R: Read> PeekableReader<R> {
    /// Wrap any reader for peeking.
    pub fn new(inner: R) -> Self {
        Self { inner, buffer: Vec::new(), consumed: 0 }
    }

    /// Look at up to `limit` upcoming bytes without consuming them.
    ///
    /// Returns fewer than `limit` bytes only if the underlying reader ran dry.
    /// Successive calls do not accumulate:
    /// - `peek(2)` buffers 2 bytes, returns 2 bytes
    /// - `peek(8)` buffers an additional 6 bytes, returns 8 bytes
    /// - `peek(4)` immediately returns 4 bytes (because 8 are already buffered)
    pub fn peek(&mut self, limit: usize) -> Result<&[u8]> {
        let available = self.buffer.len() - self.consumed;
        if available < limit {
            let needed = (limit - available) as u64;
            (&mut self.inner).take(needed).read_to_end(&mut self.buffer).or_raise(|| ErrorKind::Io)?;
        }
        let end = self.buffer.len().min(self.consumed + limit);
        Ok(&self.buffer[self.consumed..end])
    }

    /// Bytes buffered by peeking that have not been read yet.
    pub fn head(&self) -> &[u8] {
        &self.buffer[self.consumed..]
    }

    /// Check whether the upcoming bytes are the GZIP magic bytes.
    ///
    /// Nothing is consumed. A read error counts as "not GZIP".
    ///
    /// # Examples
    ///
    /// ```
    /// use cachepack_compress::{PeekableReader, compress_gzip};
    /// use std::io::Read;
    ///
    /// let compressed = compress_gzip(b"hello world").unwrap();
    /// let mut reader = PeekableReader::new(compressed.as_slice());
    /// assert!(reader.is_gzip());
    ///
    /// let mut everything = Vec::new();
    /// reader.read_to_end(&mut everything).unwrap();
    /// assert_eq!(everything, compressed);
    /// ```
    pub fn is_gzip(&mut self) -> bool {
        match self.peek(2) {
            Ok(head) => is_gzip_bytes(head),
            Err(error) => {
                tracing::warn!(?error, "unable to peek gzip magic bytes");
                false
            },
        }
    }

    /// Guess the compression of the upcoming bytes from their signature.
    ///
    /// Only GZIP can be recognised; headerless BZIP2 payloads have no
    /// signature and come back as [`Compression::None`].
    pub fn compression(&mut self) -> Compression {
        if self.is_gzip() {
            Compression::Gzip
        } else {
            Compression::None
        }
    }

    /// Convert into a [`Read`]er that replays the unread buffered bytes, then
    /// streams the rest of the underlying reader.
    pub fn into_reader(self) -> Chain<Cursor<Vec<u8>>, R> {
        let mut head = Cursor::new(self.buffer);
        head.set_position(self.consumed as u64);
        head.chain(self.inner)
    }

    /// Read all remaining data and return it, buffered bytes included.
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        self.inner.read_to_end(&mut self.buffer).or_raise(|| ErrorKind::Io)?;
        self.buffer.drain(..self.consumed);
        Ok(self.buffer)
    }
}

impl<R: Read> Read for PeekableReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.consumed == self.buffer.len() {
            return self.inner.read(buf);
        }
        let head = &self.buffer[self.consumed..];
        let count = head.len().min(buf.len());
        buf[..count].copy_from_slice(&head[..count]);
        self.consumed += count;
        if self.consumed == self.buffer.len() {
            self.buffer.clear();
            self.consumed = 0;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress_gzip;
    use rstest::rstest;

    fn test_data() -> Vec<u8> {
        b"Hello, world! This is test data for peeking. \
          It needs to be long enough to test multiple peek() calls."
            .to_vec()
    }

    /// Hands out at most one byte per read, like a slow pipe.
    struct Trickle<'a>(&'a [u8]);
    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match (self.0.split_first(), buf.first_mut()) {
                (Some((byte, rest)), Some(slot)) => {
                    *slot = *byte;
                    self.0 = rest;
                    Ok(1)
                },
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn test_peek() {
        let original = test_data();
        let mut reader = PeekableReader::new(original.as_slice());
        assert_eq!(reader.peek(5).unwrap(), b"Hello");
        assert_eq!(reader.peek(13).unwrap(), b"Hello, world!");
        assert_eq!(reader.peek(2).unwrap(), b"He");
        assert_eq!(reader.head(), b"Hello, world!");
        assert_eq!(reader.into_bytes().unwrap(), original);
    }

    #[test]
    fn test_peek_larger_than_data() {
        let mut reader = PeekableReader::new(&b"tiny"[..]);
        assert_eq!(reader.peek(1000).unwrap(), b"tiny");
    }

    #[test]
    fn test_peek_then_read() {
        let original = test_data();
        let mut reader = PeekableReader::new(Trickle(&original));
        assert_eq!(reader.peek(5).unwrap(), b"Hello");

        let mut first = [0u8; 3];
        reader.read_exact(&mut first).unwrap();
        assert_eq!(&first, b"Hel");
        assert_eq!(reader.head(), b"lo");
        assert_eq!(reader.peek(4).unwrap(), b"lo, ");

        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, original[3..]);
    }

    #[test]
    fn test_peek_then_into_reader() {
        let original = test_data();
        let mut reader = PeekableReader::new(original.as_slice());
        reader.peek(10).unwrap();
        let mut skipped = [0u8; 4];
        reader.read_exact(&mut skipped).unwrap();
        let mut output = Vec::new();
        std::io::copy(&mut reader.into_reader(), &mut output).unwrap();
        assert_eq!(output, original[4..]);
    }

    #[rstest]
    #[case(b"")]
    #[case(b"hello world")]
    fn test_is_gzip_is_non_destructive(#[case] original: &[u8]) {
        let compressed = compress_gzip(original).unwrap();
        let mut reader = PeekableReader::new(Trickle(&compressed));
        assert!(reader.is_gzip());
        assert!(reader.is_gzip());
        assert_eq!(reader.into_bytes().unwrap(), compressed);
    }

    #[rstest]
    #[case(b"", Compression::None)]
    #[case(b"\x1f", Compression::None)]
    #[case(b"\x1f\x8b", Compression::Gzip)]
    #[case(b"hello world", Compression::None)]
    fn test_compression(#[case] bytes: &[u8], #[case] expected: Compression) {
        let mut reader = PeekableReader::new(bytes);
        assert_eq!(reader.compression(), expected);
        let mut everything = Vec::new();
        reader.read_to_end(&mut everything).unwrap();
        assert_eq!(everything, bytes);
    }
}
