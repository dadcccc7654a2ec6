//! Compression Operations

use crate::Compression;
use crate::error::Result;
use crate::gzip::{compress_gzip, decompress_gzip, decompress_gzip_to_end};
use crate::headerless::{compress_bzip2, decompress_bzip2, decompress_bzip2_to_end};
use crate::util::fill_from;

impl Compression {
    /// Compress a byte slice in memory.
    ///
    /// [`Bzip2`](Compression::Bzip2) output is headerless, see
    /// [`compress_bzip2`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cachepack_compress::Compression;
    ///
    /// let data = b"Hello, world!";
    /// let compressed = Compression::Gzip.compress(data).unwrap();
    /// assert_eq!(Compression::from_magic_bytes(&compressed), Compression::Gzip);
    /// ```
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        match self {
            Compression::None => Ok(input.to_vec()),
            Compression::Bzip2 => compress_bzip2(input),
            Compression::Gzip => compress_gzip(input),
        }
    }

    /// Decompress a byte slice whose uncompressed length is already known.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cachepack_compress::Compression;
    ///
    /// let original = b"Hello, world!";
    /// let compressed = Compression::Bzip2.compress(original).unwrap();
    /// let decompressed = Compression::Bzip2.decompress(&compressed, original.len()).unwrap();
    /// assert_eq!(decompressed, original);
    /// ```
    pub fn decompress(&self, input: &[u8], len: usize) -> Result<Vec<u8>> {
        let mut output = vec![0u8; len];
        self.decompress_into(input, &mut output)?;
        Ok(output)
    }

    /// Decompress into a pre-sized destination, filling it completely or not
    /// at all. Data past the end of the destination is ignored.
    pub fn decompress_into(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        match self {
            Compression::None => fill_from(input, output),
            Compression::Bzip2 => decompress_bzip2(input, output),
            Compression::Gzip => decompress_gzip(input, output),
        }
    }

    /// Decompress a byte slice of unknown uncompressed length.
    pub fn decompress_to_end(&self, input: &[u8]) -> Result<Vec<u8>> {
        match self {
            Compression::None => Ok(input.to_vec()),
            Compression::Bzip2 => decompress_bzip2_to_end(input),
            Compression::Gzip => decompress_gzip_to_end(input),
        }
    }
}
