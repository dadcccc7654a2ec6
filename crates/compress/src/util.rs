use crate::Compression;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io::Read;

impl Display for Compression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for Compression {
    fn as_ref(&self) -> &'static str {
        self.as_str()
    }
}

impl Compression {
    /// Returns the short name for configuration (for displaying to user)
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Bzip2 => "bzip2",
            Compression::Gzip => "gzip",
        }
    }
}

/// Fill `output` with the first `output.len()` bytes decoded from `decoder`.
///
/// The stream is decoded to its end so that its trailer and checksums are
/// validated; anything past the destination length is discarded. Decoding
/// goes through a scratch buffer: `output` is only written once the whole
/// stream checked out.
pub(crate) fn read_exact_into<R: Read>(mut decoder: R, output: &mut [u8]) -> Result<()> {
    let expected = output.len();
    let mut scratch = Vec::with_capacity(expected);
    decoder.read_to_end(&mut scratch).or_raise(|| ErrorKind::InvalidData)?;
    fill_from(&scratch, output)
}

/// Copy the head of `source` into `output`, failing if `source` is too short.
pub(crate) fn fill_from(source: &[u8], output: &mut [u8]) -> Result<()> {
    let (expected, actual) = (output.len(), source.len());
    if actual < expected {
        exn::bail!(ErrorKind::Truncated { expected, actual });
    }
    output.copy_from_slice(&source[..expected]);
    Ok(())
}
