use crate::Compression;
use crate::error::{Error, ErrorKind};
use crate::sniff::is_gzip_bytes;
use std::str::FromStr;

impl FromStr for Compression {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Compression::None),
            "bz2" | "bzip2" => Ok(Compression::Bzip2),
            "gz" | "gzip" => Ok(Compression::Gzip),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(s.to_string())),
        }
    }
}

impl From<&[u8]> for Compression {
    fn from(value: &[u8]) -> Self {
        Compression::from_magic_bytes(value)
    }
}

impl Compression {
    /// Detect compression format from magic bytes.
    ///
    /// Only GZIP carries a signature once stored; headerless BZIP2 payloads
    /// are indistinguishable from raw data and detect as
    /// [`None`](Compression::None), as does input too short to inspect.
    #[must_use]
    pub fn from_magic_bytes(bytes: &[u8]) -> Self {
        if is_gzip_bytes(bytes) {
            Compression::Gzip
        } else {
            Compression::None
        }
    }
}
