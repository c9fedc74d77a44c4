use crate::error::{Result, VerifyError};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest([u8; 32]);

impl Sha256Digest {
    pub fn from_bytes(bytes: [u8; 32]) -> Self { Self(bytes) }

    pub fn as_bytes(&self) -> &[u8; 32] { &self.0 }

    /// Fails with [`VerifyError::Mismatch`] unless `actual` equals `self`.
    pub fn verify(&self, actual: &Sha256Digest) -> Result<()> {
        if self == actual {
            Ok(())
        } else {
            Err(VerifyError::Mismatch {
                expected: self.to_string(),
                actual:   actual.to_string(),
            })
        }
    }
}

impl FromStr for Sha256Digest {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| VerifyError::InvalidDigest(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&hex::encode(self.0)) }
}

impl fmt::Debug for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Sha256Digest({self})") }
}

/// Extracts the digest for `file_name` from a checksum file.
///
/// Accepts a bare hex digest as well as `sha256sum` output
/// (`<digest>  <name>`, with an optional `*` binary marker). A named entry for
/// `file_name` wins over an unnamed one.
pub fn parse_checksum_file(contents: &str, file_name: &str) -> Result<Sha256Digest> {
    let mut unnamed = None;
    let mut saw_entry = false;

    for line in contents.lines() {
        let mut fields = line.split_whitespace();
        let Some(digest) = fields.next() else { continue };
        saw_entry = true;
        match fields.next() {
            Some(name) if name.trim_start_matches('*') == file_name => return digest.parse(),
            Some(_) => {}
            None if unnamed.is_none() => unnamed = Some(digest),
            None => {}
        }
    }

    match unnamed {
        Some(digest) => digest.parse(),
        None if saw_entry => Err(VerifyError::NotListed {
            file: file_name.to_string(),
        }),
        None => Err(VerifyError::Empty),
    }
}
