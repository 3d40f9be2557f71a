//! Core value types shared across the indexer, diff engine, and report writer.

use std::fmt;
use std::str::FromStr;

/// Length of a content fingerprint in bytes (128 bits)
pub const FINGERPRINT_LEN: usize = 16;

/// Content fingerprint of a single file
///
/// The first 128 bits of the BLAKE3 extendable output over the file bytes.
/// Equal content always yields an equal fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Fingerprint an in-memory buffer
    pub fn of_bytes(content: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(content);
        Self::from_hasher(&hasher)
    }

    /// Finalize a BLAKE3 hasher into a 128-bit fingerprint
    pub(crate) fn from_hasher(hasher: &blake3::Hasher) -> Self {
        let mut out = [0u8; FINGERPRINT_LEN];
        hasher.finalize_xof().fill(&mut out);
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    /// Lowercase hex rendering (32 characters)
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut out = [0u8; FINGERPRINT_LEN];
        hex::decode_to_slice(s, &mut out)?;
        Ok(Self(out))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Fingerprint {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
