use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Length in bytes of a [`CanonicalHash`].
pub const CANONICAL_HASH_LEN: usize = 16;

/// Order-independent digest of a key/value document.
///
/// Two documents that differ only in the ordering of their keys, at any
/// nesting depth, always produce the same `CanonicalHash`. The value is 128
/// bits wide; it is an identity for deduplication and change detection, not
/// a security primitive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanonicalHash([u8; CANONICAL_HASH_LEN]);

impl CanonicalHash {
    /// Wrap a pre-computed digest.
    pub const fn from_digest(digest: [u8; CANONICAL_HASH_LEN]) -> Self {
        Self(digest)
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; CANONICAL_HASH_LEN] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != CANONICAL_HASH_LEN {
            return Err(TypeError::InvalidLength {
                expected: CANONICAL_HASH_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; CANONICAL_HASH_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for CanonicalHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalHash({})", self.short_hex())
    }
}

impl fmt::Display for CanonicalHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for CanonicalHash {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.trim())
    }
}
