use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use delta_types::{CanonicalHash, CANONICAL_HASH_LEN};

use crate::canonical::{canonical_bytes, parse_document};
use crate::error::HashResult;

/// Domain tag of [`CanonicalHasher::DEFAULT`].
pub const DEFAULT_DOMAIN: &str = "delta-canonical-v1";

/// Domain-separated BLAKE3 hasher over canonical documents.
///
/// Every digest is computed over `domain ":" canonical-bytes`, so two
/// hashers with different domain tags never agree on a document. The digest
/// is the first [`CANONICAL_HASH_LEN`] bytes of BLAKE3's extended output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalHasher {
    domain: Cow<'static, str>,
}

impl CanonicalHasher {
    /// Hasher used by [`compute_hash`].
    pub const DEFAULT: Self = Self {
        domain: Cow::Borrowed(DEFAULT_DOMAIN),
    };

    /// Create a hasher with a custom domain tag.
    pub fn new(domain: impl Into<Cow<'static, str>>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Hash canonical bytes with domain separation.
    pub fn hash_bytes(&self, canonical: &[u8]) -> CanonicalHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(canonical);
        let mut digest = [0u8; CANONICAL_HASH_LEN];
        hasher.finalize_xof().fill(&mut digest);
        CanonicalHash::from_digest(digest)
    }

    /// Hash the key/value document in `text`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Format`](crate::HashError::Format) if `text` is
    /// not a JSON object.
    pub fn hash_text(&self, text: &str) -> HashResult<CanonicalHash> {
        let document = parse_document(text)?;
        self.hash_value(&document)
    }

    /// Hash an already-parsed value.
    pub fn hash_value(&self, value: &Value) -> HashResult<CanonicalHash> {
        let canonical = canonical_bytes(value)?;
        let hash = self.hash_bytes(&canonical);
        trace!(domain = %self.domain, len = canonical.len(), hash = %hash.short_hex(), "hashed canonical document");
        Ok(hash)
    }

    /// Hash any serializable value through the same canonical pipeline.
    pub fn hash_serializable<T: Serialize + ?Sized>(&self, value: &T) -> HashResult<CanonicalHash> {
        let value = serde_json::to_value(value)?;
        self.hash_value(&value)
    }

    /// Check that `text` hashes to `expected`.
    pub fn verify(&self, text: &str, expected: &CanonicalHash) -> HashResult<bool> {
        Ok(self.hash_text(text)? == *expected)
    }
}

impl Default for CanonicalHasher {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Hash a key/value document independently of its key order.
///
/// Equivalent to `CanonicalHasher::DEFAULT.hash_text(text)`.
///
/// # Errors
///
/// Returns [`HashError::Format`](crate::HashError::Format) if `text` does not
/// parse as a key/value document.
pub fn compute_hash(text: &str) -> HashResult<CanonicalHash> {
    CanonicalHasher::DEFAULT.hash_text(text)
}
