//! Canonical hashing for Delta.
//!
//! Normalizes a key/value document by sorting keys at every nesting level,
//! then digests the canonical bytes with domain-separated BLAKE3. Documents
//! that differ only in key order hash identically.
//!
//! # Key Types
//!
//! - [`compute_hash`] -- Hash a JSON document text with the default hasher
//! - [`CanonicalHasher`] -- Domain-tagged hasher over canonical documents
//! - [`canonicalize`] -- The canonical form itself

pub mod canonical;
pub mod error;
pub mod hasher;

pub use canonical::{canonical_bytes, canonicalize, parse_document, MAX_DEPTH};
pub use delta_types::CanonicalHash;
pub use error::{HashError, HashResult};
pub use hasher::{compute_hash, CanonicalHasher, DEFAULT_DOMAIN};
