//! Foundation types for Delta.
//!
//! This crate provides the member accessor capability and the structural
//! types shared by the hashing and diffing crates. Every other Delta crate
//! depends on `delta-types`.
//!
//! # Key Types
//!
//! - [`MemberAccessor`] -- Get/set named members without compile-time type knowledge
//! - [`Members`] -- Types with a static, once-built [`TypeDescriptor`]
//! - [`TypeDescriptor`] / [`MemberDescriptor`] -- Ordered member tables
//! - [`Record`] -- JSON-object-backed accessor for runtime shapes
//! - [`CanonicalHash`] -- 128-bit order-independent document digest

pub mod accessor;
pub mod error;
pub mod hash;
pub mod record;

pub use accessor::{
    from_member_value, to_member_value, MemberAccessor, MemberDescriptor, MemberValue, Members,
    TypeDescriptor,
};
pub use error::{SetError, TypeError};
pub use hash::{CanonicalHash, CANONICAL_HASH_LEN};
pub use record::{Record, DEFAULT_SCHEMA};
