//! Delta engine.
//!
//! Compares two same-shaped instances member by member, producing an
//! ordered [`DiffDocument`] of absolute set operations, and replays such a
//! document onto a target instance. All access to instances goes through
//! the [`MemberAccessor`](delta_types::MemberAccessor) capability.
//!
//! # Key Types
//!
//! - [`object_to_object`] / [`object_to_object_dyn`] -- Compute a diff
//! - [`DiffDocument`] / [`DiffOperation`] -- Frozen, ordered set operations
//! - [`DiffDocument::apply_to`] -- Patch application
//! - [`CompareOptions`] -- Members excluded from comparison

pub mod apply;
pub mod compare;
pub mod document;
pub mod equality;
pub mod error;

pub use compare::{
    object_to_object, object_to_object_dyn, object_to_object_dyn_with, object_to_object_with,
    CompareOptions,
};
pub use document::{DiffBuilder, DiffDocument, DiffOperation, OperationKind};
pub use equality::values_equal;
pub use error::{DiffError, DiffResult};
