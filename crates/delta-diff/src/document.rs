//! Diff documents: frozen, ordered lists of member-level set operations.
//!
//! A [`DiffDocument`] is built append-only through a [`DiffBuilder`] and is
//! read-only afterwards. The document with no operations is a process-wide
//! singleton, so "no difference" can be checked by identity with
//! [`DiffDocument::is_shared_empty`].

use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use delta_types::MemberValue;

use crate::error::{DiffError, DiffResult};

/// What an operation does to its member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Overwrite the member with an absolute value.
    #[default]
    Set,
}

/// A single member-level change.
///
/// # Invariants
///
/// - `path` is non-empty.
/// - The operation is immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOperation")]
pub struct DiffOperation {
    path: String,
    value: MemberValue,
    kind: OperationKind,
}

impl DiffOperation {
    /// An operation that sets member `path` to `value`.
    pub fn set(path: impl Into<String>, value: MemberValue) -> DiffResult<Self> {
        let path = path.into();
        if path.is_empty() {
            return Err(DiffError::EmptyPath);
        }
        Ok(Self {
            path,
            value,
            kind: OperationKind::Set,
        })
    }

    /// The member this operation writes.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The destination value.
    pub fn value(&self) -> &MemberValue {
        &self.value
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }
}

#[derive(Deserialize)]
struct RawOperation {
    path: String,
    value: MemberValue,
    #[serde(default)]
    kind: OperationKind,
}

impl TryFrom<RawOperation> for DiffOperation {
    type Error = DiffError;

    fn try_from(raw: RawOperation) -> DiffResult<Self> {
        let op = DiffOperation::set(raw.path, raw.value)?;
        Ok(Self { kind: raw.kind, ..op })
    }
}

static EMPTY: LazyLock<DiffDocument> = LazyLock::new(|| DiffDocument {
    operations: Arc::from(Vec::new()),
});

/// An ordered, immutable list of [`DiffOperation`]s.
///
/// Operations appear in member-traversal order. Cloning a document shares
/// its operations.
#[derive(Clone, Debug)]
pub struct DiffDocument {
    operations: Arc<[DiffOperation]>,
}

impl DiffDocument {
    /// The shared document with no operations.
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    /// Freeze a list of operations. An empty list yields [`DiffDocument::empty`].
    pub fn from_operations(operations: Vec<DiffOperation>) -> Self {
        if operations.is_empty() {
            return Self::empty();
        }
        Self {
            operations: Arc::from(operations),
        }
    }

    /// Operations in stored order.
    pub fn operations(&self) -> &[DiffOperation] {
        &self.operations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffOperation> {
        self.operations.iter()
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if there are no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Returns `true` if this is the shared empty singleton.
    pub fn is_shared_empty(&self) -> bool {
        Arc::ptr_eq(&self.operations, &EMPTY.operations)
    }

    /// Member paths touched by this document, in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().map(DiffOperation::path)
    }

    /// The last operation on `path`, if any.
    pub fn get(&self, path: &str) -> Option<&DiffOperation> {
        self.operations.iter().rev().find(|op| op.path() == path)
    }
}

impl Default for DiffDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for DiffDocument {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.operations, &other.operations) || self.operations == other.operations
    }
}

impl Eq for DiffDocument {}

impl<'a> IntoIterator for &'a DiffDocument {
    type Item = &'a DiffOperation;
    type IntoIter = std::slice::Iter<'a, DiffOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for DiffDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.operations.iter())
    }
}

impl<'de> Deserialize<'de> for DiffDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<DiffOperation>::deserialize(deserializer).map(Self::from_operations)
    }
}

/// Append-only construction of a [`DiffDocument`].
#[derive(Debug, Default)]
pub struct DiffBuilder {
    operations: Vec<DiffOperation>,
}

impl DiffBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation.
    pub fn push(&mut self, operation: DiffOperation) {
        self.operations.push(operation);
    }

    /// Append a set operation.
    pub fn set(&mut self, path: impl Into<String>, value: MemberValue) -> DiffResult<()> {
        self.push(DiffOperation::set(path, value)?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Freeze the builder into a document.
    pub fn finish(self) -> DiffDocument {
        DiffDocument::from_operations(self.operations)
    }
}
