//! The member accessor capability.
//!
//! Diffing and patching never look at a concrete type. They go through
//! [`MemberAccessor`], which reads and writes members by name and exposes a
//! [`TypeDescriptor`] listing those members in a stable order. Derived types
//! (see `delta-derive`) build their descriptor once as a `static` table;
//! dynamic shapes such as [`Record`](crate::Record) own theirs.

use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SetError;

/// A member value as it crosses the accessor seam.
pub type MemberValue = serde_json::Value;

/// One named member of a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberDescriptor {
    name: Cow<'static, str>,
    writable: bool,
}

impl MemberDescriptor {
    /// A member whose name is known at compile time.
    pub const fn new(name: &'static str, writable: bool) -> Self {
        Self {
            name: Cow::Borrowed(name),
            writable,
        }
    }

    /// A member discovered at runtime.
    pub fn owned(name: impl Into<String>, writable: bool) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            writable,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }
}

/// The shape of a type: its name and its members in declaration order.
///
/// # Invariants
///
/// - Member order is stable across calls for the same type.
/// - Member names are unique within a descriptor.
///
/// Runtime descriptors carry a name index so lookups stay constant time for
/// wide records; static tables are small and scanned.
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    type_name: Cow<'static, str>,
    members: Cow<'static, [MemberDescriptor]>,
    index: Option<HashMap<String, usize>>,
}

impl TypeDescriptor {
    /// Descriptor backed by a static member table.
    pub const fn from_static(type_name: &'static str, members: &'static [MemberDescriptor]) -> Self {
        Self {
            type_name: Cow::Borrowed(type_name),
            members: Cow::Borrowed(members),
            index: None,
        }
    }

    /// Descriptor built at runtime. Later duplicates of a name are dropped.
    pub fn from_members(
        type_name: impl Into<String>,
        members: impl IntoIterator<Item = MemberDescriptor>,
    ) -> Self {
        let members = members.into_iter();
        let mut unique: Vec<MemberDescriptor> = Vec::with_capacity(members.size_hint().0);
        let mut index = HashMap::with_capacity(unique.capacity());
        for member in members {
            if let Entry::Vacant(slot) = index.entry(member.name().to_owned()) {
                slot.insert(unique.len());
                unique.push(member);
            }
        }
        Self {
            type_name: Cow::Owned(type_name.into()),
            members: Cow::Owned(unique),
            index: Some(index),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Members in declaration order.
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Member names in declaration order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(MemberDescriptor::name)
    }

    /// Look up a member by name.
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        match &self.index {
            Some(index) => index.get(name).map(|&i| &self.members[i]),
            None => self.members.iter().find(|m| m.name() == name),
        }
    }

    /// Returns `true` if `name` resolves to a writable member.
    pub fn is_writable(&self, name: &str) -> bool {
        self.member(name).is_some_and(MemberDescriptor::is_writable)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.members == other.members
    }
}

impl Eq for TypeDescriptor {}

/// Read and write named members of an instance without compile-time
/// knowledge of its type.
pub trait MemberAccessor {
    /// The shape of this instance.
    fn descriptor(&self) -> &TypeDescriptor;

    /// Read a member. `None` when the member is unknown or unreadable.
    fn try_get(&self, member: &str) -> Option<MemberValue>;

    /// Write a member.
    fn try_set(&mut self, member: &str, value: MemberValue) -> Result<(), SetError>;
}

/// Types whose shape is fixed at compile time.
///
/// Implemented by `#[derive(Members)]`; the descriptor is a `static` table
/// built once per type.
pub trait Members: MemberAccessor {
    fn type_descriptor() -> &'static TypeDescriptor;
}

/// Convert a field into a [`MemberValue`]. `None` if it does not serialize.
pub fn to_member_value<T: Serialize + ?Sized>(value: &T) -> Option<MemberValue> {
    serde_json::to_value(value).ok()
}

/// Convert a [`MemberValue`] back into a field type.
pub fn from_member_value<T: DeserializeOwned>(value: MemberValue) -> Result<T, SetError> {
    serde_json::from_value(value).map_err(|e| SetError::InvalidValue(e.to_string()))
}
