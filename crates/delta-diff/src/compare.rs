//! Member-level comparison of two same-shaped instances.
//!
//! The comparator walks the members of a [`TypeDescriptor`] in declaration
//! order, reads both sides through [`MemberAccessor`], and records a set
//! operation carrying the right-hand value for every member that differs.
//! Comparison is shallow: a composite member is equal or not as a whole.
//!
//! A member that either side cannot read is skipped, so instances from
//! different schema versions can still be compared over the members they
//! share.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use delta_types::{MemberAccessor, Members, TypeDescriptor};

use crate::document::{DiffBuilder, DiffDocument, DiffOperation};
use crate::equality::values_equal;
use crate::error::{DiffError, DiffResult};

/// Options controlling which members are compared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompareOptions {
    ignore: BTreeSet<String>,
}

impl CompareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never compare `member`.
    pub fn ignore(mut self, member: impl Into<String>) -> Self {
        self.ignore.insert(member.into());
        self
    }

    /// Never compare any of `members`.
    pub fn ignore_all<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(members.into_iter().map(Into::into));
        self
    }

    pub fn is_ignored(&self, member: &str) -> bool {
        self.ignore.contains(member)
    }
}

/// Compute the diff that turns `left` into `right`.
///
/// Returns [`DiffDocument::empty`] when `left` and `right` are the same
/// instance or every member is equal.
pub fn object_to_object<T: Members>(left: &T, right: &T) -> DiffDocument {
    object_to_object_with(left, right, &CompareOptions::default())
}

/// [`object_to_object`] with explicit [`CompareOptions`].
pub fn object_to_object_with<T: Members>(
    left: &T,
    right: &T,
    options: &CompareOptions,
) -> DiffDocument {
    diff_members(left, right, T::type_descriptor(), options)
}

/// Compute the diff between two instances whose shape is only known at
/// runtime.
///
/// # Errors
///
/// Returns [`DiffError::TypeMismatch`] if the two descriptors name different
/// types.
pub fn object_to_object_dyn(
    left: &dyn MemberAccessor,
    right: &dyn MemberAccessor,
) -> DiffResult<DiffDocument> {
    object_to_object_dyn_with(left, right, &CompareOptions::default())
}

/// [`object_to_object_dyn`] with explicit [`CompareOptions`].
pub fn object_to_object_dyn_with(
    left: &dyn MemberAccessor,
    right: &dyn MemberAccessor,
    options: &CompareOptions,
) -> DiffResult<DiffDocument> {
    let (l, r) = (left.descriptor(), right.descriptor());
    if l.type_name() != r.type_name() {
        return Err(DiffError::TypeMismatch {
            left: l.type_name().to_string(),
            right: r.type_name().to_string(),
        });
    }
    Ok(diff_members(left, right, l, options))
}

fn diff_members<L, R>(
    left: &L,
    right: &R,
    descriptor: &TypeDescriptor,
    options: &CompareOptions,
) -> DiffDocument
where
    L: MemberAccessor + ?Sized,
    R: MemberAccessor + ?Sized,
{
    if std::ptr::addr_eq(left as *const L, right as *const R) {
        trace!(type_name = descriptor.type_name(), "same instance, no diff");
        return DiffDocument::empty();
    }

    let mut builder = DiffBuilder::new();
    for name in descriptor.member_names() {
        if options.is_ignored(name) {
            continue;
        }
        let (Some(before), Some(after)) = (left.try_get(name), right.try_get(name)) else {
            trace!(member = name, "member unreadable on one side, skipped");
            continue;
        };
        if values_equal(&before, &after) {
            continue;
        }
        match DiffOperation::set(name, after) {
            Ok(op) => builder.push(op),
            Err(_) => trace!("member with empty name skipped"),
        }
    }

    let document = builder.finish();
    debug!(
        type_name = descriptor.type_name(),
        operations = document.len(),
        "diff computed"
    );
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use delta_derive::Members;
    use delta_types::{MemberDescriptor, MemberValue, Record, SetError};
    use serde_json::json;

    #[derive(Members, Debug, Clone, PartialEq)]
    struct Person {
        #[member(rename = "Name")]
        name: String,
        age: u32,
        score: f64,
        tags: Vec<String>,
    }

    fn daniel() -> Person {
        Person {
            name: "Daniel".into(),
            age: 40,
            score: 1.0,
            tags: vec!["a".into()],
        }
    }

    #[test]
    fn same_instance_is_shared_empty() {
        let p = daniel();
        assert!(object_to_object(&p, &p).is_shared_empty());
    }

    #[test]
    fn distinct_equal_instances_are_shared_empty() {
        let a = daniel();
        let b = daniel();
        let doc = object_to_object(&a, &b);
        assert!(doc.is_shared_empty());
        assert_eq!(doc, DiffDocument::empty());
    }

    #[test]
    fn single_member_difference() {
        let a = daniel();
        let b = Person {
            name: "George".into(),
            ..daniel()
        };
        let doc = object_to_object(&a, &b);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.operations()[0].path(), "Name");
        assert_eq!(doc.operations()[0].value(), &json!("George"));
    }

    #[test]
    fn operations_follow_declaration_order() {
        let a = daniel();
        let b = Person {
            name: "George".into(),
            age: 41,
            score: 1.0,
            tags: vec!["a".into(), "b".into()],
        };
        let doc = object_to_object(&a, &b);
        assert_eq!(doc.paths().collect::<Vec<_>>(), ["Name", "age", "tags"]);
    }

    #[test]
    fn only_destination_value_is_recorded() {
        let a = daniel();
        let b = Person { age: 41, ..daniel() };
        let forward = object_to_object(&a, &b);
        let backward = object_to_object(&b, &a);
        assert_eq!(forward.get("age").unwrap().value(), &json!(41));
        assert_eq!(backward.get("age").unwrap().value(), &json!(40));
    }

    #[test]
    fn ignored_members_are_not_compared() {
        let a = daniel();
        let b = Person {
            name: "George".into(),
            age: 41,
            ..daniel()
        };
        let options = CompareOptions::new().ignore("age");
        let doc = object_to_object_with(&a, &b, &options);
        assert_eq!(doc.paths().collect::<Vec<_>>(), ["Name"]);

        let all = CompareOptions::new().ignore_all(["Name", "age"]);
        assert!(object_to_object_with(&a, &b, &all).is_shared_empty());
    }

    #[test]
    fn dyn_comparison_of_records() {
        let a = Record::from_value("person", json!({"name": "Daniel", "age": 40})).unwrap();
        let b = Record::from_value("person", json!({"name": "Daniel", "age": 41})).unwrap();
        let doc = object_to_object_dyn(&a, &b).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("age").unwrap().value(), &json!(41));
    }

    #[test]
    fn dyn_comparison_rejects_mismatched_shapes() {
        let person = daniel();
        let record = Record::from_value("person", json!({"Name": "Daniel"})).unwrap();
        let err = object_to_object_dyn(&person, &record).unwrap_err();
        assert_eq!(
            err,
            DiffError::TypeMismatch {
                left: "Person".into(),
                right: "person".into()
            }
        );
    }

    #[test]
    fn dyn_same_instance_is_shared_empty() {
        let record = Record::from_value("person", json!({"a": 1})).unwrap();
        assert!(object_to_object_dyn(&record, &record)
            .unwrap()
            .is_shared_empty());
    }

    #[test]
    fn members_missing_on_one_side_are_skipped() {
        // v2 dropped `nickname` and added `email`.
        let v1 = Record::from_value("user", json!({"name": "Dan", "nickname": "D"})).unwrap();
        let v2 = Record::from_value("user", json!({"name": "Daniel", "email": "d@x"})).unwrap();
        let doc = object_to_object_dyn(&v1, &v2).unwrap();
        assert_eq!(doc.paths().collect::<Vec<_>>(), ["name"]);
    }

    struct Flaky {
        descriptor: TypeDescriptor,
        readable: bool,
        value: i64,
    }

    impl MemberAccessor for Flaky {
        fn descriptor(&self) -> &TypeDescriptor {
            &self.descriptor
        }

        fn try_get(&self, member: &str) -> Option<MemberValue> {
            match member {
                "value" if self.readable => Some(json!(self.value)),
                "" => Some(json!(self.value)),
                _ => None,
            }
        }

        fn try_set(&mut self, _member: &str, _value: MemberValue) -> Result<(), SetError> {
            Err(SetError::ReadOnly)
        }
    }

    fn flaky(readable: bool, value: i64) -> Flaky {
        Flaky {
            descriptor: TypeDescriptor::from_members(
                "Flaky",
                [
                    MemberDescriptor::owned("", false),
                    MemberDescriptor::owned("value", false),
                ],
            ),
            readable,
            value,
        }
    }

    #[test]
    fn unreadable_member_is_skipped() {
        let doc = object_to_object_dyn(&flaky(false, 1), &flaky(true, 2)).unwrap();
        assert!(doc.get("value").is_none());
    }

    #[test]
    fn empty_member_name_is_skipped() {
        let doc = object_to_object_dyn(&flaky(true, 1), &flaky(true, 2)).unwrap();
        assert_eq!(doc.paths().collect::<Vec<_>>(), ["value"]);
    }

    #[test]
    fn numeric_equality_across_representations() {
        let a = Record::from_value("m", json!({"n": 1})).unwrap();
        let b = Record::from_value("m", json!({"n": 1.0})).unwrap();
        assert!(object_to_object_dyn(&a, &b).unwrap().is_shared_empty());
    }

    #[test]
    fn large_integer_against_nearby_float_round_trips() {
        let x = Record::from_value("m", json!({"n": 9_007_199_254_740_993u64})).unwrap();
        let y = Record::from_value("m", json!({"n": 9_007_199_254_740_992.0})).unwrap();
        let diff = object_to_object_dyn(&x, &y).unwrap();
        assert_eq!(diff.paths().collect::<Vec<_>>(), ["n"]);

        let mut patched = x.clone();
        diff.apply_to(&mut patched).unwrap();
        assert_eq!(patched, y);
    }
}
