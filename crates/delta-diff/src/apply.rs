//! Patch application: replay a [`DiffDocument`] onto a target instance.

use tracing::debug;

use delta_types::{MemberAccessor, SetError};

use crate::document::DiffDocument;
use crate::error::{DiffError, DiffResult};

impl DiffDocument {
    /// Write every operation's value to its member on `target`, in order.
    ///
    /// Every path is checked against the target's descriptor before the
    /// first write, so an unknown or read-only path leaves `target`
    /// untouched. Applying the same document twice has the same effect as
    /// applying it once. Applying the empty document does nothing.
    ///
    /// # Errors
    ///
    /// - [`DiffError::MemberNotWritable`] if a path does not resolve to a
    ///   writable member.
    /// - [`DiffError::InvalidValue`] if a member cannot hold its value;
    ///   operations before it have already been written.
    pub fn apply_to<T: MemberAccessor + ?Sized>(&self, target: &mut T) -> DiffResult<()> {
        if self.is_empty() {
            return Ok(());
        }

        let descriptor = target.descriptor();
        if let Some(op) = self.iter().find(|op| !descriptor.is_writable(op.path())) {
            return Err(DiffError::MemberNotWritable {
                path: op.path().to_string(),
            });
        }

        for op in self {
            target
                .try_set(op.path(), op.value().clone())
                .map_err(|e| match e {
                    SetError::UnknownMember | SetError::ReadOnly => DiffError::MemberNotWritable {
                        path: op.path().to_string(),
                    },
                    SetError::InvalidValue(reason) => DiffError::InvalidValue {
                        path: op.path().to_string(),
                        reason,
                    },
                })?;
        }

        debug!(
            type_name = target.descriptor().type_name(),
            operations = self.len(),
            "diff applied"
        );
        Ok(())
    }

    /// Apply this document to a copy of `target`, leaving `target` as is.
    pub fn applied<T: MemberAccessor + Clone>(&self, target: &T) -> DiffResult<T> {
        let mut copy = target.clone();
        self.apply_to(&mut copy)?;
        Ok(copy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{object_to_object, object_to_object_dyn};
    use crate::document::DiffOperation;
    use delta_derive::Members;
    use delta_types::Record;
    use serde_json::json;

    #[derive(Members, Debug, Clone, PartialEq)]
    struct Person {
        #[member(rename = "Name")]
        name: String,
        age: u32,
        #[member(readonly)]
        id: u64,
    }

    fn person(name: &str, age: u32) -> Person {
        Person {
            name: name.into(),
            age,
            id: 7,
        }
    }

    fn doc(ops: &[(&str, serde_json::Value)]) -> DiffDocument {
        DiffDocument::from_operations(
            ops.iter()
                .map(|(p, v)| DiffOperation::set(*p, v.clone()).unwrap())
                .collect(),
        )
    }

    #[test]
    fn applying_diff_reaches_destination() {
        let mut daniel = person("Daniel", 40);
        let george = person("George", 40);
        let diff = object_to_object(&daniel, &george);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff.operations()[0].path(), "Name");
        assert_eq!(diff.operations()[0].value(), &json!("George"));

        diff.apply_to(&mut daniel).unwrap();
        assert_eq!(daniel.name, "George");
        assert_eq!(daniel, george);
    }

    #[test]
    fn applying_twice_equals_applying_once() {
        let diff = doc(&[("Name", json!("George")), ("age", json!(41))]);
        let mut once = person("Daniel", 40);
        diff.apply_to(&mut once).unwrap();
        let mut twice = once.clone();
        diff.apply_to(&mut twice).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_document_is_a_no_op() {
        let mut p = person("Daniel", 40);
        DiffDocument::empty().apply_to(&mut p).unwrap();
        assert_eq!(p, person("Daniel", 40));
    }

    #[test]
    fn unknown_path_fails_without_mutation() {
        let mut p = person("Daniel", 40);
        let diff = doc(&[("age", json!(41)), ("email", json!("d@x"))]);
        let err = diff.apply_to(&mut p).unwrap_err();
        assert_eq!(
            err,
            DiffError::MemberNotWritable {
                path: "email".into()
            }
        );
        assert_eq!(p.age, 40);
    }

    #[test]
    fn readonly_path_fails() {
        let mut p = person("Daniel", 40);
        let err = doc(&[("id", json!(8))]).apply_to(&mut p).unwrap_err();
        assert_eq!(err, DiffError::MemberNotWritable { path: "id".into() });
        assert_eq!(p.id, 7);
    }

    #[test]
    fn ill_typed_value_fails() {
        let mut p = person("Daniel", 40);
        let err = doc(&[("age", json!("old"))]).apply_to(&mut p).unwrap_err();
        assert!(matches!(err, DiffError::InvalidValue { ref path, .. } if path == "age"));
    }

    #[test]
    fn applied_leaves_source_untouched() {
        let p = person("Daniel", 40);
        let patched = doc(&[("age", json!(41))]).applied(&p).unwrap();
        assert_eq!(patched.age, 41);
        assert_eq!(p.age, 40);
    }

    #[test]
    fn apply_through_trait_object() {
        let before = Record::from_value("cfg", json!({"debug": false, "port": 8080})).unwrap();
        let after = Record::from_value("cfg", json!({"debug": true, "port": 8080})).unwrap();
        let diff = object_to_object_dyn(&before, &after).unwrap();

        let mut target = before.clone();
        let accessor: &mut dyn MemberAccessor = &mut target;
        diff.apply_to(accessor).unwrap();
        assert_eq!(target, after);
    }

    #[test]
    fn wide_record_diff_applies_every_member() {
        let wide = |offset: i64| {
            let fields = (0..20_000i64)
                .map(|i| (format!("k{i}"), json!(i + offset)))
                .collect();
            Record::new("wide", fields)
        };
        let (before, after) = (wide(0), wide(1));
        let diff = object_to_object_dyn(&before, &after).unwrap();
        assert_eq!(diff.len(), 20_000);

        let mut target = before.clone();
        diff.apply_to(&mut target).unwrap();
        assert_eq!(target, after);
    }
}

#[cfg(test)]
mod proptests {
    use crate::compare::object_to_object;
    use delta_derive::Members;
    use proptest::prelude::*;

    #[derive(Members, Debug, Clone, PartialEq)]
    struct Account {
        owner: String,
        balance: i64,
        active: bool,
        labels: Vec<String>,
    }

    fn account() -> impl Strategy<Value = Account> {
        (
            "[a-z]{0,6}",
            -1000i64..1000,
            any::<bool>(),
            prop::collection::vec("[a-z]{1,3}", 0..3),
        )
            .prop_map(|(owner, balance, active, labels)| Account {
                owner,
                balance,
                active,
                labels,
            })
    }

    proptest! {
        /// Applying diff(x, y) to x yields y.
        #[test]
        fn diff_then_apply_reaches_destination(x in account(), y in account()) {
            let diff = object_to_object(&x, &y);
            prop_assert_eq!(diff.applied(&x).unwrap(), y);
        }

        /// Re-applying a diff changes nothing.
        #[test]
        fn apply_is_idempotent(x in account(), y in account()) {
            let diff = object_to_object(&x, &y);
            let once = diff.applied(&x).unwrap();
            let twice = diff.applied(&once).unwrap();
            prop_assert_eq!(once, twice);
        }

        /// Value-equal instances never produce operations.
        #[test]
        fn equal_instances_diff_to_shared_empty(x in account()) {
            let y = x.clone();
            prop_assert!(object_to_object(&x, &y).is_shared_empty());
            prop_assert!(object_to_object(&x, &x).is_shared_empty());
        }

        /// A diff touches exactly the members that differ.
        #[test]
        fn diff_is_minimal(x in account(), y in account()) {
            let diff = object_to_object(&x, &y);
            let expected = usize::from(x.owner != y.owner)
                + usize::from(x.balance != y.balance)
                + usize::from(x.active != y.active)
                + usize::from(x.labels != y.labels);
            prop_assert_eq!(diff.len(), expected);
        }
    }
}
