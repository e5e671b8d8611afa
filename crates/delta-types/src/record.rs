//! A JSON-object-backed [`MemberAccessor`].
//!
//! Records let documents whose shape is only known at runtime take part in
//! diffing. Each top-level key is a member; the schema name plays the role
//! of the type name when two records are compared.

use serde_json::{Map, Value};

use crate::accessor::{MemberAccessor, MemberDescriptor, MemberValue, TypeDescriptor};
use crate::error::{SetError, TypeError};

/// Schema name used when none is given.
pub const DEFAULT_SCHEMA: &str = "record";

/// A named, flat key/value record.
///
/// Members are the keys present at construction, in sorted order. Writing
/// to a key outside that set fails with [`SetError::UnknownMember`].
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    descriptor: TypeDescriptor,
    fields: Map<String, Value>,
}

impl Record {
    /// Build a record from a JSON object under the given schema name.
    pub fn new(schema: impl Into<String>, fields: Map<String, Value>) -> Self {
        let descriptor = TypeDescriptor::from_members(
            schema,
            fields.keys().map(|k| MemberDescriptor::owned(k.clone(), true)),
        );
        Self { descriptor, fields }
    }

    /// Build a record from any JSON value; only objects are accepted.
    pub fn from_value(schema: impl Into<String>, value: Value) -> Result<Self, TypeError> {
        match value {
            Value::Object(fields) => Ok(Self::new(schema, fields)),
            other => Err(TypeError::NotAnObject {
                schema: schema.into(),
                actual: json_kind(&other),
            }),
        }
    }

    /// Parse a record from JSON text.
    pub fn from_json(schema: impl Into<String>, text: &str) -> Result<Self, TypeError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| TypeError::Serialization(e.to_string()))?;
        Self::from_value(schema, value)
    }

    pub fn schema(&self) -> &str {
        self.descriptor.type_name()
    }

    pub fn get(&self, member: &str) -> Option<&Value> {
        self.fields.get(member)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl MemberAccessor for Record {
    fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    fn try_get(&self, member: &str) -> Option<MemberValue> {
        self.fields.get(member).cloned()
    }

    fn try_set(&mut self, member: &str, value: MemberValue) -> Result<(), SetError> {
        match self.fields.get_mut(member) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(SetError::UnknownMember),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person() -> Record {
        Record::from_value("person", json!({"name": "Daniel", "age": 40})).unwrap()
    }

    #[test]
    fn members_are_sorted_keys() {
        let r = person();
        let names: Vec<&str> = r.descriptor().member_names().collect();
        assert_eq!(names, ["age", "name"]);
        assert_eq!(r.schema(), "person");
    }

    #[test]
    fn non_object_is_rejected() {
        let err = Record::from_value("person", json!([1, 2])).unwrap_err();
        assert_eq!(
            err,
            TypeError::NotAnObject {
                schema: "person".into(),
                actual: "array"
            }
        );
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            Record::from_json(DEFAULT_SCHEMA, "{not json"),
            Err(TypeError::Serialization(_))
        ));
    }

    #[test]
    fn set_existing_member() {
        let mut r = person();
        r.try_set("name", json!("George")).unwrap();
        assert_eq!(r.get("name"), Some(&json!("George")));
    }

    #[test]
    fn set_unknown_member_fails() {
        let mut r = person();
        assert_eq!(
            r.try_set("email", json!("x@y")),
            Err(SetError::UnknownMember)
        );
        assert!(r.get("email").is_none());
    }

    #[test]
    fn into_value_returns_fields() {
        let value = person().into_value();
        assert_eq!(value, json!({"age": 40, "name": "Daniel"}));
    }
}
