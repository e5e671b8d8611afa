//! Canonical form of a key/value document.
//!
//! The canonical form is compact JSON in which the keys of every object, at
//! every depth (objects nested in arrays included), appear in ordinal
//! code-point order. Array element order is significant and kept as is.
//! Two documents that parse to the same mapping always share one canonical
//! form, whatever order their keys were written in.

use std::io::Write;

use serde_json::Value;

use crate::error::{HashError, HashResult};

/// Deepest container nesting accepted when canonicalizing; serde_json's
/// parser stops before this, so only values built in code can reach it.
pub const MAX_DEPTH: usize = 128;

/// Parse `text` as a key/value document.
///
/// The root must be a JSON object; anything else, including malformed text,
/// is a [`HashError::Format`].
pub fn parse_document(text: &str) -> HashResult<Value> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| HashError::Format(e.to_string()))?;
    match value {
        Value::Object(_) => Ok(value),
        other => Err(HashError::Format(format!(
            "expected a key/value document, found {}",
            kind(&other)
        ))),
    }
}

/// Canonical form of the document in `text`.
pub fn canonicalize(text: &str) -> HashResult<String> {
    let value = parse_document(text)?;
    let bytes = canonical_bytes(&value)?;
    String::from_utf8(bytes).map_err(|e| HashError::Serialization(e.to_string()))
}

/// Canonical bytes of an already-parsed value.
///
/// # Errors
///
/// Returns [`HashError::Format`] if arrays and objects nest deeper than
/// [`MAX_DEPTH`].
pub fn canonical_bytes(value: &Value) -> HashResult<Vec<u8>> {
    let mut out = Vec::new();
    write_canonical(&mut out, value, 0)?;
    Ok(out)
}

fn write_canonical(out: &mut Vec<u8>, value: &Value, depth: usize) -> HashResult<()> {
    if matches!(value, Value::Array(_) | Value::Object(_)) && depth == MAX_DEPTH {
        return Err(HashError::Format(format!(
            "document nests deeper than {MAX_DEPTH} levels"
        )));
    }
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => write!(out, "{n}").map_err(|e| HashError::Serialization(e.to_string()))?,
        Value::String(s) => serde_json::to_writer(&mut *out, s)?,
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_canonical(out, item, depth + 1)?;
            }
            out.push(b']');
        }
        Value::Object(map) => {
            // Map iteration order depends on serde_json's `preserve_order`
            // feature, so the order is fixed here.
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.as_str().cmp(b.0.as_str()));

            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                serde_json::to_writer(&mut *out, key)?;
                out.push(b':');
                write_canonical(out, item, depth + 1)?;
            }
            out.push(b'}');
        }
    }
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
