//! Value equality used by the comparator.
//!
//! Strings compare by content, numbers numerically, and composite values
//! (arrays, objects) element by element under the same rules. Comparison is
//! a yes/no answer for a whole member; nested values are never diffed.

use serde_json::{Number, Value};

/// Returns `true` if `a` and `b` are the same value.
///
/// Unlike `Value`'s `PartialEq`, integers and floats that denote the same
/// number are equal (`1 == 1.0`).
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, x)| ym.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

// 2^63 and 2^64, the exclusive upper bounds of i64 and u64 as floats.
const I64_END: f64 = 9_223_372_036_854_775_808.0;
const U64_END: f64 = 18_446_744_073_709_551_616.0;

fn numbers_equal(x: &Number, y: &Number) -> bool {
    match (float(x), float(y)) {
        (None, None) => integers_equal(x, y),
        (Some(a), Some(b)) => a == b,
        (None, Some(f)) => integer_equals_float(x, f),
        (Some(f), None) => integer_equals_float(y, f),
    }
}

fn float(n: &Number) -> Option<f64> {
    if n.is_f64() {
        n.as_f64()
    } else {
        None
    }
}

fn integers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    false
}

/// Exact comparison: the float must be integral and inside the integer's
/// range, otherwise widening the integer to f64 could round it onto `f`.
fn integer_equals_float(int: &Number, f: f64) -> bool {
    if !f.is_finite() || f.fract() != 0.0 {
        return false;
    }
    if let Some(i) = int.as_i64() {
        return (-I64_END..I64_END).contains(&f) && f as i64 == i;
    }
    if let Some(u) = int.as_u64() {
        return (0.0..U64_END).contains(&f) && f as u64 == u;
    }
    false
}
