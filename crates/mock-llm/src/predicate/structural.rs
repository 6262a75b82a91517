//! Structural comparison of JSON value trees.
//!
//! `matches` is the single comparison used by every provider. It is pure and
//! total: anything that cannot be compared (e.g. a value that fails to
//! serialize) resolves to `false`.

use super::mode::MatchMode;
use serde_json::{Map, Number, Value};

/// Compare an expected value tree against an actual one under `mode`.
///
/// # Contains semantics
///
/// Dispatches on the variant of `expected`:
/// - `Null` matches only `Null`.
/// - `String` matches when the serialized form of `actual` contains the string,
///   whatever the type of `actual`. A short phrase can therefore match inside a
///   larger serialized object.
/// - `Object` requires `actual` to be an object holding every expected key, each
///   value contained recursively. Extra keys in `actual` are ignored.
/// - `Array` requires `actual` to be an array of the *same length*, compared
///   position by position. This is not subset or subsequence containment:
///   `["a", "b"]` does not match `["a", "b", "c"]`. An empty expected array
///   matches any array.
/// - `Number` and `Bool` match when both serialize to the same bytes.
pub fn matches(mode: MatchMode, expected: &Value, actual: &Value) -> bool {
    match mode {
        MatchMode::Exact => exact_equals(expected, actual),
        MatchMode::Contains => contains(expected, actual),
    }
}

/// Structural identity with numeric (not textual) number comparison.
pub fn exact_equals(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(e), Value::Bool(a)) => e == a,
        (Value::Number(e), Value::Number(a)) => numbers_equal(e, a),
        (Value::String(e), Value::String(a)) => e == a,
        (Value::Array(e), Value::Array(a)) => {
            e.len() == a.len() && e.iter().zip(a).all(|(e, a)| exact_equals(e, a))
        }
        (Value::Object(e), Value::Object(a)) => {
            e.len() == a.len()
                && e.iter()
                    .all(|(key, e)| a.get(key).is_some_and(|a| exact_equals(e, a)))
        }
        _ => false,
    }
}

/// One-sided structural containment of `expected` in `actual`.
pub fn contains(expected: &Value, actual: &Value) -> bool {
    match expected {
        Value::Null => actual.is_null(),
        Value::String(needle) => serialized_contains(needle, actual),
        Value::Object(expected) => match actual {
            Value::Object(actual) => object_contains(expected, actual),
            _ => false,
        },
        Value::Array(expected) => match actual {
            Value::Array(actual) => array_contains(expected, actual),
            _ => false,
        },
        Value::Number(_) | Value::Bool(_) => serialized_equals(expected, actual),
    }
}

fn object_contains(expected: &Map<String, Value>, actual: &Map<String, Value>) -> bool {
    expected
        .iter()
        .all(|(key, e)| actual.get(key).is_some_and(|a| contains(e, a)))
}

// Positional and length-exact. Kept as-is even though it is narrower than the
// object and string rules under the same mode.
fn array_contains(expected: &[Value], actual: &[Value]) -> bool {
    if expected.is_empty() {
        return true;
    }
    expected.len() == actual.len() && expected.iter().zip(actual).all(|(e, a)| contains(e, a))
}

fn serialized_contains(needle: &str, actual: &Value) -> bool {
    if let Value::String(haystack) = actual {
        if haystack.contains(needle) {
            return true;
        }
    }

    // Only the raw serialized text is searched. A needle holding a quote or
    // control character can match a non-string actual only through its escape.
    serde_json::to_string(actual).is_ok_and(|serialized| serialized.contains(needle))
}

fn serialized_equals(expected: &Value, actual: &Value) -> bool {
    match (serde_json::to_vec(expected), serde_json::to_vec(actual)) {
        (Ok(e), Ok(a)) => e == a,
        _ => false,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (as_integer(a), as_integer(b)) {
        (Some(a), Some(b)) => a == b,
        (Some(i), None) => b.as_f64().is_some_and(|f| float_equals_integer(f, i)),
        (None, Some(i)) => a.as_f64().is_some_and(|f| float_equals_integer(f, i)),
        (None, None) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

// Integers span [-2^63, 2^64). A float equals one only when it is integral and
// inside that range, so no precision is lost converting it to i128.
fn float_equals_integer(f: f64, i: i128) -> bool {
    const MIN: f64 = -9_223_372_036_854_775_808.0;
    const MAX_EXCLUSIVE: f64 = 18_446_744_073_709_551_616.0;
    f.fract() == 0.0 && (MIN..MAX_EXCLUSIVE).contains(&f) && f as i128 == i
}
