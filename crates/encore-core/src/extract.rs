//! Tolerant field extraction over heterogeneous backend payloads.
//!
//! The box-office proxy returns cart and line-item objects in several
//! shapes depending on which upstream code path produced them. Rather
//! than scattering fallback chains through every consumer, this module
//! centralizes the lookup: a logical field is described as an ordered
//! list of dotted key-paths, and the first path whose full traversal
//! succeeds wins.
//!
//! All functions here are pure; they never mutate the payload and hold
//! no state.

use serde_json::Value;

/// Walks `value` along a dotted key-path.
///
/// Each segment indexes into an object by key; a numeric segment also
/// indexes into an array (`"SubLineItems.0.Id"`). The walk is abandoned
/// (returning `None`, not an error) as soon as an intermediate value is
/// null or missing. An explicitly-null leaf is also reported as `None`
/// so that callers fall through to the next path or tier.
pub fn resolve_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut cur = value;
    for segment in path.split('.') {
        cur = match cur {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => {
                let idx: usize = segment.parse().ok()?;
                items.get(idx)?
            }
            _ => return None,
        };
        if cur.is_null() {
            return None;
        }
    }
    Some(cur)
}

/// Tries each path in order and returns the first defined value.
pub fn first_match<'a>(value: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths.iter().find_map(|p| resolve_path(value, p))
}

/// Like [`first_match`] but only accepts arrays.
pub fn first_array<'a>(value: &'a Value, paths: &[&str]) -> Option<&'a Vec<Value>> {
    paths.iter().find_map(|p| resolve_path(value, p)?.as_array())
}

/// Coerces a possibly-absent, possibly non-numeric value to a price.
///
/// Numbers pass through; numeric strings are parsed; anything else
/// (including `None`) coerces to `0.0`. The backend is known to emit
/// prices as both numbers and strings.
pub fn as_money(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Formats an amount for display with two decimal places.
pub fn format_money(amount: f64) -> String {
    if amount.is_finite() {
        format!("{:.2}", amount)
    } else {
        "0.00".to_string()
    }
}

/// Coerces an identifier that may arrive as a JSON number or string.
pub fn as_id_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Coerces an identifier to an integer, accepting both wire forms.
pub fn as_id_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
