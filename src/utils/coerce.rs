//! Scalar coercion primitives over JSON values.
//!
//! These accept the loose spellings users write in configuration files
//! (`"yes"`, `"off"`, `"3"`) and return `None` for anything unrecognized.

use serde_json::Value;

const TRUE_LITERALS: [&str; 4] = ["true", "1", "yes", "on"];
const FALSE_LITERALS: [&str; 4] = ["false", "0", "no", "off"];

/// Parse a boolean from a native bool, the numbers `1`/`0`, or one of the
/// textual spellings `true false 1 0 yes no on off` (case-insensitive, trimmed).
pub fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 1.0 => Some(true),
            Some(f) if f == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) => parse_bool_str(s),
        _ => None,
    }
}

pub fn parse_bool_str(value: &str) -> Option<bool> {
    let lower = value.trim().to_ascii_lowercase();
    if TRUE_LITERALS.contains(&lower.as_str()) {
        Some(true)
    } else if FALSE_LITERALS.contains(&lower.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Parse an integer from a number or numeric string. Fractions are truncated.
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

fn truncate(f: f64) -> Option<i64> {
    if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

/// Loose truthiness: empty strings, `"0"`, zero, empty collections, null and
/// `false` are falsy; everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Lower-cased, trimmed view of a string value.
pub fn normalized_str(value: &Value) -> Option<String> {
    value.as_str().map(|s| s.trim().to_ascii_lowercase())
}
