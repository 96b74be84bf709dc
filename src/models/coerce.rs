//! Scalar coercion applied on bulk ingestion.
//!
//! Loosely typed input (form data, decoded config, hand-built maps) is brought
//! to the declared field type:
//!
//! | target  | rule |
//! |---------|------|
//! | boolean | `""`, `"0"`, `0`, `0.0` are false, any other scalar is true |
//! | integer | bool as 0/1, floats truncate, strings use their leading numeric prefix |
//! | float   | bool as 0.0/1.0, strings use their leading numeric prefix |
//! | string  | `true` is `"1"`, `false` is `""`, numbers print in decimal |
//!
//! Lists, maps and nulls are never touched.

use crate::types::FieldType;
use serde_json::{Number, Value};

/// Coerce a value to the declared type of its field
pub fn coerce(value: Value, target: FieldType) -> Value {
    if value.is_null() || !target.is_scalar() || target.matches(&value) {
        return value;
    }
    if value.is_array() || value.is_object() {
        return value;
    }

    match target {
        FieldType::Boolean => Value::Bool(to_boolean(&value)),
        FieldType::Integer => Value::from(to_integer(&value)),
        FieldType::Float => float_value(to_float(&value)),
        FieldType::String => Value::String(to_string(&value)),
        _ => value,
    }
}

/// Truthiness of a scalar
pub fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Integer value of a scalar
pub fn to_integer(value: &Value) -> i64 {
    match value {
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(u) = n.as_u64() {
                i64::try_from(u).unwrap_or(i64::MAX)
            } else {
                truncate(n.as_f64().unwrap_or(0.0))
            }
        }
        Value::String(s) => match numeric_prefix(s) {
            Some(prefix) if is_integral(prefix) => prefix
                .parse::<i64>()
                .unwrap_or_else(|_| truncate(prefix.parse::<f64>().unwrap_or(0.0))),
            Some(prefix) => truncate(prefix.parse::<f64>().unwrap_or(0.0)),
            None => 0,
        },
        _ => 0,
    }
}

/// Float value of a scalar
pub fn to_float(value: &Value) -> f64 {
    match value {
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => numeric_prefix(s)
            .and_then(|prefix| prefix.parse::<f64>().ok())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// String form of a scalar
pub fn to_string(value: &Value) -> String {
    match value {
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => format!("{}", f),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate(f: f64) -> i64 {
    if f.is_finite() {
        f.trunc() as i64
    } else {
        0
    }
}

fn float_value(f: f64) -> Value {
    Number::from_f64(f)
        .or_else(|| Number::from_f64(0.0))
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn is_integral(s: &str) -> bool {
    !s.contains(|c| matches!(c, '.' | 'e' | 'E'))
}

/// Leading numeric prefix after whitespace: sign, digits, fraction, exponent
fn numeric_prefix(s: &str) -> Option<&str> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    Some(&s[..end])
}
