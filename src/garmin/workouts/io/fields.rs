//! Field access over loosely typed JSON trees. Every failure names the dotted
//! path of the field and carries the object it was looked up in.

use serde_json::{Map, Value};

use crate::garmin::workouts::error::{Result, WorkoutError};

pub(crate) type Object = Map<String, Value>;

/// Path of the document root.
pub(crate) const ROOT: &str = "$";

pub(crate) fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

pub(crate) fn index_path(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

pub(crate) fn missing(object: &Object, key: &str, path: &str) -> WorkoutError {
    WorkoutError::MissingField {
        field: key.to_string(),
        path: child_path(path, key),
        node: Value::Object(object.clone()),
    }
}

pub(crate) fn invalid(object: &Object, path: &str, expected: impl Into<String>) -> WorkoutError {
    WorkoutError::InvalidField {
        path: path.to_string(),
        expected: expected.into(),
        node: Value::Object(object.clone()),
    }
}

pub(crate) fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Object> {
    value.as_object().ok_or_else(|| WorkoutError::InvalidField {
        path: path.to_string(),
        expected: "an object".into(),
        node: value.clone(),
    })
}

/// Looks up `key`, treating an explicit `null` like an absent field.
pub(crate) fn optional<'a>(object: &'a Object, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

pub(crate) fn require<'a>(object: &'a Object, key: &str, path: &str) -> Result<&'a Value> {
    optional(object, key).ok_or_else(|| missing(object, key, path))
}

pub(crate) fn require_object<'a>(object: &'a Object, key: &str, path: &str) -> Result<&'a Object> {
    match require(object, key, path)? {
        Value::Object(inner) => Ok(inner),
        _ => Err(invalid(object, &child_path(path, key), "an object")),
    }
}

pub(crate) fn require_array<'a>(object: &'a Object, key: &str, path: &str) -> Result<&'a [Value]> {
    match require(object, key, path)? {
        Value::Array(items) => Ok(items),
        _ => Err(invalid(object, &child_path(path, key), "an array")),
    }
}

pub(crate) fn require_str<'a>(object: &'a Object, key: &str, path: &str) -> Result<&'a str> {
    require(object, key, path)?
        .as_str()
        .ok_or_else(|| invalid(object, &child_path(path, key), "a string"))
}

/// Reads a finite number. Numeric strings are accepted since older payloads
/// carry cadence and heart-rate values as strings.
pub(crate) fn require_f64(object: &Object, key: &str, path: &str) -> Result<f64> {
    let value = require(object, key, path)?;
    number(value).ok_or_else(|| invalid(object, &child_path(path, key), "a number"))
}

/// Reads a non-negative whole number, numeric strings included.
pub(crate) fn require_u64(object: &Object, key: &str, path: &str) -> Result<u64> {
    let value = require(object, key, path)?;
    whole_number(value).ok_or_else(|| invalid(object, &child_path(path, key), "a whole number"))
}

pub(crate) fn optional_u64(object: &Object, key: &str, path: &str) -> Result<Option<u64>> {
    match optional(object, key) {
        Some(value) => whole_number(value)
            .map(Some)
            .ok_or_else(|| invalid(object, &child_path(path, key), "a whole number")),
        None => Ok(None),
    }
}

fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|number| number.is_finite())
}

fn whole_number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|float| *float >= 0.0 && float.fract() == 0.0)
                .map(|float| float as u64)
        }),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// Wraps a float for emission; non-finite values become `null`.
pub(crate) fn float(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Wraps a float for hand-edited documents: whole values become integers.
pub(crate) fn compact_number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        float(value)
    }
}
