//! Lenient readers over parsed YAML values.
//!
//! Profile authors write numbers as strings, booleans as "yes"/"on", and so on.
//! These helpers give every validator the same reading of a loosely typed value.

use serde_yaml::{Mapping, Value};

/// Look up a key in a mapping.
pub fn field<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.get(key)
}

/// Render a scalar as text; `None` for null, sequences, and mappings.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Trimmed, non-empty scalar text of a field.
pub fn text_field(map: &Mapping, key: &str) -> Option<String> {
    field(map, key)
        .and_then(scalar_text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// String-only field, untrimmed. Non-string values are ignored.
pub fn string_field(map: &Mapping, key: &str) -> Option<String> {
    match field(map, key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Loose truthiness: null, false, zero, NaN, and "" are false; everything else is true.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(_) | Value::Mapping(_) => true,
        Value::Tagged(tagged) => truthy(&tagged.value),
    }
}

/// Boolean flag reader used for compatibility flags.
///
/// Recognizes `1/true/yes/on` and `0/false/no/off` (trimmed, case-insensitive);
/// anything else falls back to `truthy`.
pub fn parse_flag(value: &Value) -> bool {
    if let Value::String(s) = value {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => return true,
            "0" | "false" | "no" | "off" => return false,
            _ => {}
        }
    }
    truthy(value)
}

/// Whether a field carries a usable value (present, non-null, and not blank text).
pub fn is_populated(map: &Mapping, key: &str) -> bool {
    match field(map, key) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// A numeric setting as the author wrote it
#[derive(Debug, Clone, PartialEq)]
pub enum NumericInput {
    Number(f64),
    Text(String),
    /// Booleans, lists, and mappings: present but never numeric
    Other,
}

impl NumericInput {
    /// `None` when the value is absent: null or blank text.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => Some(NumericInput::Number(n.as_f64().unwrap_or(f64::NAN))),
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(NumericInput::Text(s.trim().to_string())),
            Value::Tagged(tagged) => Self::from_value(&tagged.value),
            Value::Bool(_) | Value::Sequence(_) | Value::Mapping(_) => Some(NumericInput::Other),
        }
    }

    pub fn from_field(map: &Mapping, key: &str) -> Option<Self> {
        field(map, key).and_then(Self::from_value)
    }

    /// Finite numeric reading, if any.
    pub fn as_finite(&self) -> Option<f64> {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(s) => s.parse::<f64>().ok()?,
            NumericInput::Other => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Integral reading, if the value is a finite whole number.
    pub fn as_integer(&self) -> Option<i64> {
        self.as_finite()
            .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
            .map(|v| v as i64)
    }

    pub fn is_positive(&self) -> bool {
        self.as_finite().map(|v| v > 0.0).unwrap_or(false)
    }

    /// Within the half-open unit interval `(0, 1]`.
    pub fn is_unit_fraction(&self) -> bool {
        self.as_finite().map(|v| v > 0.0 && v <= 1.0).unwrap_or(false)
    }
}
