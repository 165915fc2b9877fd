//! Typed field values.

use super::field::FieldKind;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value of one of the record's primitive field types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i32),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Boolean(_) => FieldKind::Boolean,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::Text(_) => FieldKind::Text,
        }
    }

    /// Parse user input as a value of the given kind.
    ///
    /// Booleans accept `true/false`, `t/f`, `yes/no`, `y/n` and `1/0`,
    /// case-insensitive. Text is taken verbatim.
    pub fn parse(kind: FieldKind, input: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidValue {
            kind: kind.as_str(),
            input: input.to_string(),
        };

        match kind {
            FieldKind::Boolean => parse_bool(input).map(FieldValue::Boolean).ok_or_else(invalid),
            FieldKind::Integer => input
                .trim()
                .parse::<i32>()
                .map(FieldValue::Integer)
                .map_err(|_| invalid()),
            FieldKind::Float => input
                .trim()
                .parse::<f64>()
                .map(FieldValue::Float)
                .map_err(|_| invalid()),
            FieldKind::Text => Ok(FieldValue::Text(input.to_string())),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Integers widen to floats; nothing else converts.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(x) => Some(*x),
            FieldValue::Integer(n) => Some(f64::from(*n)),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

fn parse_bool(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}
