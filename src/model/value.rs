//! Loosely typed property value as received from the backend.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A property value in a relationship's property bag.
///
/// Mirrors plain JSON so raw backend payloads decode without a schema:
/// - Scalars: Null, Bool, Int, Float, String
/// - Containers: List, Map
///
/// Variant order matters for untagged decoding: integers are tried before
/// floats so `5` stays `Int(5)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
}

// ============================================================================
// Accessors
// ============================================================================

impl Value {
    /// Attempt to extract as f64. Non-finite floats are rejected.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) if f.is_finite() => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempt to extract as &str
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric reading that also accepts numeric strings (`"2.5"`).
    ///
    /// Returns None for anything that does not parse to a finite number.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            other => other.as_float(),
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
