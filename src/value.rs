//! Scalar cell values

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single dataset cell
///
/// Numbers keep their JSON representation, so integers beyond 2^53 and the
/// integer/float distinction survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Value {
    /// Convert a JSON scalar; arrays and objects are rejected
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Null => Ok(Self::Null),
            serde_json::Value::Bool(b) => Ok(Self::Bool(*b)),
            serde_json::Value::Number(n) => Ok(Self::Number(n.clone())),
            serde_json::Value::String(s) => Ok(Self::Text(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => Err(
                AnalysisError::Validation(format!("cell value must be a scalar, got {json}")),
            ),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether the value is string-like
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Best-effort numeric coercion: numbers as-is, strings that parse as a
    /// finite number after trimming. Booleans and nulls never coerce.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64().filter(|n| n.is_finite()),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Type of a non-null value
    #[must_use]
    pub const fn column_type(&self) -> Option<ColumnType> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ColumnType::Boolean),
            Self::Number(_) => Some(ColumnType::Numeric),
            Self::Text(_) => Some(ColumnType::String),
        }
    }

    /// Hashable identity used for grouping and uniqueness
    #[must_use]
    pub fn key(&self) -> ValueKey {
        match self {
            Self::Null => ValueKey::Null,
            Self::Bool(b) => ValueKey::Bool(*b),
            Self::Number(n) => number_key(n),
            Self::Text(s) => ValueKey::Text(s.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            // Floats print without a trailing ".0"
            Self::Number(n) if n.is_f64() => match n.as_f64() {
                Some(x) => write!(f, "{x}"),
                None => write!(f, "{n}"),
            },
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Integral numbers share a key whatever their representation, so `1` and
/// `1.0` group together while `2^53 + 1` stays distinct from `2^53`.
#[allow(clippy::cast_possible_truncation)]
fn number_key(n: &serde_json::Number) -> ValueKey {
    if let Some(i) = n.as_i64() {
        return ValueKey::Integer(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return ValueKey::Integer(i128::from(u));
    }
    let x = n.as_f64().unwrap_or(f64::NAN);
    if x.fract() == 0.0 && x.abs() < 1e38 {
        ValueKey::Integer(x as i128)
    } else {
        // -0.0 is integral above, so only non-integral floats reach here
        ValueKey::Float(x.to_bits())
    }
}

/// Non-finite floats have no JSON form and become null
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or(Self::Null, Self::Number)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n).into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Hashable form of a [`Value`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Null,
    Bool(bool),
    Integer(i128),
    Float(u64),
    Text(String),
}

/// Inferred type of a dataset column
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Boolean,
    String,
    /// Every value in the column is missing
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Value::from(42).as_number(), Some(42.0));
        assert_eq!(Value::from(" 3.5 ").as_number(), Some(3.5));
        assert_eq!(Value::from("N/A").as_number(), None);
        assert_eq!(Value::from("nan").as_number(), None);
        assert_eq!(Value::from("inf").as_number(), None);
        assert_eq!(Value::from(true).as_number(), None);
        assert_eq!(Value::Null.as_number(), None);
    }

    #[test]
    fn test_key_merges_signed_zero() {
        assert_eq!(Value::from(-0.0).key(), Value::from(0.0).key());
        assert_eq!(Value::from(1).key(), Value::from(1.0).key());
        assert_ne!(Value::from(1).key(), Value::from("1").key());
    }

    #[test]
    fn test_large_integers_stay_exact() {
        let big = Value::from_json(&serde_json::json!(9_007_199_254_740_993_u64)).unwrap();
        assert_eq!(big.to_string(), "9007199254740993");
        assert_ne!(big.key(), Value::from(9_007_199_254_740_992_u64).key());
        assert_eq!(serde_json::to_string(&big).unwrap(), "9007199254740993");
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(44000.0).to_string(), "44000");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from("East").to_string(), "East");
    }

    #[test]
    fn test_from_json_rejects_nested() {
        assert!(Value::from_json(&serde_json::json!([1, 2])).is_err());
        assert_eq!(
            Value::from_json(&serde_json::json!(5)).unwrap(),
            Value::from(5)
        );
        assert_eq!(Value::from(f64::NAN), Value::Null);
    }
}
