//! Scalar values carried by predicates.
//!
//! A predicate compares a document field against one of three scalar kinds:
//! strings (anonymized formulas, chemical systems), integers (element counts)
//! and exact rationals (reduced composition fractions).

use num_rational::BigRational;
use num_traits::ToPrimitive;
use serde::{Serialize, Serializer};
use std::fmt;

/// A value a document field can be compared against.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    /// 64-bit signed integer.
    Int(i64),
    /// Exact rational number.
    Rational(BigRational),
    /// UTF-8 string.
    String(String),
}

impl Value {
    /// Returns true if this is an integer value.
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Returns true if this is a rational value.
    pub fn is_rational(&self) -> bool {
        matches!(self, Value::Rational(_))
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Get as integer if this is an Int value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as rational reference if this is a Rational value.
    pub fn as_rational(&self) -> Option<&BigRational> {
        match self {
            Value::Rational(r) => Some(r),
            _ => None,
        }
    }

    /// Get as string reference if this is a String value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Nearest `f64` to this value, for numeric document fields.
    ///
    /// Equal rationals always map to the same float.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Rational(r) => r.to_f64(),
            Value::String(_) => None,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::Rational(_) => "Rational",
            Value::String(_) => "String",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Rational(r) => write!(f, "{}", r),
            Value::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Rational(r) => match r.to_f64() {
                Some(f) if f.is_finite() => serializer.serialize_f64(f),
                _ => Err(serde::ser::Error::custom(format!(
                    "rational {} has no finite f64 representation",
                    r
                ))),
            },
            Value::String(s) => serializer.serialize_str(s),
        }
    }
}

// Convenient From implementations
impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(n as i64)
    }
}

impl From<BigRational> for Value {
    fn from(r: BigRational) -> Self {
        Value::Rational(r)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}
