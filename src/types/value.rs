//! Single scalar cell.

use std::fmt;

use crate::types::ScalarType;

/// One value read out of a column vector.
///
/// The generic `int` and `float` types surface as `Int64` and `Float64`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    /// Seconds since the Unix epoch.
    Timestamp(i64),
    String(String),
    Null,
}

impl Value {
    /// Returns true if this value is null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the closest scalar type of this value, or None for Null.
    #[must_use]
    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self {
            Value::Int8(_) => Some(ScalarType::Int8),
            Value::Int16(_) => Some(ScalarType::Int16),
            Value::Int32(_) => Some(ScalarType::Int32),
            Value::Int64(_) => Some(ScalarType::Int64),
            Value::UInt8(_) => Some(ScalarType::UInt8),
            Value::UInt16(_) => Some(ScalarType::UInt16),
            Value::UInt32(_) => Some(ScalarType::UInt32),
            Value::UInt64(_) => Some(ScalarType::UInt64),
            Value::Float32(_) => Some(ScalarType::Float32),
            Value::Float64(_) => Some(ScalarType::Float64),
            Value::Bool(_) => Some(ScalarType::Bool),
            Value::Timestamp(_) => Some(ScalarType::Timestamp),
            Value::String(_) => Some(ScalarType::String),
            Value::Null => None,
        }
    }

    /// Attempts to extract a signed integer, widening narrower types.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(v) => Some(i64::from(*v)),
            Value::Int16(v) => Some(i64::from(*v)),
            Value::Int32(v) => Some(i64::from(*v)),
            Value::Int64(v) | Value::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to extract an unsigned integer, widening narrower types.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt8(v) => Some(u64::from(*v)),
            Value::UInt16(v) => Some(u64::from(*v)),
            Value::UInt32(v) => Some(u64::from(*v)),
            Value::UInt64(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to extract a float, widening `Float32`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(v) => Some(f64::from(*v)),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to extract a bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int8(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) | Value::Timestamp(v) => write!(f, "{v}"),
            Value::UInt8(v) => write!(f, "{v}"),
            Value::UInt16(v) => write!(f, "{v}"),
            Value::UInt32(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Null => f.write_str("NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Null.scalar_type(), None);
        assert_eq!(Value::Null.as_i64(), None);
        assert_eq!(Value::Null.to_string(), "NULL");
    }

    #[test]
    fn test_widening_accessors() {
        assert_eq!(Value::Int8(-3).as_i64(), Some(-3));
        assert_eq!(Value::UInt16(7).as_u64(), Some(7));
        assert_eq!(Value::Float32(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::UInt16(7).as_i64(), None);
    }
}
