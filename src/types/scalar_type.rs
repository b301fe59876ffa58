//! Scalar type catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical scalar types understood by the kernels.
///
/// `Int` and `Float` are the generic integer and float types produced by
/// literals; they share the physical representation of `Int64` and
/// `Float64`. `Timestamp` is stored as Unix-epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Int8,
    Int16,
    Int32,
    Int64,
    Int,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Float,
    Bool,
    Timestamp,
    String,
}

impl ScalarType {
    /// Every scalar type, in id order.
    pub const ALL: [ScalarType; 15] = [
        ScalarType::Int8,
        ScalarType::Int16,
        ScalarType::Int32,
        ScalarType::Int64,
        ScalarType::Int,
        ScalarType::UInt8,
        ScalarType::UInt16,
        ScalarType::UInt32,
        ScalarType::UInt64,
        ScalarType::Float32,
        ScalarType::Float64,
        ScalarType::Float,
        ScalarType::Bool,
        ScalarType::Timestamp,
        ScalarType::String,
    ];

    /// Every numeric type, in id order.
    pub const NUMERIC: [ScalarType; 12] = [
        ScalarType::Int8,
        ScalarType::Int16,
        ScalarType::Int32,
        ScalarType::Int64,
        ScalarType::Int,
        ScalarType::UInt8,
        ScalarType::UInt16,
        ScalarType::UInt32,
        ScalarType::UInt64,
        ScalarType::Float32,
        ScalarType::Float64,
        ScalarType::Float,
    ];

    /// Returns the stable numeric id of the type.
    #[must_use]
    pub fn id(self) -> u8 {
        match self {
            ScalarType::Int8 => 1,
            ScalarType::Int16 => 2,
            ScalarType::Int32 => 3,
            ScalarType::Int64 => 4,
            ScalarType::Int => 5,
            ScalarType::UInt8 => 6,
            ScalarType::UInt16 => 7,
            ScalarType::UInt32 => 8,
            ScalarType::UInt64 => 9,
            ScalarType::Float32 => 10,
            ScalarType::Float64 => 11,
            ScalarType::Float => 12,
            ScalarType::Bool => 13,
            ScalarType::Timestamp => 14,
            ScalarType::String => 15,
        }
    }

    /// Looks a type up by id.
    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.id() == id)
    }

    /// Returns the canonical lowercase name of the type.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Int8 => "int8",
            ScalarType::Int16 => "int16",
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::Int => "int",
            ScalarType::UInt8 => "uint8",
            ScalarType::UInt16 => "uint16",
            ScalarType::UInt32 => "uint32",
            ScalarType::UInt64 => "uint64",
            ScalarType::Float32 => "float32",
            ScalarType::Float64 => "float64",
            ScalarType::Float => "float",
            ScalarType::Bool => "bool",
            ScalarType::Timestamp => "timestamp",
            ScalarType::String => "string",
        }
    }

    /// Looks a type up by its canonical name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// Returns whether this is a signed or unsigned integer type.
    #[must_use]
    pub fn is_integer(self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    /// Returns whether this is a signed integer type.
    #[must_use]
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            ScalarType::Int8
                | ScalarType::Int16
                | ScalarType::Int32
                | ScalarType::Int64
                | ScalarType::Int
        )
    }

    /// Returns whether this is an unsigned integer type.
    #[must_use]
    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            ScalarType::UInt8 | ScalarType::UInt16 | ScalarType::UInt32 | ScalarType::UInt64
        )
    }

    /// Returns whether this is a floating point type.
    #[must_use]
    pub fn is_float(self) -> bool {
        matches!(
            self,
            ScalarType::Float32 | ScalarType::Float64 | ScalarType::Float
        )
    }

    /// Returns whether this type takes part in arithmetic.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Returns the width in bits of the physical representation.
    ///
    /// Returns None for variable-width types.
    #[must_use]
    pub fn bit_width(self) -> Option<u32> {
        match self {
            ScalarType::Bool => Some(1),
            ScalarType::Int8 | ScalarType::UInt8 => Some(8),
            ScalarType::Int16 | ScalarType::UInt16 => Some(16),
            ScalarType::Int32 | ScalarType::UInt32 | ScalarType::Float32 => Some(32),
            ScalarType::Int64
            | ScalarType::Int
            | ScalarType::UInt64
            | ScalarType::Float64
            | ScalarType::Float
            | ScalarType::Timestamp => Some(64),
            ScalarType::String => None,
        }
    }

    /// Returns whether two types share the same physical representation.
    #[must_use]
    pub fn same_physical(self, other: ScalarType) -> bool {
        self.physical_rank() == other.physical_rank()
    }

    fn physical_rank(self) -> u8 {
        match self {
            ScalarType::Int64 | ScalarType::Int | ScalarType::Timestamp => ScalarType::Int64.id(),
            ScalarType::Float64 | ScalarType::Float => ScalarType::Float64.id(),
            other => other.id(),
        }
    }

    /// Converts to an Arrow data type.
    #[must_use]
    pub fn to_arrow(self) -> arrow::datatypes::DataType {
        use arrow::datatypes::{DataType, TimeUnit};
        match self {
            ScalarType::Int8 => DataType::Int8,
            ScalarType::Int16 => DataType::Int16,
            ScalarType::Int32 => DataType::Int32,
            ScalarType::Int64 | ScalarType::Int => DataType::Int64,
            ScalarType::UInt8 => DataType::UInt8,
            ScalarType::UInt16 => DataType::UInt16,
            ScalarType::UInt32 => DataType::UInt32,
            ScalarType::UInt64 => DataType::UInt64,
            ScalarType::Float32 => DataType::Float32,
            ScalarType::Float64 | ScalarType::Float => DataType::Float64,
            ScalarType::Bool => DataType::Boolean,
            ScalarType::Timestamp => DataType::Timestamp(TimeUnit::Second, None),
            ScalarType::String => DataType::Utf8,
        }
    }

    /// Converts from an Arrow data type.
    ///
    /// Arrow has no generic int/float, so those map to the sized 64-bit
    /// types. Returns None for unsupported Arrow types.
    #[must_use]
    pub fn from_arrow(arrow_type: &arrow::datatypes::DataType) -> Option<Self> {
        use arrow::datatypes::{DataType, TimeUnit};
        match arrow_type {
            DataType::Int8 => Some(ScalarType::Int8),
            DataType::Int16 => Some(ScalarType::Int16),
            DataType::Int32 => Some(ScalarType::Int32),
            DataType::Int64 => Some(ScalarType::Int64),
            DataType::UInt8 => Some(ScalarType::UInt8),
            DataType::UInt16 => Some(ScalarType::UInt16),
            DataType::UInt32 => Some(ScalarType::UInt32),
            DataType::UInt64 => Some(ScalarType::UInt64),
            DataType::Float32 => Some(ScalarType::Float32),
            DataType::Float64 => Some(ScalarType::Float64),
            DataType::Boolean => Some(ScalarType::Bool),
            DataType::Timestamp(TimeUnit::Second, None) => Some(ScalarType::Timestamp),
            DataType::Utf8 => Some(ScalarType::String),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the canonical name of a type tag.
#[must_use]
pub fn type_name(tag: ScalarType) -> &'static str {
    tag.name()
}
