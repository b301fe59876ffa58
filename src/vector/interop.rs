//! Conversion between column vectors and Arrow arrays.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array,
    Int64Array, Int8Array, StringArray, TimestampSecondArray, UInt16Array, UInt32Array,
    UInt64Array, UInt8Array,
};

use crate::error::{EvalError, Result};
use crate::types::ScalarType;

use super::column::{ColumnValues, ColumnVector};

fn with_validity<T: Clone>(values: &[T], valid: impl Fn(usize) -> bool) -> Vec<Option<T>> {
    values
        .iter()
        .enumerate()
        .map(|(row, v)| valid(row).then(|| v.clone()))
        .collect()
}

impl ColumnVector {
    /// Converts to an Arrow array of every row.
    ///
    /// Null and masked rows both become Arrow nulls; the selection is not
    /// applied.
    #[must_use]
    pub fn to_arrow(&self) -> ArrayRef {
        let valid = |row: usize| !self.is_null(row) && !self.is_masked(row);
        match (self.values(), self.scalar_type()) {
            (ColumnValues::Int8(v), _) => Arc::new(Int8Array::from(with_validity(v, valid))),
            (ColumnValues::Int16(v), _) => Arc::new(Int16Array::from(with_validity(v, valid))),
            (ColumnValues::Int32(v), _) => Arc::new(Int32Array::from(with_validity(v, valid))),
            (ColumnValues::Int64(v), ScalarType::Timestamp) => {
                Arc::new(TimestampSecondArray::from(with_validity(v, valid)))
            }
            (ColumnValues::Int64(v), _) => Arc::new(Int64Array::from(with_validity(v, valid))),
            (ColumnValues::UInt8(v), _) => Arc::new(UInt8Array::from(with_validity(v, valid))),
            (ColumnValues::UInt16(v), _) => Arc::new(UInt16Array::from(with_validity(v, valid))),
            (ColumnValues::UInt32(v), _) => Arc::new(UInt32Array::from(with_validity(v, valid))),
            (ColumnValues::UInt64(v), _) => Arc::new(UInt64Array::from(with_validity(v, valid))),
            (ColumnValues::Float32(v), _) => {
                Arc::new(Float32Array::from(with_validity(v, valid)))
            }
            (ColumnValues::Float64(v), _) => {
                Arc::new(Float64Array::from(with_validity(v, valid)))
            }
            (ColumnValues::Bool(v), _) => Arc::new(BooleanArray::from(with_validity(v, valid))),
            (ColumnValues::String(v), _) => {
                let strings: Vec<Option<&str>> = v
                    .iter()
                    .enumerate()
                    .map(|(row, s)| valid(row).then_some(s.as_str()))
                    .collect();
                Arc::new(StringArray::from(strings))
            }
        }
    }

    /// Converts to an Arrow array holding only the active rows.
    ///
    /// If there's no selection, this is the same as [`Self::to_arrow`].
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Arrow`] if the take kernel fails.
    pub fn to_arrow_selected(&self) -> Result<ArrayRef> {
        let array = self.to_arrow();
        match self.selection() {
            Some(selection) => {
                let indices = UInt32Array::from(selection.indices.clone());
                Ok(arrow::compute::take(&array, &indices, None)?)
            }
            None => Ok(array),
        }
    }

    /// Builds a dense vector from an Arrow array.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::TypeMismatch`] for Arrow types without a scalar
    /// counterpart.
    pub fn from_arrow(array: &ArrayRef) -> Result<Self> {
        let ty = ScalarType::from_arrow(array.data_type()).ok_or_else(|| {
            EvalError::TypeMismatch {
                expected: "a supported arrow type".to_string(),
                actual: array.data_type().to_string(),
            }
        })?;

        macro_rules! primitive {
            ($array_ty:ty, $variant:ident) => {{
                let typed = downcast::<$array_ty>(array)?;
                ColumnValues::$variant(typed.values().to_vec())
            }};
        }

        let values = match ty {
            ScalarType::Int8 => primitive!(Int8Array, Int8),
            ScalarType::Int16 => primitive!(Int16Array, Int16),
            ScalarType::Int32 => primitive!(Int32Array, Int32),
            ScalarType::Int64 | ScalarType::Int => primitive!(Int64Array, Int64),
            ScalarType::Timestamp => primitive!(TimestampSecondArray, Int64),
            ScalarType::UInt8 => primitive!(UInt8Array, UInt8),
            ScalarType::UInt16 => primitive!(UInt16Array, UInt16),
            ScalarType::UInt32 => primitive!(UInt32Array, UInt32),
            ScalarType::UInt64 => primitive!(UInt64Array, UInt64),
            ScalarType::Float32 => primitive!(Float32Array, Float32),
            ScalarType::Float64 | ScalarType::Float => primitive!(Float64Array, Float64),
            ScalarType::Bool => {
                let typed = downcast::<BooleanArray>(array)?;
                ColumnValues::Bool((0..typed.len()).map(|i| typed.value(i)).collect())
            }
            ScalarType::String => {
                let typed = downcast::<StringArray>(array)?;
                ColumnValues::String(
                    (0..typed.len())
                        .map(|i| typed.value(i).to_string())
                        .collect(),
                )
            }
        };

        let nulls: Vec<u32> = (0..array.len())
            .filter(|&i| array.is_null(i))
            .map(|i| i as u32)
            .collect();
        ColumnVector::new(ty, values)?.with_nulls(nulls)
    }
}

fn downcast<T: Array + 'static>(array: &ArrayRef) -> Result<&T> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| EvalError::TypeMismatch {
        expected: std::any::type_name::<T>().to_string(),
        actual: array.data_type().to_string(),
    })
}
