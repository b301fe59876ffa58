//! Typed column vectors.

use std::fmt;
use std::sync::Arc;

use roaring::RoaringBitmap;

use crate::error::{EvalError, Result};
use crate::types::{ScalarType, Value};

use super::bitmap::{self, SharedBitmap};
use super::selection::{ActiveRows, SelectionVector};

/// Physical storage of a column, one variant per native type.
///
/// The logical [`ScalarType`] lives on the [`ColumnVector`]; several
/// logical types share a variant (`int`, `int64` and `timestamp` are all
/// `Int64`).
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    UInt8(Vec<u8>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Bool(Vec<bool>),
    String(Vec<String>),
}

impl ColumnValues {
    /// Creates `len` default values for the physical type of `ty`.
    #[must_use]
    pub fn zeroed(ty: ScalarType, len: usize) -> Self {
        match ty {
            ScalarType::Int8 => ColumnValues::Int8(vec![0; len]),
            ScalarType::Int16 => ColumnValues::Int16(vec![0; len]),
            ScalarType::Int32 => ColumnValues::Int32(vec![0; len]),
            ScalarType::Int64 | ScalarType::Int | ScalarType::Timestamp => {
                ColumnValues::Int64(vec![0; len])
            }
            ScalarType::UInt8 => ColumnValues::UInt8(vec![0; len]),
            ScalarType::UInt16 => ColumnValues::UInt16(vec![0; len]),
            ScalarType::UInt32 => ColumnValues::UInt32(vec![0; len]),
            ScalarType::UInt64 => ColumnValues::UInt64(vec![0; len]),
            ScalarType::Float32 => ColumnValues::Float32(vec![0.0; len]),
            ScalarType::Float64 | ScalarType::Float => ColumnValues::Float64(vec![0.0; len]),
            ScalarType::Bool => ColumnValues::Bool(vec![false; len]),
            ScalarType::String => ColumnValues::String(vec![String::new(); len]),
        }
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Int8(v) => v.len(),
            ColumnValues::Int16(v) => v.len(),
            ColumnValues::Int32(v) => v.len(),
            ColumnValues::Int64(v) => v.len(),
            ColumnValues::UInt8(v) => v.len(),
            ColumnValues::UInt16(v) => v.len(),
            ColumnValues::UInt32(v) => v.len(),
            ColumnValues::UInt64(v) => v.len(),
            ColumnValues::Float32(v) => v.len(),
            ColumnValues::Float64(v) => v.len(),
            ColumnValues::Bool(v) => v.len(),
            ColumnValues::String(v) => v.len(),
        }
    }

    /// Returns true if there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether this storage can back a column of type `ty`.
    #[must_use]
    pub fn matches(&self, ty: ScalarType) -> bool {
        matches!(
            (self, ty),
            (ColumnValues::Int8(_), ScalarType::Int8)
                | (ColumnValues::Int16(_), ScalarType::Int16)
                | (ColumnValues::Int32(_), ScalarType::Int32)
                | (
                    ColumnValues::Int64(_),
                    ScalarType::Int64 | ScalarType::Int | ScalarType::Timestamp
                )
                | (ColumnValues::UInt8(_), ScalarType::UInt8)
                | (ColumnValues::UInt16(_), ScalarType::UInt16)
                | (ColumnValues::UInt32(_), ScalarType::UInt32)
                | (ColumnValues::UInt64(_), ScalarType::UInt64)
                | (ColumnValues::Float32(_), ScalarType::Float32)
                | (
                    ColumnValues::Float64(_),
                    ScalarType::Float64 | ScalarType::Float
                )
                | (ColumnValues::Bool(_), ScalarType::Bool)
                | (ColumnValues::String(_), ScalarType::String)
        )
    }

    fn variant_name(&self) -> &'static str {
        match self {
            ColumnValues::Int8(_) => "int8",
            ColumnValues::Int16(_) => "int16",
            ColumnValues::Int32(_) => "int32",
            ColumnValues::Int64(_) => "int64",
            ColumnValues::UInt8(_) => "uint8",
            ColumnValues::UInt16(_) => "uint16",
            ColumnValues::UInt32(_) => "uint32",
            ColumnValues::UInt64(_) => "uint64",
            ColumnValues::Float32(_) => "float32",
            ColumnValues::Float64(_) => "float64",
            ColumnValues::Bool(_) => "bool",
            ColumnValues::String(_) => "string",
        }
    }
}

/// Native element type of a [`ColumnValues`] variant.
pub trait Native: Clone + Default + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Borrows the values if `column` holds this native type.
    fn slice(column: &ColumnValues) -> Option<&[Self]>;

    /// Wraps owned values in the matching variant.
    fn into_values(values: Vec<Self>) -> ColumnValues;
}

macro_rules! impl_native {
    ($($native:ty => $variant:ident),* $(,)?) => {
        $(
            impl Native for $native {
                fn slice(column: &ColumnValues) -> Option<&[Self]> {
                    match column {
                        ColumnValues::$variant(v) => Some(v.as_slice()),
                        _ => None,
                    }
                }

                fn into_values(values: Vec<Self>) -> ColumnValues {
                    ColumnValues::$variant(values)
                }
            }
        )*
    };
}

impl_native! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    bool => Bool,
    String => String,
}

/// One batch of values of a single scalar type.
///
/// Storage, bitmaps and selection are reference counted: cloning a vector
/// never copies data, and kernels build outputs that share whatever they
/// take unchanged from their inputs.
#[derive(Debug, Clone)]
pub struct ColumnVector {
    ty: ScalarType,
    values: Arc<ColumnValues>,
    nulls: Option<SharedBitmap>,
    mask: Option<SharedBitmap>,
    selection: Option<Arc<SelectionVector>>,
}

impl ColumnVector {
    /// Creates a dense vector with no nulls and no mask.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::TypeMismatch`] if `values` cannot back `ty`.
    pub fn new(ty: ScalarType, values: ColumnValues) -> Result<Self> {
        if !values.matches(ty) {
            return Err(EvalError::TypeMismatch {
                expected: ty.name().to_string(),
                actual: values.variant_name().to_string(),
            });
        }
        Ok(ColumnVector {
            ty,
            values: Arc::new(values),
            nulls: None,
            mask: None,
            selection: None,
        })
    }

    /// Creates a vector of type `ty` from native values.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::TypeMismatch`] if `T` is not the physical type
    /// of `ty`.
    pub fn from_native<T: Native>(ty: ScalarType, values: Vec<T>) -> Result<Self> {
        Self::new(ty, T::into_values(values))
    }

    /// Creates an empty vector of type `ty`.
    ///
    /// Useful as the target-type operand of a cast.
    #[must_use]
    pub fn empty(ty: ScalarType) -> Self {
        ColumnVector {
            ty,
            values: Arc::new(ColumnValues::zeroed(ty, 0)),
            nulls: None,
            mask: None,
            selection: None,
        }
    }

    /// Creates a generic `int` vector.
    #[must_use]
    pub fn int(values: Vec<i64>) -> Self {
        Self::typed_unchecked(ScalarType::Int, ColumnValues::Int64(values))
    }

    /// Creates a generic `float` vector.
    #[must_use]
    pub fn float(values: Vec<f64>) -> Self {
        Self::typed_unchecked(ScalarType::Float, ColumnValues::Float64(values))
    }

    /// Creates a `bool` vector.
    #[must_use]
    pub fn boolean(values: Vec<bool>) -> Self {
        Self::typed_unchecked(ScalarType::Bool, ColumnValues::Bool(values))
    }

    /// Creates a `timestamp` vector from epoch seconds.
    #[must_use]
    pub fn timestamp(values: Vec<i64>) -> Self {
        Self::typed_unchecked(ScalarType::Timestamp, ColumnValues::Int64(values))
    }

    /// Creates a `string` vector.
    #[must_use]
    pub fn string<S: Into<String>>(values: Vec<S>) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        Self::typed_unchecked(ScalarType::String, ColumnValues::String(values))
    }

    fn typed_unchecked(ty: ScalarType, values: ColumnValues) -> Self {
        debug_assert!(values.matches(ty));
        ColumnVector {
            ty,
            values: Arc::new(values),
            nulls: None,
            mask: None,
            selection: None,
        }
    }

    /// Assembles a kernel output from its parts.
    pub(crate) fn from_parts(
        ty: ScalarType,
        values: ColumnValues,
        nulls: Option<SharedBitmap>,
        mask: Option<SharedBitmap>,
        selection: Option<Arc<SelectionVector>>,
    ) -> Result<Self> {
        let mut vector = Self::new(ty, values)?;
        vector.nulls = nulls;
        vector.mask = mask;
        vector.selection = selection;
        Ok(vector)
    }

    /// Returns this vector with the same storage under another type tag.
    pub(crate) fn retag(&self, ty: ScalarType) -> Result<Self> {
        if !self.values.matches(ty) {
            return Err(EvalError::type_mismatch(ty, self.ty));
        }
        let mut vector = self.clone();
        vector.ty = ty;
        Ok(vector)
    }

    /// Marks the given rows as NULL.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::InvalidOperand`] if a row is out of range.
    pub fn with_nulls<I: IntoIterator<Item = u32>>(mut self, rows: I) -> Result<Self> {
        self.nulls = self.checked_bitmap(bitmap::from_rows(rows), "null")?;
        Ok(self)
    }

    /// Masks the given rows out of computation.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::InvalidOperand`] if a row is out of range.
    pub fn with_mask<I: IntoIterator<Item = u32>>(mut self, rows: I) -> Result<Self> {
        self.mask = self.checked_bitmap(bitmap::from_rows(rows), "mask")?;
        Ok(self)
    }

    /// Restricts computation to the given rows.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::InvalidOperand`] if a row is out of range, or
    /// if the rows are not strictly ascending.
    pub fn with_selection(mut self, selection: SelectionVector) -> Result<Self> {
        if let Some(row) = selection.out_of_bounds(self.len()) {
            return Err(EvalError::InvalidOperand(format!(
                "selection row {row} out of range for {} rows",
                self.len()
            )));
        }
        if let Some(row) = selection.out_of_order() {
            return Err(EvalError::InvalidOperand(format!(
                "selection row {row} is not in ascending order"
            )));
        }
        self.selection = (!selection.is_empty()).then(|| Arc::new(selection));
        Ok(self)
    }

    fn checked_bitmap(&self, bitmap: RoaringBitmap, kind: &str) -> Result<Option<SharedBitmap>> {
        if let Some(row) = bitmap::out_of_bounds(&bitmap, self.len()) {
            return Err(EvalError::InvalidOperand(format!(
                "{kind} row {row} out of range for {} rows",
                self.len()
            )));
        }
        Ok((!bitmap.is_empty()).then(|| Arc::new(bitmap)))
    }

    /// Returns the scalar type of the vector.
    #[must_use]
    pub fn scalar_type(&self) -> ScalarType {
        self.ty
    }

    /// Returns the physical values.
    #[must_use]
    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    /// Borrows the values as a native slice.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::TypeMismatch`] if `T` is not the physical type.
    pub fn typed<T: Native>(&self) -> Result<&[T]> {
        T::slice(&self.values).ok_or_else(|| EvalError::TypeMismatch {
            expected: std::any::type_name::<T>().to_string(),
            actual: self.ty.name().to_string(),
        })
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the vector has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the null bitmap, if any row is null.
    #[must_use]
    pub fn nulls(&self) -> Option<&SharedBitmap> {
        self.nulls.as_ref()
    }

    /// Returns the mask bitmap, if any row is masked.
    #[must_use]
    pub fn mask(&self) -> Option<&SharedBitmap> {
        self.mask.as_ref()
    }

    /// Returns the selection, if the vector is sparse.
    #[must_use]
    pub fn selection(&self) -> Option<&Arc<SelectionVector>> {
        self.selection.as_ref()
    }

    /// Returns true if the row is NULL.
    #[must_use]
    pub fn is_null(&self, row: usize) -> bool {
        bitmap::contains(self.nulls.as_ref(), row)
    }

    /// Returns true if the row is masked.
    #[must_use]
    pub fn is_masked(&self, row: usize) -> bool {
        bitmap::contains(self.mask.as_ref(), row)
    }

    /// Iterates the rows kernels read and write.
    #[must_use]
    pub fn active_rows(&self) -> ActiveRows<'_> {
        ActiveRows::new(self.len(), self.selection.as_deref())
    }

    /// Returns true if the storage is shared with `other`.
    #[must_use]
    pub fn shares_values(&self, other: &ColumnVector) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }

    /// Reads one row as a [`Value`]. Null rows read as [`Value::Null`].
    ///
    /// Returns None if `row` is out of range.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<Value> {
        if row >= self.len() {
            return None;
        }
        if self.is_null(row) {
            return Some(Value::Null);
        }
        let value = match (self.values.as_ref(), self.ty) {
            (ColumnValues::Int8(v), _) => Value::Int8(v[row]),
            (ColumnValues::Int16(v), _) => Value::Int16(v[row]),
            (ColumnValues::Int32(v), _) => Value::Int32(v[row]),
            (ColumnValues::Int64(v), ScalarType::Timestamp) => Value::Timestamp(v[row]),
            (ColumnValues::Int64(v), _) => Value::Int64(v[row]),
            (ColumnValues::UInt8(v), _) => Value::UInt8(v[row]),
            (ColumnValues::UInt16(v), _) => Value::UInt16(v[row]),
            (ColumnValues::UInt32(v), _) => Value::UInt32(v[row]),
            (ColumnValues::UInt64(v), _) => Value::UInt64(v[row]),
            (ColumnValues::Float32(v), _) => Value::Float32(v[row]),
            (ColumnValues::Float64(v), _) => Value::Float64(v[row]),
            (ColumnValues::Bool(v), _) => Value::Bool(v[row]),
            (ColumnValues::String(v), _) => Value::String(v[row].clone()),
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_physical_type() {
        assert!(ColumnVector::new(ScalarType::Int, ColumnValues::Int64(vec![1])).is_ok());
        assert!(ColumnVector::new(ScalarType::Timestamp, ColumnValues::Int64(vec![1])).is_ok());
        let err = ColumnVector::new(ScalarType::Int8, ColumnValues::Int64(vec![1])).unwrap_err();
        assert!(err.to_string().contains("int8"));
    }

    #[test]
    fn test_typed_access() {
        let v = ColumnVector::int(vec![1, 2, 3]);
        assert_eq!(v.typed::<i64>().unwrap(), &[1, 2, 3]);
        assert!(v.typed::<i32>().is_err());
    }

    #[test]
    fn test_nulls_and_mask() {
        let v = ColumnVector::int(vec![1, 2, 3])
            .with_nulls([1])
            .unwrap()
            .with_mask([2])
            .unwrap();
        assert!(v.is_null(1));
        assert!(!v.is_null(2));
        assert!(v.is_masked(2));
        assert_eq!(v.get(1), Some(Value::Null));
        assert_eq!(v.get(2), Some(Value::Int64(3)));
        assert_eq!(v.get(3), None);
    }

    #[test]
    fn test_empty_bitmaps_are_dropped() {
        let v = ColumnVector::int(vec![1]).with_nulls([]).unwrap();
        assert!(v.nulls().is_none());
    }

    #[test]
    fn test_bitmap_bounds_are_checked() {
        assert!(ColumnVector::int(vec![1, 2]).with_nulls([2]).is_err());
        assert!(ColumnVector::int(vec![1, 2]).with_mask([5]).is_err());
        assert!(ColumnVector::int(vec![1, 2])
            .with_selection(SelectionVector::new(vec![0, 2]))
            .is_err());
    }

    #[test]
    fn test_active_rows() {
        let dense = ColumnVector::int(vec![0; 3]);
        assert_eq!(dense.active_rows().collect::<Vec<_>>(), vec![0, 1, 2]);

        let sparse = dense
            .with_selection(SelectionVector::new(vec![0, 2]))
            .unwrap();
        assert_eq!(sparse.active_rows().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_selection_must_ascend() {
        let v = ColumnVector::int(vec![0; 4]);
        assert!(matches!(
            v.clone().with_selection(SelectionVector::new(vec![2, 0])),
            Err(EvalError::InvalidOperand(_))
        ));
        assert!(matches!(
            v.with_selection(SelectionVector::new(vec![1, 1, 3])),
            Err(EvalError::InvalidOperand(_))
        ));
    }

    #[test]
    fn test_clone_shares_storage() {
        let v = ColumnVector::string(vec!["a", "b"]);
        let w = v.clone();
        assert!(v.shares_values(&w));
    }

    #[test]
    fn test_retag() {
        let v = ColumnVector::int(vec![7]);
        let ts = v.retag(ScalarType::Timestamp).unwrap();
        assert_eq!(ts.get(0), Some(Value::Timestamp(7)));
        assert!(ts.shares_values(&v));
        assert!(v.retag(ScalarType::Float).is_err());
    }

    #[test]
    fn test_zeroed_matches_every_type() {
        for ty in ScalarType::ALL {
            let values = ColumnValues::zeroed(ty, 2);
            assert!(values.matches(ty));
            assert_eq!(values.len(), 2);
        }
    }
}
