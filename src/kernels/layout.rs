//! Output layout shared by every kernel.
//!
//! A [`Layout`] fixes the output length, the null and mask bitmaps and the
//! selection before any value is computed, so each kernel only supplies
//! the per-row function.

use std::sync::Arc;

use crate::error::{EvalError, Result};
use crate::types::ScalarType;
use crate::vector::bitmap::{self, SharedBitmap};
use crate::vector::{ActiveRows, ColumnVector, Native, SelectionVector};

/// Read access to one operand, broadcasting length-1 constants.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Operand<'a, T> {
    values: &'a [T],
    constant: bool,
}

impl<'a, T> Operand<'a, T> {
    #[inline]
    pub(crate) fn at(&self, row: usize) -> &'a T {
        if self.constant {
            &self.values[0]
        } else {
            &self.values[row]
        }
    }
}

/// Length, bitmaps and selection of a kernel output.
#[derive(Debug)]
pub(crate) struct Layout {
    len: usize,
    constant: Vec<bool>,
    operand_nulls: Vec<Option<SharedBitmap>>,
    operand_masks: Vec<Option<SharedBitmap>>,
    nulls: Option<SharedBitmap>,
    mask: Option<SharedBitmap>,
    selection: Option<Arc<SelectionVector>>,
}

impl Layout {
    /// Layout of a single-operand kernel: the output shares everything.
    pub(crate) fn unary(input: &ColumnVector) -> Self {
        Layout {
            len: input.len(),
            constant: vec![false],
            operand_nulls: vec![input.nulls().cloned()],
            operand_masks: vec![input.mask().cloned()],
            nulls: input.nulls().cloned(),
            mask: input.mask().cloned(),
            selection: input.selection().cloned(),
        }
    }

    /// Layout of a multi-operand kernel.
    ///
    /// Operands must all have the same length, except that a length-1
    /// operand broadcasts as a constant. Nulls and masks are unioned and
    /// the selection is taken from the first non-constant sparse operand.
    pub(crate) fn of(operands: &[&ColumnVector]) -> Result<Self> {
        let len = operands
            .iter()
            .map(|v| v.len())
            .find(|&len| len != 1)
            .unwrap_or(if operands.is_empty() { 0 } else { 1 });

        let mut constant = Vec::with_capacity(operands.len());
        let mut operand_nulls = Vec::with_capacity(operands.len());
        let mut operand_masks = Vec::with_capacity(operands.len());
        let mut selection = None;
        for (pos, v) in operands.iter().enumerate() {
            if v.len() != len && v.len() != 1 {
                return Err(EvalError::InvalidOperand(format!(
                    "operand {pos} has {} rows, expected {len}",
                    v.len()
                )));
            }
            let is_constant = v.len() == 1 && len != 1;
            if is_constant {
                operand_nulls.push(bitmap::broadcast(v.nulls(), len));
                operand_masks.push(bitmap::broadcast(v.mask(), len));
            } else {
                operand_nulls.push(v.nulls().cloned());
                operand_masks.push(v.mask().cloned());
                if selection.is_none() {
                    selection = v.selection().cloned();
                }
            }
            constant.push(is_constant);
        }

        let nulls = bitmap::union_all(operand_nulls.iter().map(Option::as_ref));
        let mask = bitmap::union_all(operand_masks.iter().map(Option::as_ref));
        Ok(Layout {
            len,
            constant,
            operand_nulls,
            operand_masks,
            nulls,
            mask,
            selection,
        })
    }

    /// Binds operand `pos` for typed, broadcast-aware reads.
    pub(crate) fn operand<'a, T: Native>(
        &self,
        pos: usize,
        vector: &'a ColumnVector,
    ) -> Result<Operand<'a, T>> {
        Ok(Operand {
            values: vector.typed::<T>()?,
            constant: self.constant.get(pos).copied().unwrap_or(false),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn rows(&self) -> ActiveRows<'_> {
        ActiveRows::new(self.len, self.selection.as_deref())
    }

    /// A row is skipped when the output marks it null or masked.
    #[inline]
    pub(crate) fn is_skipped(&self, row: usize) -> bool {
        bitmap::contains(self.nulls.as_ref(), row) || bitmap::contains(self.mask.as_ref(), row)
    }

    /// Returns true if operand `pos` is null or masked at `row`.
    #[inline]
    pub(crate) fn operand_skipped(&self, pos: usize, row: usize) -> bool {
        bitmap::contains(self.operand_nulls[pos].as_ref(), row)
            || bitmap::contains(self.operand_masks[pos].as_ref(), row)
    }

    /// Replaces the unioned bitmaps with their intersections: a row stays
    /// null (or masked) only where every operand is.
    pub(crate) fn intersect_bitmaps(mut self) -> Self {
        self.nulls = bitmap::intersect_all(self.operand_nulls.iter().map(Option::as_ref));
        self.mask = bitmap::intersect_all(self.operand_masks.iter().map(Option::as_ref));
        self
    }

    /// Marks extra rows null in the output.
    pub(crate) fn add_nulls(&mut self, rows: &[u32]) {
        if rows.is_empty() {
            return;
        }
        let mut nulls = self.nulls.as_deref().cloned().unwrap_or_default();
        nulls.extend(rows.iter().copied());
        self.nulls = Some(Arc::new(nulls));
    }

    /// Packs computed values into the output vector.
    pub(crate) fn finish<O: Native>(self, ret: ScalarType, values: Vec<O>) -> Result<ColumnVector> {
        ColumnVector::from_parts(
            ret,
            O::into_values(values),
            self.nulls,
            self.mask,
            self.selection,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unary_layout_shares_input_metadata() {
        let input = ColumnVector::int(vec![1, 2, 3]).with_nulls([1]).unwrap();
        let layout = Layout::unary(&input);
        assert_eq!(layout.len(), 3);
        assert!(layout.is_skipped(1));
        assert!(!layout.is_skipped(0));
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let a = ColumnVector::int(vec![1, 2, 3]);
        let b = ColumnVector::int(vec![1, 2]);
        assert!(matches!(
            Layout::of(&[&a, &b]),
            Err(EvalError::InvalidOperand(_))
        ));
    }

    #[test]
    fn test_constant_broadcast() {
        let a = ColumnVector::int(vec![1, 2, 3]);
        let b = ColumnVector::int(vec![10]);
        let layout = Layout::of(&[&a, &b]).unwrap();
        assert_eq!(layout.len(), 3);
        let op = layout.operand::<i64>(1, &b).unwrap();
        assert_eq!(*op.at(2), 10);
    }

    #[test]
    fn test_null_constant_nulls_every_row() {
        let a = ColumnVector::int(vec![1, 2, 3]);
        let b = ColumnVector::int(vec![0]).with_nulls([0]).unwrap();
        let layout = Layout::of(&[&a, &b]).unwrap();
        assert!((0..3).all(|row| layout.is_skipped(row)));
    }

    #[test]
    fn test_add_nulls_extends_output_bitmap() {
        let a = ColumnVector::int(vec![1, 2, 3]).with_nulls([0]).unwrap();
        let mut layout = Layout::unary(&a);
        layout.add_nulls(&[2]);
        assert!(layout.is_skipped(0));
        assert!(!layout.is_skipped(1));
        assert!(layout.is_skipped(2));
        // the input bitmap is shared, not modified
        assert!(!a.is_null(2));
    }

    #[test]
    fn test_mask_union_uses_masks() {
        let a = ColumnVector::int(vec![1, 2, 3]).with_nulls([0]).unwrap();
        let b = ColumnVector::int(vec![1, 2, 3]).with_mask([2]).unwrap();
        let out = Layout::of(&[&a, &b])
            .unwrap()
            .finish(ScalarType::Int, vec![0i64; 3])
            .unwrap();
        assert_eq!(out.nulls().unwrap().iter().collect::<Vec<_>>(), vec![0]);
        assert_eq!(out.mask().unwrap().iter().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_selection_from_first_sparse_operand() {
        let a = ColumnVector::int(vec![1, 2, 3]);
        let b = ColumnVector::int(vec![1, 2, 3])
            .with_selection(SelectionVector::new(vec![1]))
            .unwrap();
        let layout = Layout::of(&[&a, &b]).unwrap();
        assert_eq!(layout.rows().collect::<Vec<_>>(), vec![1]);
    }
}
