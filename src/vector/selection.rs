//! Selection vectors and selection-aware row iteration.

use std::ops::Range;
use std::slice;

/// Ordered list of active row indices.
///
/// A non-empty selection restricts a kernel to the listed rows (sparse
/// mode). An empty selection means every row is active (dense mode).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionVector {
    /// Indices of selected rows.
    pub indices: Vec<u32>,
}

impl SelectionVector {
    /// Creates a new selection vector with the given indices.
    #[must_use]
    pub fn new(indices: Vec<u32>) -> Self {
        SelectionVector { indices }
    }

    /// Returns the number of selected rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if no rows are selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the index at the given position.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<u32> {
        self.indices.get(pos).copied()
    }

    /// Returns the first index that does not strictly follow its
    /// predecessor, if any.
    #[must_use]
    pub fn out_of_order(&self) -> Option<u32> {
        self.indices
            .windows(2)
            .find(|pair| pair[1] <= pair[0])
            .map(|pair| pair[1])
    }

    /// Returns the first index that is not below `len`, if any.
    #[must_use]
    pub fn out_of_bounds(&self, len: usize) -> Option<u32> {
        self.indices.iter().copied().find(|&i| i as usize >= len)
    }
}

/// Iterator over the rows a kernel reads and writes.
#[derive(Debug, Clone)]
pub enum ActiveRows<'a> {
    /// Every row of the batch.
    Dense(Range<usize>),
    /// Only the selected rows.
    Sparse(slice::Iter<'a, u32>),
}

impl<'a> ActiveRows<'a> {
    /// Picks sparse iteration when `selection` is non-empty, dense otherwise.
    #[must_use]
    pub fn new(len: usize, selection: Option<&'a SelectionVector>) -> Self {
        match selection {
            Some(sel) if !sel.is_empty() => ActiveRows::Sparse(sel.indices.iter()),
            _ => ActiveRows::Dense(0..len),
        }
    }
}

impl Iterator for ActiveRows<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            ActiveRows::Dense(range) => range.next(),
            ActiveRows::Sparse(iter) => iter.next().map(|&i| i as usize),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            ActiveRows::Dense(range) => range.size_hint(),
            ActiveRows::Sparse(iter) => iter.size_hint(),
        }
    }
}
