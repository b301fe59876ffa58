//! Per-operator, per-type compute kernels.
//!
//! Kernels are plain functions, generic over the native element type and
//! monomorphised once per registered signature. They never mutate their
//! inputs and either return a complete output vector or an error.

pub mod arith;
pub mod compare;
pub(crate) mod layout;
pub mod logic;
pub mod pattern;
pub mod string;
pub mod unary;
pub mod variadic;

use crate::error::Result;
use crate::types::ScalarType;
use crate::vector::{ColumnVector, Native};

use self::layout::Layout;
use self::pattern::PatternCache;

/// Shared resources a kernel may use during one call.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    patterns: &'a PatternCache,
}

impl<'a> EvalContext<'a> {
    /// Creates a context backed by the given pattern cache.
    #[must_use]
    pub fn new(patterns: &'a PatternCache) -> Self {
        EvalContext { patterns }
    }

    /// Returns the compiled-pattern cache.
    #[must_use]
    pub fn patterns(&self) -> &'a PatternCache {
        self.patterns
    }
}

/// Single-operand kernel. The last argument is the result type.
pub type UnaryKernel = fn(&EvalContext<'_>, &ColumnVector, ScalarType) -> Result<ColumnVector>;

/// Two-operand kernel. The last argument is the result type.
pub type BinaryKernel =
    fn(&EvalContext<'_>, &ColumnVector, &ColumnVector, ScalarType) -> Result<ColumnVector>;

/// Variadic kernel. The last argument is the result type.
pub type MultiKernel = fn(&EvalContext<'_>, &[ColumnVector], ScalarType) -> Result<ColumnVector>;

/// Applies `f` to every active row.
pub(crate) fn map_unary<I, O, F>(input: &ColumnVector, ret: ScalarType, mut f: F) -> Result<ColumnVector>
where
    I: Native,
    O: Native,
    F: FnMut(&I) -> O,
{
    let values = input.typed::<I>()?;
    let layout = Layout::unary(input);
    let mut out = vec![O::default(); layout.len()];
    for row in layout.rows() {
        out[row] = f(&values[row]);
    }
    layout.finish(ret, out)
}

/// Applies a fallible `f` to every active row that is neither null nor
/// masked; skipped rows keep the default value.
pub(crate) fn try_map_unary<I, O, F>(
    input: &ColumnVector,
    ret: ScalarType,
    mut f: F,
) -> Result<ColumnVector>
where
    I: Native,
    O: Native,
    F: FnMut(&I) -> Result<O>,
{
    let values = input.typed::<I>()?;
    let layout = Layout::unary(input);
    let mut out = vec![O::default(); layout.len()];
    for row in layout.rows() {
        if layout.is_skipped(row) {
            continue;
        }
        out[row] = f(&values[row])?;
    }
    layout.finish(ret, out)
}

/// Applies `f` to every active row pair.
pub(crate) fn map_binary<L, R, O, F>(
    left: &ColumnVector,
    right: &ColumnVector,
    ret: ScalarType,
    mut f: F,
) -> Result<ColumnVector>
where
    L: Native,
    R: Native,
    O: Native,
    F: FnMut(&L, &R) -> O,
{
    let layout = Layout::of(&[left, right])?;
    let lhs = layout.operand::<L>(0, left)?;
    let rhs = layout.operand::<R>(1, right)?;
    let mut out = vec![O::default(); layout.len()];
    for row in layout.rows() {
        out[row] = f(lhs.at(row), rhs.at(row));
    }
    layout.finish(ret, out)
}

/// Applies a fallible `f` to every active row pair that is neither null
/// nor masked in the output; skipped rows keep the default value.
pub(crate) fn try_map_binary<L, R, O, F>(
    left: &ColumnVector,
    right: &ColumnVector,
    ret: ScalarType,
    mut f: F,
) -> Result<ColumnVector>
where
    L: Native,
    R: Native,
    O: Native,
    F: FnMut(&L, &R) -> Result<O>,
{
    let layout = Layout::of(&[left, right])?;
    let lhs = layout.operand::<L>(0, left)?;
    let rhs = layout.operand::<R>(1, right)?;
    let mut out = vec![O::default(); layout.len()];
    for row in layout.rows() {
        if layout.is_skipped(row) {
            continue;
        }
        out[row] = f(lhs.at(row), rhs.at(row))?;
    }
    layout.finish(ret, out)
}
