//! Boolean connectives.
//!
//! These are plain two-valued `AND`/`OR`: a row that is null in either
//! operand is null in the output, whatever the other side holds.

use crate::error::Result;
use crate::types::ScalarType;
use crate::vector::ColumnVector;

use super::{map_binary, EvalContext};

pub fn and(
    _ctx: &EvalContext<'_>,
    left: &ColumnVector,
    right: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    map_binary(left, right, ret, |a: &bool, b: &bool| *a && *b)
}

pub fn or(
    _ctx: &EvalContext<'_>,
    left: &ColumnVector,
    right: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    map_binary(left, right, ret, |a: &bool, b: &bool| *a || *b)
}
