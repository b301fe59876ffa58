//! Arithmetic kernels: `+ - * / %`.
//!
//! Integer arithmetic wraps on overflow. A zero divisor fails the whole
//! call unless the row is already null or masked in the output, in which
//! case the row is left at zero.

use crate::error::{EvalError, Result};
use crate::types::ScalarType;
use crate::vector::{ColumnVector, Native};

use super::{map_binary, try_map_binary, EvalContext};

/// Native types with the arithmetic the kernels need.
pub trait Arithmetic: Native + Copy {
    fn plus(self, rhs: Self) -> Self;
    fn minus(self, rhs: Self) -> Self;
    fn times(self, rhs: Self) -> Self;
    /// Quotient; callers check for a zero divisor first.
    fn quotient(self, rhs: Self) -> Self;
    /// Remainder; callers check for a zero divisor first.
    fn remainder(self, rhs: Self) -> Self;
    fn is_zero(self) -> bool;
}

macro_rules! impl_integer_arithmetic {
    ($($t:ty),*) => {
        $(
            impl Arithmetic for $t {
                #[inline]
                fn plus(self, rhs: Self) -> Self { self.wrapping_add(rhs) }
                #[inline]
                fn minus(self, rhs: Self) -> Self { self.wrapping_sub(rhs) }
                #[inline]
                fn times(self, rhs: Self) -> Self { self.wrapping_mul(rhs) }
                #[inline]
                fn quotient(self, rhs: Self) -> Self { self.wrapping_div(rhs) }
                #[inline]
                fn remainder(self, rhs: Self) -> Self { self.wrapping_rem(rhs) }
                #[inline]
                fn is_zero(self) -> bool { self == 0 }
            }
        )*
    };
}

macro_rules! impl_float_arithmetic {
    ($($t:ty),*) => {
        $(
            impl Arithmetic for $t {
                #[inline]
                fn plus(self, rhs: Self) -> Self { self + rhs }
                #[inline]
                fn minus(self, rhs: Self) -> Self { self - rhs }
                #[inline]
                fn times(self, rhs: Self) -> Self { self * rhs }
                #[inline]
                fn quotient(self, rhs: Self) -> Self { self / rhs }
                #[inline]
                fn remainder(self, rhs: Self) -> Self { self % rhs }
                #[inline]
                fn is_zero(self) -> bool { self == 0.0 }
            }
        )*
    };
}

impl_integer_arithmetic!(i8, i16, i32, i64, u8, u16, u32, u64);
impl_float_arithmetic!(f32, f64);

pub fn add<T: Arithmetic>(
    _ctx: &EvalContext<'_>,
    left: &ColumnVector,
    right: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    map_binary(left, right, ret, |a: &T, b: &T| a.plus(*b))
}

pub fn sub<T: Arithmetic>(
    _ctx: &EvalContext<'_>,
    left: &ColumnVector,
    right: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    map_binary(left, right, ret, |a: &T, b: &T| a.minus(*b))
}

pub fn mul<T: Arithmetic>(
    _ctx: &EvalContext<'_>,
    left: &ColumnVector,
    right: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    map_binary(left, right, ret, |a: &T, b: &T| a.times(*b))
}

/// Division.
///
/// # Errors
///
/// [`EvalError::DivisionByZero`] at the first live row with a zero divisor.
pub fn div<T: Arithmetic>(
    _ctx: &EvalContext<'_>,
    left: &ColumnVector,
    right: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    try_map_binary(left, right, ret, |a: &T, b: &T| {
        if b.is_zero() {
            Err(EvalError::DivisionByZero)
        } else {
            Ok(a.quotient(*b))
        }
    })
}

/// Modulus.
///
/// # Errors
///
/// [`EvalError::ZeroModulus`] at the first live row with a zero divisor.
pub fn rem<T: Arithmetic>(
    _ctx: &EvalContext<'_>,
    left: &ColumnVector,
    right: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    try_map_binary(left, right, ret, |a: &T, b: &T| {
        if b.is_zero() {
            Err(EvalError::ZeroModulus)
        } else {
            Ok(a.remainder(*b))
        }
    })
}
