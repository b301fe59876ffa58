//! Single-operand kernels.

use crate::error::Result;
use crate::types::ScalarType;
use crate::vector::{ColumnVector, Native};

use super::layout::Layout;
use super::{map_unary, EvalContext};

/// Native numeric types with the unary operations the kernels need.
pub trait UnaryNumeric: Native + Copy {
    fn absolute(self) -> Self;
    fn ceiling(self) -> Self;
    fn flooring(self) -> Self;
    /// Rounds half to even.
    fn rounding(self) -> Self;
    /// -1 for negative values, +1 for zero and positive values.
    fn sign(self) -> Self;
}

/// Native types that can be negated.
pub trait Negate: Native + Copy {
    fn negate(self) -> Self;
}

macro_rules! impl_signed {
    ($($t:ty),*) => {
        $(
            impl UnaryNumeric for $t {
                fn absolute(self) -> Self { self.wrapping_abs() }
                fn ceiling(self) -> Self { self }
                fn flooring(self) -> Self { self }
                fn rounding(self) -> Self { self }
                fn sign(self) -> Self { if self < 0 { -1 } else { 1 } }
            }

            impl Negate for $t {
                fn negate(self) -> Self { self.wrapping_neg() }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {
        $(
            impl UnaryNumeric for $t {
                fn absolute(self) -> Self { self }
                fn ceiling(self) -> Self { self }
                fn flooring(self) -> Self { self }
                fn rounding(self) -> Self { self }
                fn sign(self) -> Self { 1 }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($t:ty),*) => {
        $(
            impl UnaryNumeric for $t {
                fn absolute(self) -> Self { self.abs() }
                fn ceiling(self) -> Self { self.ceil() }
                fn flooring(self) -> Self { self.floor() }
                fn rounding(self) -> Self { self.round_ties_even() }
                fn sign(self) -> Self { if self < 0.0 { -1.0 } else { 1.0 } }
            }

            impl Negate for $t {
                fn negate(self) -> Self { -self }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64);
impl_unsigned!(u8, u16, u32, u64);
impl_float!(f32, f64);

pub fn negate<T: Negate>(
    _ctx: &EvalContext<'_>,
    input: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    map_unary(input, ret, |v: &T| v.negate())
}

pub fn abs<T: UnaryNumeric>(
    _ctx: &EvalContext<'_>,
    input: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    map_unary(input, ret, |v: &T| v.absolute())
}

pub fn ceil<T: UnaryNumeric>(
    _ctx: &EvalContext<'_>,
    input: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    map_unary(input, ret, |v: &T| v.ceiling())
}

pub fn floor<T: UnaryNumeric>(
    _ctx: &EvalContext<'_>,
    input: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    map_unary(input, ret, |v: &T| v.flooring())
}

pub fn round<T: UnaryNumeric>(
    _ctx: &EvalContext<'_>,
    input: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    map_unary(input, ret, |v: &T| v.rounding())
}

pub fn sign<T: UnaryNumeric>(
    _ctx: &EvalContext<'_>,
    input: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    map_unary(input, ret, |v: &T| v.sign())
}

pub fn not(_ctx: &EvalContext<'_>, input: &ColumnVector, ret: ScalarType) -> Result<ColumnVector> {
    map_unary(input, ret, |v: &bool| !v)
}

/// Writes the input's type name at every active row.
///
/// Registered as type-agnostic, so this is the one kernel that inspects
/// the runtime type of its operand.
pub fn type_of(
    _ctx: &EvalContext<'_>,
    input: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    let name = input.scalar_type().name();
    let layout = Layout::unary(input);
    let mut out = vec![String::new(); layout.len()];
    for row in layout.rows() {
        out[row] = name.to_string();
    }
    layout.finish(ret, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::pattern::PatternCache;
    use crate::vector::SelectionVector;

    fn ctx_eval<F>(f: F) -> ColumnVector
    where
        F: FnOnce(&EvalContext<'_>) -> Result<ColumnVector>,
    {
        let cache = PatternCache::default();
        f(&EvalContext::new(&cache)).unwrap()
    }

    #[test]
    fn test_abs_and_negate() {
        let input = ColumnVector::int(vec![-5, 0, 7]);
        let out = ctx_eval(|ctx| abs::<i64>(ctx, &input, ScalarType::Int));
        assert_eq!(out.typed::<i64>().unwrap(), &[5, 0, 7]);
        let out = ctx_eval(|ctx| negate::<i64>(ctx, &input, ScalarType::Int));
        assert_eq!(out.typed::<i64>().unwrap(), &[5, 0, -7]);
    }

    #[test]
    fn test_abs_of_min_wraps() {
        let input = ColumnVector::from_native(ScalarType::Int8, vec![i8::MIN]).unwrap();
        let out = ctx_eval(|ctx| abs::<i8>(ctx, &input, ScalarType::Int8));
        assert_eq!(out.typed::<i8>().unwrap(), &[i8::MIN]);
    }

    #[test]
    fn test_sign_of_zero_is_positive() {
        let input = ColumnVector::int(vec![-3, 0, 4]);
        let out = ctx_eval(|ctx| sign::<i64>(ctx, &input, ScalarType::Int));
        assert_eq!(out.typed::<i64>().unwrap(), &[-1, 1, 1]);

        let input = ColumnVector::float(vec![-0.5, 0.0, 2.5]);
        let out = ctx_eval(|ctx| sign::<f64>(ctx, &input, ScalarType::Float));
        assert_eq!(out.typed::<f64>().unwrap(), &[-1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_rounding_family() {
        let input = ColumnVector::float(vec![1.5, 2.5, -1.5, 0.2]);
        let out = ctx_eval(|ctx| round::<f64>(ctx, &input, ScalarType::Float));
        assert_eq!(out.typed::<f64>().unwrap(), &[2.0, 2.0, -2.0, 0.0]);
        let out = ctx_eval(|ctx| ceil::<f64>(ctx, &input, ScalarType::Float));
        assert_eq!(out.typed::<f64>().unwrap(), &[2.0, 3.0, -1.0, 1.0]);
        let out = ctx_eval(|ctx| floor::<f64>(ctx, &input, ScalarType::Float));
        assert_eq!(out.typed::<f64>().unwrap(), &[1.0, 2.0, -2.0, 0.0]);
    }

    #[test]
    fn test_integer_rounding_is_identity() {
        let input = ColumnVector::from_native(ScalarType::UInt16, vec![3u16, 9]).unwrap();
        let out = ctx_eval(|ctx| round::<u16>(ctx, &input, ScalarType::UInt16));
        assert_eq!(out.typed::<u16>().unwrap(), &[3, 9]);
    }

    #[test]
    fn test_unary_keeps_nulls_and_selection() {
        let input = ColumnVector::int(vec![-1, -2, -3])
            .with_nulls([0])
            .unwrap()
            .with_selection(SelectionVector::new(vec![0, 2]))
            .unwrap();
        let out = ctx_eval(|ctx| abs::<i64>(ctx, &input, ScalarType::Int));
        assert_eq!(out.typed::<i64>().unwrap(), &[1, 0, 3]);
        assert!(out.is_null(0));
        assert_eq!(out.selection().unwrap().indices, vec![0, 2]);
    }

    #[test]
    fn test_not() {
        let input = ColumnVector::boolean(vec![true, false]);
        let out = ctx_eval(|ctx| not(ctx, &input, ScalarType::Bool));
        assert_eq!(out.typed::<bool>().unwrap(), &[false, true]);
    }

    #[test]
    fn test_type_of() {
        let input = ColumnVector::from_native(ScalarType::UInt8, vec![1u8, 2]).unwrap();
        let out = ctx_eval(|ctx| type_of(ctx, &input, ScalarType::String));
        assert_eq!(out.scalar_type(), ScalarType::String);
        assert_eq!(out.typed::<String>().unwrap(), &["uint8", "uint8"]);

        let input = ColumnVector::timestamp(vec![0]);
        let out = ctx_eval(|ctx| type_of(ctx, &input, ScalarType::String));
        assert_eq!(out.typed::<String>().unwrap(), &["timestamp"]);
    }
}
