//! The cast matrix.
//!
//! Every ordered pair of scalar types has a `Typecast` kernel. Identity
//! casts return the input as is, and pairs that share a physical
//! representation (`int64` -> `int`, `timestamp` -> `int64`) only change
//! the type tag. Everything else converts row by row.

mod promote;

pub use promote::promote;

use crate::error::{EvalError, Result};
use crate::kernels::{try_map_unary, BinaryKernel, EvalContext};
use crate::registry::Operator;
use crate::types::timestamp::{format_timestamp, parse_timestamp};
use crate::types::ScalarType;
use crate::vector::{ColumnVector, Native};

/// Converts a single native value to another native type.
///
/// `target` is the logical type being produced, used for error reporting.
pub trait CastTo<T> {
    /// # Errors
    ///
    /// Returns [`EvalError::CastParse`] when text does not parse.
    fn cast_to(&self, target: ScalarType) -> Result<T>;
}

macro_rules! impl_numeric_casts {
    (@from $src:ty => $($dst:ty),*) => {
        $(
            impl CastTo<$dst> for $src {
                #[inline]
                #[allow(clippy::unnecessary_cast, clippy::cast_lossless)]
                fn cast_to(&self, _target: ScalarType) -> Result<$dst> {
                    Ok(*self as $dst)
                }
            }
        )*
    };
    ($($src:ty),*) => {
        $( impl_numeric_casts!(@from $src => i8, i16, i32, i64, u8, u16, u32, u64, f32, f64); )*
    };
}

impl_numeric_casts!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

macro_rules! impl_bool_and_text_casts {
    ($($t:ty => $zero:expr),*) => {
        $(
            impl CastTo<bool> for $t {
                #[inline]
                fn cast_to(&self, _target: ScalarType) -> Result<bool> {
                    Ok(*self != $zero)
                }
            }

            impl CastTo<$t> for bool {
                #[inline]
                #[allow(clippy::unnecessary_cast, clippy::cast_lossless)]
                fn cast_to(&self, _target: ScalarType) -> Result<$t> {
                    Ok(u8::from(*self) as $t)
                }
            }

            impl CastTo<String> for $t {
                fn cast_to(&self, _target: ScalarType) -> Result<String> {
                    Ok(self.to_string())
                }
            }

            impl CastTo<$t> for String {
                fn cast_to(&self, target: ScalarType) -> Result<$t> {
                    self.parse::<$t>().map_err(|_| parse_error(self, target))
                }
            }
        )*
    };
}

impl_bool_and_text_casts!(
    i8 => 0, i16 => 0, i32 => 0, i64 => 0,
    u8 => 0, u16 => 0, u32 => 0, u64 => 0,
    f32 => 0.0, f64 => 0.0
);

impl CastTo<bool> for bool {
    fn cast_to(&self, _target: ScalarType) -> Result<bool> {
        Ok(*self)
    }
}

impl CastTo<String> for bool {
    fn cast_to(&self, _target: ScalarType) -> Result<String> {
        Ok(if *self { "true" } else { "false" }.to_string())
    }
}

impl CastTo<bool> for String {
    fn cast_to(&self, target: ScalarType) -> Result<bool> {
        parse_bool(self).ok_or_else(|| parse_error(self, target))
    }
}

impl CastTo<String> for String {
    fn cast_to(&self, _target: ScalarType) -> Result<String> {
        Ok(self.clone())
    }
}

fn parse_error(value: &str, target: ScalarType) -> EvalError {
    EvalError::CastParse {
        value: value.to_string(),
        target,
    }
}

/// Parses the boolean spellings accepted by casts.
#[must_use]
pub fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Binds `$native` to the physical element type of `$ty`.
macro_rules! with_native {
    ($ty:expr, $native:ident => $body:expr) => {
        match $ty {
            ScalarType::Int8 => {
                type $native = i8;
                $body
            }
            ScalarType::Int16 => {
                type $native = i16;
                $body
            }
            ScalarType::Int32 => {
                type $native = i32;
                $body
            }
            ScalarType::Int64 | ScalarType::Int | ScalarType::Timestamp => {
                type $native = i64;
                $body
            }
            ScalarType::UInt8 => {
                type $native = u8;
                $body
            }
            ScalarType::UInt16 => {
                type $native = u16;
                $body
            }
            ScalarType::UInt32 => {
                type $native = u32;
                $body
            }
            ScalarType::UInt64 => {
                type $native = u64;
                $body
            }
            ScalarType::Float32 => {
                type $native = f32;
                $body
            }
            ScalarType::Float64 | ScalarType::Float => {
                type $native = f64;
                $body
            }
            ScalarType::Bool => {
                type $native = bool;
                $body
            }
            ScalarType::String => {
                type $native = String;
                $body
            }
        }
    };
}

/// Returns the `Typecast` kernel for `source -> target`.
#[must_use]
pub fn kernel_for(source: ScalarType, target: ScalarType) -> BinaryKernel {
    if source == target {
        return identity;
    }
    if source.same_physical(target) {
        return retag;
    }
    match (source, target) {
        (ScalarType::Timestamp, ScalarType::String) => timestamp_to_string as BinaryKernel,
        (ScalarType::String, ScalarType::Timestamp) => string_to_timestamp as BinaryKernel,
        _ => with_native!(source, S => with_native!(target, T => convert::<S, T> as BinaryKernel)),
    }
}

/// Casts `vector` to `target` through the shared evaluator.
///
/// # Errors
///
/// Propagates parse and formatting failures from the conversion.
pub fn cast(vector: &ColumnVector, target: ScalarType) -> Result<ColumnVector> {
    crate::dispatch::binary_eval(
        Operator::Typecast,
        vector.scalar_type(),
        target,
        vector,
        &ColumnVector::empty(target),
    )
    .map(|(out, _)| out)
}

// Cast kernels read only the left operand; the right one carries the
// target type.

fn identity(
    _ctx: &EvalContext<'_>,
    left: &ColumnVector,
    _right: &ColumnVector,
    _ret: ScalarType,
) -> Result<ColumnVector> {
    Ok(left.clone())
}

fn retag(
    _ctx: &EvalContext<'_>,
    left: &ColumnVector,
    _right: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    left.retag(ret)
}

fn convert<S, T>(
    _ctx: &EvalContext<'_>,
    left: &ColumnVector,
    _right: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector>
where
    S: Native + CastTo<T>,
    T: Native,
{
    try_map_unary(left, ret, |v: &S| v.cast_to(ret))
}

fn timestamp_to_string(
    _ctx: &EvalContext<'_>,
    left: &ColumnVector,
    _right: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    try_map_unary(left, ret, |secs: &i64| format_timestamp(*secs))
}

fn string_to_timestamp(
    _ctx: &EvalContext<'_>,
    left: &ColumnVector,
    _right: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    try_map_unary(left, ret, |text: &String| parse_timestamp(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::pattern::PatternCache;
    use crate::types::Value;

    fn run(vector: &ColumnVector, target: ScalarType) -> Result<ColumnVector> {
        let cache = PatternCache::default();
        let ctx = EvalContext::new(&cache);
        let kernel = kernel_for(vector.scalar_type(), target);
        kernel(&ctx, vector, &ColumnVector::empty(target), target)
    }

    #[test]
    fn test_identity_shares_storage() {
        let v = ColumnVector::string(vec!["a"]).with_nulls([0]).unwrap();
        let out = run(&v, ScalarType::String).unwrap();
        assert!(out.shares_values(&v));
        assert!(out.is_null(0));
    }

    #[test]
    fn test_same_physical_retags() {
        let v = ColumnVector::int(vec![86_400]);
        let out = run(&v, ScalarType::Timestamp).unwrap();
        assert_eq!(out.scalar_type(), ScalarType::Timestamp);
        assert!(out.shares_values(&v));
    }

    #[test]
    fn test_string_to_int() {
        let out = run(&ColumnVector::string(vec!["123", "-4"]), ScalarType::Int).unwrap();
        assert_eq!(out.typed::<i64>().unwrap(), &[123, -4]);

        let err = run(&ColumnVector::string(vec!["12x"]), ScalarType::Int).unwrap_err();
        assert_eq!(err.to_string(), "cannot cast '12x' to int");
    }

    #[test]
    fn test_unparsable_text_at_null_row_is_skipped() {
        let v = ColumnVector::string(vec!["oops", "5"]).with_nulls([0]).unwrap();
        let out = run(&v, ScalarType::UInt8).unwrap();
        assert_eq!(out.typed::<u8>().unwrap(), &[0, 5]);
        assert!(out.is_null(0));
    }

    #[test]
    fn test_narrowing_wraps() {
        let v = ColumnVector::int(vec![300, -1]);
        let out = run(&v, ScalarType::UInt8).unwrap();
        assert_eq!(out.typed::<u8>().unwrap(), &[44, 255]);
    }

    #[test]
    fn test_float_to_int_truncates_and_saturates() {
        let v = ColumnVector::float(vec![2.9, -2.9, 1e20, f64::NAN]);
        let out = run(&v, ScalarType::Int32).unwrap();
        assert_eq!(out.typed::<i32>().unwrap(), &[2, -2, i32::MAX, 0]);
    }

    #[test]
    fn test_bool_casts() {
        let out = run(&ColumnVector::int(vec![0, 5, -1]), ScalarType::Bool).unwrap();
        assert_eq!(out.typed::<bool>().unwrap(), &[false, true, true]);

        let out = run(&ColumnVector::boolean(vec![true, false]), ScalarType::Float).unwrap();
        assert_eq!(out.typed::<f64>().unwrap(), &[1.0, 0.0]);

        let out = run(&ColumnVector::boolean(vec![true, false]), ScalarType::String).unwrap();
        assert_eq!(out.typed::<String>().unwrap(), &["true", "false"]);
    }

    #[test]
    fn test_bool_parsing() {
        let v = ColumnVector::string(vec!["1", "t", "TRUE", "True", "0", "f", "FALSE", "false"]);
        let out = run(&v, ScalarType::Bool).unwrap();
        assert_eq!(
            out.typed::<bool>().unwrap(),
            &[true, true, true, true, false, false, false, false]
        );
        assert!(run(&ColumnVector::string(vec!["yes"]), ScalarType::Bool).is_err());
        assert!(run(&ColumnVector::string(vec!["tRUE"]), ScalarType::Bool).is_err());
    }

    #[test]
    fn test_timestamp_text() {
        let v = ColumnVector::timestamp(vec![0, 1_700_000_123]);
        let out = run(&v, ScalarType::String).unwrap();
        assert_eq!(
            out.typed::<String>().unwrap(),
            &["1970-01-01 00:00:00", "2023-11-14 22:15:23"]
        );
        let back = run(&out, ScalarType::Timestamp).unwrap();
        assert_eq!(back.get(1), Some(Value::Timestamp(1_700_000_123)));
    }

    #[test]
    fn test_timestamp_to_numeric_is_raw_seconds() {
        let v = ColumnVector::timestamp(vec![90]);
        let out = run(&v, ScalarType::Float32).unwrap();
        assert_eq!(out.typed::<f32>().unwrap(), &[90.0]);
    }

    #[test]
    fn test_numeric_text_round_trip() {
        let v = ColumnVector::float(vec![0.1, -2.5, 1e-7]);
        let text = run(&v, ScalarType::String).unwrap();
        let back = run(&text, ScalarType::Float).unwrap();
        assert_eq!(back.typed::<f64>().unwrap(), v.typed::<f64>().unwrap());
    }

    #[test]
    fn test_every_pair_has_a_kernel() {
        for source in ScalarType::ALL {
            let v = ColumnVector::new(source, crate::vector::ColumnValues::zeroed(source, 2))
                .unwrap()
                .with_nulls([0, 1])
                .unwrap();
            for target in ScalarType::ALL {
                let out = run(&v, target).unwrap();
                assert_eq!(out.scalar_type(), target);
                assert_eq!(out.len(), 2);
            }
        }
    }
}
