//! Comparison kernels. Every comparison yields `bool` and uses the native
//! ordering of the operand type; strings compare bytewise.

use crate::error::Result;
use crate::types::ScalarType;
use crate::vector::{ColumnVector, Native};

use super::{map_binary, EvalContext};

macro_rules! comparison {
    ($($(#[$doc:meta])* $name:ident => $op:tt),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name<T: Native>(
                _ctx: &EvalContext<'_>,
                left: &ColumnVector,
                right: &ColumnVector,
                ret: ScalarType,
            ) -> Result<ColumnVector> {
                map_binary(left, right, ret, |a: &T, b: &T| a $op b)
            }
        )*
    };
}

comparison! {
    /// `left = right`
    eq => ==,
    /// `left <> right`
    ne => !=,
    /// `left < right`
    lt => <,
    /// `left <= right`
    le => <=,
    /// `left > right`
    gt => >,
    /// `left >= right`
    ge => >=,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::pattern::PatternCache;
    use crate::kernels::BinaryKernel;
    use crate::vector::SelectionVector;

    #[test]
    fn test_integer_comparisons() {
        let cache = PatternCache::default();
        let ctx = EvalContext::new(&cache);
        let l = ColumnVector::int(vec![1, 2, 3]);
        let r = ColumnVector::int(vec![2, 2, 2]);

        let cases: [(BinaryKernel, [bool; 3]); 6] = [
            (eq::<i64>, [false, true, false]),
            (ne::<i64>, [true, false, true]),
            (lt::<i64>, [true, false, false]),
            (le::<i64>, [true, true, false]),
            (gt::<i64>, [false, false, true]),
            (ge::<i64>, [false, true, true]),
        ];
        for (kernel, expected) in cases {
            let out = kernel(&ctx, &l, &r, ScalarType::Bool).unwrap();
            assert_eq!(out.scalar_type(), ScalarType::Bool);
            assert_eq!(out.typed::<bool>().unwrap(), &expected);
        }
    }

    #[test]
    fn test_string_comparison_is_bytewise() {
        let cache = PatternCache::default();
        let ctx = EvalContext::new(&cache);
        let l = ColumnVector::string(vec!["apple", "Zebra"]);
        let r = ColumnVector::string(vec!["banana", "apple"]);
        let out = lt::<String>(&ctx, &l, &r, ScalarType::Bool).unwrap();
        assert_eq!(out.typed::<bool>().unwrap(), &[true, true]);
    }

    #[test]
    fn test_nan_compares_unequal() {
        let cache = PatternCache::default();
        let ctx = EvalContext::new(&cache);
        let l = ColumnVector::float(vec![f64::NAN]);
        let out = eq::<f64>(&ctx, &l, &l, ScalarType::Bool).unwrap();
        assert_eq!(out.typed::<bool>().unwrap(), &[false]);
    }

    #[test]
    fn test_comparison_honours_selection() {
        let cache = PatternCache::default();
        let ctx = EvalContext::new(&cache);
        let l = ColumnVector::int(vec![5, 5, 5])
            .with_selection(SelectionVector::new(vec![2]))
            .unwrap();
        let r = ColumnVector::int(vec![5, 5, 5]);
        let out = eq::<i64>(&ctx, &l, &r, ScalarType::Bool).unwrap();
        assert_eq!(out.typed::<bool>().unwrap(), &[false, false, true]);
        assert_eq!(out.selection().unwrap().indices, vec![2]);
    }

    #[test]
    fn test_comparison_unions_nulls() {
        let cache = PatternCache::default();
        let ctx = EvalContext::new(&cache);
        let l = ColumnVector::boolean(vec![true, false]).with_nulls([0]).unwrap();
        let r = ColumnVector::boolean(vec![true, false]).with_nulls([1]).unwrap();
        let out = eq::<bool>(&ctx, &l, &r, ScalarType::Bool).unwrap();
        assert!(out.is_null(0));
        assert!(out.is_null(1));
    }
}
