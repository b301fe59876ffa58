//! Kernels over any number of operands.

use crate::error::{EvalError, Result};
use crate::types::ScalarType;
use crate::vector::{ColumnVector, Native};

use super::layout::{Layout, Operand};
use super::EvalContext;

fn bind<'a, T: Native>(
    values: &'a [ColumnVector],
) -> Result<(Layout, Vec<Operand<'a, T>>)> {
    if values.is_empty() {
        return Err(EvalError::InvalidOperand(
            "variadic operator needs at least one operand".to_string(),
        ));
    }
    let refs: Vec<&ColumnVector> = values.iter().collect();
    let layout = Layout::of(&refs)?;
    let operands = values
        .iter()
        .enumerate()
        .map(|(pos, v)| layout.operand::<T>(pos, v))
        .collect::<Result<Vec<_>>>()?;
    Ok((layout, operands))
}

/// Joins every operand, left to right.
pub fn concat(
    _ctx: &EvalContext<'_>,
    values: &[ColumnVector],
    ret: ScalarType,
) -> Result<ColumnVector> {
    let (layout, operands) = bind::<String>(values)?;
    let mut out = vec![String::new(); layout.len()];
    for row in layout.rows() {
        let joined = &mut out[row];
        for op in &operands {
            joined.push_str(op.at(row));
        }
    }
    layout.finish(ret, out)
}

/// First operand that is neither null nor masked at each row.
///
/// A row is masked only where every operand is masked. It is null where
/// every operand is null, and also where each operand is either null or
/// masked without all of them being masked.
pub fn coalesce<T: Native>(
    _ctx: &EvalContext<'_>,
    values: &[ColumnVector],
    ret: ScalarType,
) -> Result<ColumnVector> {
    let (layout, operands) = bind::<T>(values)?;
    let mut layout = layout.intersect_bitmaps();
    let mut out = vec![T::default(); layout.len()];
    let mut dead = Vec::new();
    for row in layout.rows() {
        match (0..operands.len()).find(|&pos| !layout.operand_skipped(pos, row)) {
            Some(pos) => out[row] = operands[pos].at(row).clone(),
            None if !layout.is_skipped(row) => dead.push(row as u32),
            None => {}
        }
    }
    layout.add_nulls(&dead);
    layout.finish(ret, out)
}

fn fold_extreme<T: Native>(
    values: &[ColumnVector],
    ret: ScalarType,
    replaces: fn(&T, &T) -> bool,
) -> Result<ColumnVector> {
    let (layout, operands) = bind::<T>(values)?;
    let mut out = vec![T::default(); layout.len()];
    for row in layout.rows() {
        let mut best = operands[0].at(row);
        for op in &operands[1..] {
            let candidate = op.at(row);
            if replaces(candidate, best) {
                best = candidate;
            }
        }
        out[row] = best.clone();
    }
    layout.finish(ret, out)
}

/// Largest operand at each row; null if any operand is null.
pub fn greatest<T: Native>(
    _ctx: &EvalContext<'_>,
    values: &[ColumnVector],
    ret: ScalarType,
) -> Result<ColumnVector> {
    fold_extreme::<T>(values, ret, |candidate, best| candidate > best)
}

/// Smallest operand at each row; null if any operand is null.
pub fn least<T: Native>(
    _ctx: &EvalContext<'_>,
    values: &[ColumnVector],
    ret: ScalarType,
) -> Result<ColumnVector> {
    fold_extreme::<T>(values, ret, |candidate, best| candidate < best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::pattern::PatternCache;
    use crate::types::Value;

    #[test]
    fn test_concat_many() {
        let cache = PatternCache::default();
        let ctx = EvalContext::new(&cache);
        let values = vec![
            ColumnVector::string(vec!["a", "b"]),
            ColumnVector::string(vec!["-"]),
            ColumnVector::string(vec!["x", "y"]),
        ];
        let out = concat(&ctx, &values, ScalarType::String).unwrap();
        assert_eq!(out.typed::<String>().unwrap(), &["a-x", "b-y"]);
    }

    #[test]
    fn test_coalesce_picks_first_live_value() {
        let cache = PatternCache::default();
        let ctx = EvalContext::new(&cache);
        let values = vec![
            ColumnVector::int(vec![1, 0, 0]).with_nulls([1, 2]).unwrap(),
            ColumnVector::int(vec![0, 2, 0]).with_nulls([2]).unwrap(),
            ColumnVector::int(vec![0, 0, 3]).with_nulls([2]).unwrap(),
        ];
        let out = coalesce::<i64>(&ctx, &values, ScalarType::Int).unwrap();
        assert_eq!(out.typed::<i64>().unwrap(), &[1, 2, 0]);
        assert!(!out.is_null(0));
        assert!(!out.is_null(1));
        assert!(out.is_null(2));
    }

    #[test]
    fn test_coalesce_skips_masked_operand() {
        let cache = PatternCache::default();
        let ctx = EvalContext::new(&cache);
        let values = vec![
            ColumnVector::int(vec![9]).with_mask([0]).unwrap(),
            ColumnVector::int(vec![4]),
        ];
        let out = coalesce::<i64>(&ctx, &values, ScalarType::Int).unwrap();
        assert_eq!(out.typed::<i64>().unwrap(), &[4]);
        assert!(out.mask().is_none());
    }

    #[test]
    fn test_coalesce_null_and_masked_operands_give_null() {
        let cache = PatternCache::default();
        let ctx = EvalContext::new(&cache);
        let values = vec![
            ColumnVector::int(vec![5, 1]).with_nulls([0]).unwrap(),
            ColumnVector::int(vec![9, 2]).with_mask([0]).unwrap(),
        ];
        let out = coalesce::<i64>(&ctx, &values, ScalarType::Int).unwrap();
        assert!(out.is_null(0));
        assert!(!out.is_masked(0));
        assert_eq!(out.get(1), Some(Value::Int64(1)));
        assert!(!out.is_null(1));
    }

    #[test]
    fn test_coalesce_all_masked_stays_masked() {
        let cache = PatternCache::default();
        let ctx = EvalContext::new(&cache);
        let values = vec![
            ColumnVector::int(vec![5]).with_mask([0]).unwrap(),
            ColumnVector::int(vec![9]).with_mask([0]).unwrap(),
        ];
        let out = coalesce::<i64>(&ctx, &values, ScalarType::Int).unwrap();
        assert!(out.is_masked(0));
        assert!(!out.is_null(0));
    }

    #[test]
    fn test_greatest_and_least() {
        let cache = PatternCache::default();
        let ctx = EvalContext::new(&cache);
        let values = vec![
            ColumnVector::float(vec![1.0, 5.0]),
            ColumnVector::float(vec![3.0, -1.0]),
            ColumnVector::float(vec![2.0, 0.0]),
        ];
        let out = greatest::<f64>(&ctx, &values, ScalarType::Float).unwrap();
        assert_eq!(out.typed::<f64>().unwrap(), &[3.0, 5.0]);
        let out = least::<f64>(&ctx, &values, ScalarType::Float).unwrap();
        assert_eq!(out.typed::<f64>().unwrap(), &[1.0, -1.0]);
    }

    #[test]
    fn test_greatest_null_if_any_null() {
        let cache = PatternCache::default();
        let ctx = EvalContext::new(&cache);
        let values = vec![
            ColumnVector::string(vec!["a", "b"]).with_nulls([1]).unwrap(),
            ColumnVector::string(vec!["c", "a"]),
        ];
        let out = greatest::<String>(&ctx, &values, ScalarType::String).unwrap();
        assert_eq!(out.get(0).unwrap().as_str(), Some("c"));
        assert!(out.is_null(1));
    }

    #[test]
    fn test_single_operand() {
        let cache = PatternCache::default();
        let ctx = EvalContext::new(&cache);
        let values = vec![ColumnVector::int(vec![7, 8])];
        let out = least::<i64>(&ctx, &values, ScalarType::Int).unwrap();
        assert_eq!(out.typed::<i64>().unwrap(), &[7, 8]);
    }

    #[test]
    fn test_no_operands_is_rejected() {
        let cache = PatternCache::default();
        let ctx = EvalContext::new(&cache);
        assert!(matches!(
            coalesce::<i64>(&ctx, &[], ScalarType::Int),
            Err(EvalError::InvalidOperand(_))
        ));
    }
}
