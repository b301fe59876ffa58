//! String kernels: concatenation and pattern matching.

use std::sync::Arc;

use crate::error::Result;
use crate::types::ScalarType;
use crate::vector::ColumnVector;

use super::pattern::{Matcher, PatternCache};
use super::{map_binary, try_map_binary, EvalContext};

pub fn concat(
    _ctx: &EvalContext<'_>,
    left: &ColumnVector,
    right: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    map_binary(left, right, ret, |a: &String, b: &String| {
        let mut out = String::with_capacity(a.len() + b.len());
        out.push_str(a);
        out.push_str(b);
        out
    })
}

/// Per-call matcher slot. Consecutive rows with the same pattern text reuse
/// the matcher without touching the shared cache.
struct LastMatcher<'a> {
    cache: &'a PatternCache,
    like: bool,
    current: Option<Arc<Matcher>>,
}

impl<'a> LastMatcher<'a> {
    fn new(cache: &'a PatternCache, like: bool) -> Self {
        LastMatcher {
            cache,
            like,
            current: None,
        }
    }

    fn get(&mut self, pattern: &str) -> Result<Arc<Matcher>> {
        if let Some(matcher) = &self.current {
            if matcher.pattern() == pattern {
                return Ok(Arc::clone(matcher));
            }
        }
        let matcher = self.cache.compile(pattern, self.like)?;
        self.current = Some(Arc::clone(&matcher));
        Ok(matcher)
    }
}

fn pattern_match(
    ctx: &EvalContext<'_>,
    left: &ColumnVector,
    right: &ColumnVector,
    ret: ScalarType,
    like: bool,
    negate: bool,
) -> Result<ColumnVector> {
    let mut slot = LastMatcher::new(ctx.patterns(), like);
    try_map_binary(left, right, ret, |text: &String, pattern: &String| {
        Ok(slot.get(pattern)?.matches(text) != negate)
    })
}

/// `left LIKE right`, with `%`, `_` and `\` escapes.
///
/// # Errors
///
/// Fails on the first malformed pattern at a live row.
pub fn like(
    ctx: &EvalContext<'_>,
    left: &ColumnVector,
    right: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    pattern_match(ctx, left, right, ret, true, false)
}

/// `left NOT LIKE right`.
///
/// # Errors
///
/// Fails on the first malformed pattern at a live row.
pub fn not_like(
    ctx: &EvalContext<'_>,
    left: &ColumnVector,
    right: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    pattern_match(ctx, left, right, ret, true, true)
}

/// Regular-expression search of `right` within `left`.
///
/// # Errors
///
/// Fails on the first malformed pattern at a live row.
pub fn regex_match(
    ctx: &EvalContext<'_>,
    left: &ColumnVector,
    right: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    pattern_match(ctx, left, right, ret, false, false)
}

/// Negated [`regex_match`].
///
/// # Errors
///
/// Fails on the first malformed pattern at a live row.
pub fn not_regex_match(
    ctx: &EvalContext<'_>,
    left: &ColumnVector,
    right: &ColumnVector,
    ret: ScalarType,
) -> Result<ColumnVector> {
    pattern_match(ctx, left, right, ret, false, true)
}
