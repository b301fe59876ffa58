//! Numeric type promotion for mixed-type operands.

use crate::types::ScalarType;

/// Common type of two operands for mixed-type arithmetic and comparison.
///
/// Returns None when either side is not numeric (and the types differ).
#[must_use]
pub fn promote(a: ScalarType, b: ScalarType) -> Option<ScalarType> {
    if a == b {
        return Some(a);
    }
    if !a.is_numeric() || !b.is_numeric() {
        return None;
    }
    let promoted = match (a.is_float(), b.is_float()) {
        (true, true) => {
            if a == ScalarType::Float || b == ScalarType::Float {
                ScalarType::Float
            } else {
                ScalarType::Float64
            }
        }
        (true, false) => float_with_int(a, b),
        (false, true) => float_with_int(b, a),
        (false, false) => promote_integers(a, b),
    };
    Some(promoted)
}

fn width(ty: ScalarType) -> u32 {
    ty.bit_width().unwrap_or(64)
}

fn float_with_int(float: ScalarType, int: ScalarType) -> ScalarType {
    if float == ScalarType::Float32 && width(int) > 16 {
        ScalarType::Float64
    } else {
        float
    }
}

fn promote_integers(a: ScalarType, b: ScalarType) -> ScalarType {
    if a == ScalarType::Int || b == ScalarType::Int {
        return ScalarType::Int;
    }
    if a.is_signed() == b.is_signed() {
        return if width(a) >= width(b) { a } else { b };
    }
    let (signed, unsigned) = if a.is_signed() { (a, b) } else { (b, a) };
    match width(signed).max(2 * width(unsigned)).min(64) {
        8 => ScalarType::Int8,
        16 => ScalarType::Int16,
        32 => ScalarType::Int32,
        _ => ScalarType::Int64,
    }
}
