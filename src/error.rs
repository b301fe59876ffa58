//! Error types for kernel evaluation.

use thiserror::Error;

use crate::registry::Operator;
use crate::types::ScalarType;

/// Result type alias using [`EvalError`].
pub type Result<T> = std::result::Result<T, EvalError>;

/// Error types for kernel evaluation.
///
/// Every error aborts the whole call: a kernel either returns a complete
/// output vector or nothing.
#[derive(Debug, Error)]
pub enum EvalError {
    /// No signature registered for the operator and operand type(s).
    #[error("operator {op} not implemented for type(s) {types}")]
    UnsupportedSignature { op: Operator, types: String },

    /// Zero divisor at a row that is neither null nor masked.
    #[error("division by zero")]
    DivisionByZero,

    /// Zero modulus at a row that is neither null nor masked.
    #[error("zero modulus")]
    ZeroModulus,

    /// Malformed LIKE or MATCH pattern.
    #[error("invalid pattern '{pattern}': {source}")]
    PatternCompile {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Text that cannot be parsed as the cast target.
    #[error("cannot cast '{value}' to {target}")]
    CastParse { value: String, target: ScalarType },

    /// Timestamp outside the range the text format can represent.
    #[error("timestamp {0} out of range")]
    TimestampOutOfRange(i64),

    /// A vector's concrete type differs from the declared type tag.
    #[error("Type error: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Inconsistent operand layout (lengths, bitmap or selection bounds).
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    /// Arrow conversion failure.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl EvalError {
    pub(crate) fn unsupported(op: Operator, types: &[ScalarType]) -> Self {
        let types = types
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ");
        EvalError::UnsupportedSignature { op, types }
    }

    pub(crate) fn type_mismatch(expected: ScalarType, actual: ScalarType) -> Self {
        EvalError::TypeMismatch {
            expected: expected.name().to_string(),
            actual: actual.name().to_string(),
        }
    }

    /// Returns true for the data errors raised by `Div` and `Mod`.
    #[must_use]
    pub fn is_zero_divisor(&self) -> bool {
        matches!(self, EvalError::DivisionByZero | EvalError::ZeroModulus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_names_operator_and_types() {
        let err = EvalError::unsupported(Operator::Plus, &[ScalarType::Bool, ScalarType::String]);
        let msg = err.to_string();
        assert!(msg.contains("plus"));
        assert!(msg.contains("bool, string"));
    }

    #[test]
    fn test_zero_divisor_classification() {
        assert!(EvalError::DivisionByZero.is_zero_divisor());
        assert!(EvalError::ZeroModulus.is_zero_divisor());
        assert!(!EvalError::InvalidOperand("x".into()).is_zero_divisor());
    }

    #[test]
    fn test_cast_parse_display() {
        let err = EvalError::CastParse {
            value: "12x".into(),
            target: ScalarType::Int,
        };
        assert_eq!(err.to_string(), "cannot cast '12x' to int");
    }
}
