//! Operator dispatch.
//!
//! An [`Evaluator`] resolves an operator and its operand type tags to a
//! registered signature and runs the kernel. Mixed numeric operands of
//! arithmetic and comparison operators are promoted to a common type
//! through the cast matrix when no exact signature exists.

use once_cell::sync::Lazy;

use crate::cast::promote;
use crate::config::EvalConfig;
use crate::error::{EvalError, Result};
use crate::kernels::pattern::PatternCache;
use crate::kernels::EvalContext;
use crate::logging::LOG_TARGET;
use crate::registry::{BinarySignature, Operator, Registry};
use crate::types::ScalarType;
use crate::vector::ColumnVector;

static SHARED: Lazy<Evaluator> = Lazy::new(Evaluator::default);

/// Evaluates operators over column vectors.
///
/// Owns the compiled-pattern cache, so patterns are compiled once per
/// evaluator rather than once per call. Safe to share across threads.
#[derive(Debug)]
pub struct Evaluator {
    config: EvalConfig,
    registry: &'static Registry,
    patterns: PatternCache,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvalConfig::default())
    }
}

impl Evaluator {
    /// Creates an evaluator over the built-in registry.
    #[must_use]
    pub fn new(config: EvalConfig) -> Self {
        let patterns = PatternCache::new(config.pattern_cache_capacity);
        Evaluator {
            config,
            registry: Registry::builtin(),
            patterns,
        }
    }

    /// Returns the process-wide evaluator used by the free functions.
    #[must_use]
    pub fn shared() -> &'static Evaluator {
        &SHARED
    }

    #[must_use]
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    #[must_use]
    pub fn pattern_cache(&self) -> &PatternCache {
        &self.patterns
    }

    fn context(&self) -> EvalContext<'_> {
        EvalContext::new(&self.patterns)
    }

    /// Applies a unary operator.
    ///
    /// # Errors
    ///
    /// - [`EvalError::TypeMismatch`] if `values` is not of `operand_type`
    /// - [`EvalError::UnsupportedSignature`] if no signature matches
    /// - any error raised by the kernel
    pub fn unary_eval(
        &self,
        op: Operator,
        operand_type: ScalarType,
        values: &ColumnVector,
    ) -> Result<(ColumnVector, ScalarType)> {
        check_type(operand_type, values)?;
        let Some(sig) = self.registry.resolve_unary(op, operand_type) else {
            return Err(unsupported(op, &[operand_type]));
        };
        tracing::trace!(target: LOG_TARGET, %op, operand = %operand_type, ret = %sig.ret, "resolved unary signature");
        let out = (sig.kernel)(&self.context(), values, sig.ret)?;
        Ok((out, sig.ret))
    }

    /// Applies a binary operator.
    ///
    /// For `Typecast` the right operand only carries the target type; an
    /// empty vector of that type is enough.
    ///
    /// # Errors
    ///
    /// - [`EvalError::TypeMismatch`] if an operand is not of its declared type
    /// - [`EvalError::UnsupportedSignature`] if no signature matches, even
    ///   after promotion
    /// - any error raised by the kernel, including [`EvalError::DivisionByZero`]
    ///   and [`EvalError::ZeroModulus`]
    pub fn binary_eval(
        &self,
        op: Operator,
        left_type: ScalarType,
        right_type: ScalarType,
        left: &ColumnVector,
        right: &ColumnVector,
    ) -> Result<(ColumnVector, ScalarType)> {
        check_type(left_type, left)?;
        check_type(right_type, right)?;

        if let Some(sig) = self.registry.resolve_binary(op, left_type, right_type) {
            tracing::trace!(
                target: LOG_TARGET,
                %op,
                left = %left_type,
                right = %right_type,
                ret = %sig.ret,
                "resolved binary signature"
            );
            return self.invoke_binary(sig, left, right);
        }

        if let Some(common) = self.promotion_target(op, left_type, right_type) {
            if let Some(sig) = self.registry.resolve_binary(op, common, common) {
                tracing::debug!(
                    target: LOG_TARGET,
                    %op,
                    left = %left_type,
                    right = %right_type,
                    common = %common,
                    "promoting operands"
                );
                let left = self.convert(left, common)?;
                let right = self.convert(right, common)?;
                return self.invoke_binary(sig, &left, &right);
            }
        }

        Err(unsupported(op, &[left_type, right_type]))
    }

    /// Applies a variadic operator to operands that all share one type.
    ///
    /// # Errors
    ///
    /// - [`EvalError::TypeMismatch`] if an operand is not of `operand_type`
    /// - [`EvalError::UnsupportedSignature`] if no signature accepts the
    ///   type and operand count
    /// - any error raised by the kernel
    pub fn multi_eval(
        &self,
        op: Operator,
        operand_type: ScalarType,
        values: &[ColumnVector],
    ) -> Result<(ColumnVector, ScalarType)> {
        for v in values {
            check_type(operand_type, v)?;
        }
        let Some(sig) = self.registry.resolve_multi(op, operand_type, values.len()) else {
            return Err(unsupported(op, &[operand_type]));
        };
        tracing::trace!(
            target: LOG_TARGET,
            %op,
            operand = %operand_type,
            count = values.len(),
            ret = %sig.ret,
            "resolved variadic signature"
        );
        let out = (sig.kernel)(&self.context(), values, sig.ret)?;
        Ok((out, sig.ret))
    }

    fn invoke_binary(
        &self,
        sig: &BinarySignature,
        left: &ColumnVector,
        right: &ColumnVector,
    ) -> Result<(ColumnVector, ScalarType)> {
        let out = (sig.kernel)(&self.context(), left, right, sig.ret)?;
        Ok((out, sig.ret))
    }

    fn promotion_target(
        &self,
        op: Operator,
        left: ScalarType,
        right: ScalarType,
    ) -> Option<ScalarType> {
        if !self.config.implicit_promotion
            || left == right
            || !(op.is_arithmetic() || op.is_comparison())
            || !left.is_numeric()
            || !right.is_numeric()
        {
            return None;
        }
        promote(left, right)
    }

    /// Runs the registered `Typecast` kernel for `vector -> target`.
    fn convert(&self, vector: &ColumnVector, target: ScalarType) -> Result<ColumnVector> {
        let source = vector.scalar_type();
        let sig = self
            .registry
            .resolve_binary(Operator::Typecast, source, target)
            .ok_or_else(|| unsupported(Operator::Typecast, &[source, target]))?;
        (sig.kernel)(&self.context(), vector, &ColumnVector::empty(target), sig.ret)
    }
}

fn check_type(declared: ScalarType, vector: &ColumnVector) -> Result<()> {
    if vector.scalar_type() == declared {
        Ok(())
    } else {
        Err(EvalError::type_mismatch(declared, vector.scalar_type()))
    }
}

fn unsupported(op: Operator, types: &[ScalarType]) -> EvalError {
    let err = EvalError::unsupported(op, types);
    tracing::debug!(target: LOG_TARGET, error = %err, "unsupported signature");
    err
}

/// [`Evaluator::unary_eval`] on the shared evaluator.
///
/// # Errors
///
/// See [`Evaluator::unary_eval`].
pub fn unary_eval(
    op: Operator,
    operand_type: ScalarType,
    values: &ColumnVector,
) -> Result<(ColumnVector, ScalarType)> {
    Evaluator::shared().unary_eval(op, operand_type, values)
}

/// [`Evaluator::binary_eval`] on the shared evaluator.
///
/// # Errors
///
/// See [`Evaluator::binary_eval`].
pub fn binary_eval(
    op: Operator,
    left_type: ScalarType,
    right_type: ScalarType,
    left: &ColumnVector,
    right: &ColumnVector,
) -> Result<(ColumnVector, ScalarType)> {
    Evaluator::shared().binary_eval(op, left_type, right_type, left, right)
}

/// [`Evaluator::multi_eval`] on the shared evaluator.
///
/// # Errors
///
/// See [`Evaluator::multi_eval`].
pub fn multi_eval(
    op: Operator,
    operand_type: ScalarType,
    values: &[ColumnVector],
) -> Result<(ColumnVector, ScalarType)> {
    Evaluator::shared().multi_eval(op, operand_type, values)
}
