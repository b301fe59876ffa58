//! Operator registry.
//!
//! Maps every operator to its overload set, kept separately for unary,
//! binary and variadic operators. The built-in registry is assembled once
//! on first use and never changes afterwards.

mod builtin;
mod operator;
mod signature;

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::kernels::{BinaryKernel, MultiKernel, UnaryKernel};
use crate::types::ScalarType;

pub use operator::Operator;
pub use signature::{BinarySignature, MultiSignature, TypeMatch, UnarySignature, UNBOUNDED};

static BUILTIN: Lazy<Registry> = Lazy::new(builtin::build);

/// Overload sets for every operator.
#[derive(Debug, Default)]
pub struct Registry {
    unary: HashMap<Operator, Vec<UnarySignature>>,
    binary: HashMap<Operator, Vec<BinarySignature>>,
    multi: HashMap<Operator, Vec<MultiSignature>>,
}

impl Registry {
    /// Returns the process-wide registry of built-in operators.
    #[must_use]
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    pub(crate) fn add_unary(
        &mut self,
        op: Operator,
        operand: TypeMatch,
        ret: ScalarType,
        kernel: UnaryKernel,
    ) {
        self.unary.entry(op).or_default().push(UnarySignature {
            operand,
            ret,
            kernel,
        });
    }

    pub(crate) fn add_binary(
        &mut self,
        op: Operator,
        left: ScalarType,
        right: ScalarType,
        ret: ScalarType,
        kernel: BinaryKernel,
    ) {
        self.binary.entry(op).or_default().push(BinarySignature {
            left,
            right,
            ret,
            kernel,
        });
    }

    pub(crate) fn add_multi(
        &mut self,
        op: Operator,
        operand: ScalarType,
        (min, max): (usize, usize),
        ret: ScalarType,
        kernel: MultiKernel,
    ) {
        self.multi.entry(op).or_default().push(MultiSignature {
            operand,
            min,
            max,
            ret,
            kernel,
        });
    }

    /// First unary signature of `op` accepting `operand`.
    #[must_use]
    pub fn resolve_unary(&self, op: Operator, operand: ScalarType) -> Option<&UnarySignature> {
        self.unary_signatures(op)
            .iter()
            .find(|sig| sig.operand.accepts(operand))
    }

    /// First binary signature of `op` for exactly `(left, right)`.
    #[must_use]
    pub fn resolve_binary(
        &self,
        op: Operator,
        left: ScalarType,
        right: ScalarType,
    ) -> Option<&BinarySignature> {
        self.binary_signatures(op)
            .iter()
            .find(|sig| sig.left == left && sig.right == right)
    }

    /// First variadic signature of `op` for `count` operands of `operand`.
    #[must_use]
    pub fn resolve_multi(
        &self,
        op: Operator,
        operand: ScalarType,
        count: usize,
    ) -> Option<&MultiSignature> {
        self.multi_signatures(op)
            .iter()
            .find(|sig| sig.operand == operand && sig.accepts_count(count))
    }

    /// Unary overload set of `op`, in registration order.
    #[must_use]
    pub fn unary_signatures(&self, op: Operator) -> &[UnarySignature] {
        self.unary.get(&op).map(Vec::as_slice).unwrap_or_default()
    }

    /// Binary overload set of `op`, in registration order.
    #[must_use]
    pub fn binary_signatures(&self, op: Operator) -> &[BinarySignature] {
        self.binary.get(&op).map(Vec::as_slice).unwrap_or_default()
    }

    /// Variadic overload set of `op`, in registration order.
    #[must_use]
    pub fn multi_signatures(&self, op: Operator) -> &[MultiSignature] {
        self.multi.get(&op).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of (unary, binary, variadic) signatures.
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.unary.values().map(Vec::len).sum(),
            self.binary.values().map(Vec::len).sum(),
            self.multi.values().map(Vec::len).sum(),
        )
    }
}
