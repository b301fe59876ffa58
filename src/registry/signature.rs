//! Overload signatures: operand types, return type and kernel.

use std::fmt;

use crate::kernels::{BinaryKernel, MultiKernel, UnaryKernel};
use crate::types::ScalarType;

/// Upper operand-count bound meaning "no limit".
pub const UNBOUNDED: usize = usize::MAX;

/// Operand type a unary signature accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMatch {
    Exact(ScalarType),
    /// Any operand type; the kernel inspects it at runtime.
    Any,
}

impl TypeMatch {
    #[must_use]
    pub fn accepts(self, ty: ScalarType) -> bool {
        match self {
            TypeMatch::Exact(expected) => expected == ty,
            TypeMatch::Any => true,
        }
    }
}

/// One implementation of a unary operator.
#[derive(Clone, Copy)]
pub struct UnarySignature {
    pub operand: TypeMatch,
    pub ret: ScalarType,
    pub kernel: UnaryKernel,
}

/// One implementation of a binary operator.
#[derive(Clone, Copy)]
pub struct BinarySignature {
    pub left: ScalarType,
    pub right: ScalarType,
    pub ret: ScalarType,
    pub kernel: BinaryKernel,
}

/// One implementation of a variadic operator.
///
/// Every operand has type `operand`; their count must lie in
/// `min..=max`, where `max` may be [`UNBOUNDED`].
#[derive(Clone, Copy)]
pub struct MultiSignature {
    pub operand: ScalarType,
    pub min: usize,
    pub max: usize,
    pub ret: ScalarType,
    pub kernel: MultiKernel,
}

impl MultiSignature {
    /// Returns true if `count` operands are accepted.
    #[must_use]
    pub fn accepts_count(&self, count: usize) -> bool {
        count >= self.min && (self.max == UNBOUNDED || count <= self.max)
    }
}

impl fmt::Debug for UnarySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnarySignature")
            .field("operand", &self.operand)
            .field("ret", &self.ret)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for BinarySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinarySignature")
            .field("left", &self.left)
            .field("right", &self.right)
            .field("ret", &self.ret)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for MultiSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiSignature")
            .field("operand", &self.operand)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("ret", &self.ret)
            .finish_non_exhaustive()
    }
}
