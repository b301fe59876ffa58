//! Built-in overload sets.

use crate::cast;
use crate::kernels::arith::{self, Arithmetic};
use crate::kernels::unary::{self, Negate, UnaryNumeric};
use crate::kernels::{compare, logic, string, variadic, BinaryKernel, UnaryKernel};
use crate::logging::LOG_TARGET;
use crate::types::ScalarType;
use crate::vector::Native;

use super::{Operator, Registry, TypeMatch, UNBOUNDED};

/// Calls `$register::<native>(registry, ScalarType::Variant)` for each pair.
macro_rules! register_each {
    ($reg:expr, $register:ident, [$($ty:ident => $native:ty),* $(,)?]) => {
        $( $register::<$native>($reg, ScalarType::$ty); )*
    };
}

pub(super) fn build() -> Registry {
    let mut reg = Registry::default();

    register_each!(&mut reg, register_numeric, [
        Int8 => i8, Int16 => i16, Int32 => i32, Int64 => i64, Int => i64,
        UInt8 => u8, UInt16 => u16, UInt32 => u32, UInt64 => u64,
        Float32 => f32, Float64 => f64, Float => f64,
    ]);
    register_each!(&mut reg, register_negate, [
        Int8 => i8, Int16 => i16, Int32 => i32, Int64 => i64, Int => i64,
        Float32 => f32, Float64 => f64, Float => f64,
    ]);
    register_each!(&mut reg, register_ordered, [
        Int8 => i8, Int16 => i16, Int32 => i32, Int64 => i64, Int => i64,
        UInt8 => u8, UInt16 => u16, UInt32 => u32, UInt64 => u64,
        Float32 => f32, Float64 => f64, Float => f64,
        Bool => bool, Timestamp => i64, String => String,
    ]);

    register_logic(&mut reg);
    register_strings(&mut reg);
    register_casts(&mut reg);
    reg.add_unary(
        Operator::Typeof,
        TypeMatch::Any,
        ScalarType::String,
        unary::type_of,
    );

    let (unary, binary, multi) = reg.counts();
    tracing::debug!(target: LOG_TARGET, unary, binary, multi, "built operator registry");
    reg
}

fn register_numeric<T: Arithmetic + UnaryNumeric>(reg: &mut Registry, ty: ScalarType) {
    let binary_ops: [(Operator, BinaryKernel); 5] = [
        (Operator::Plus, arith::add::<T>),
        (Operator::Minus, arith::sub::<T>),
        (Operator::Mult, arith::mul::<T>),
        (Operator::Div, arith::div::<T>),
        (Operator::Mod, arith::rem::<T>),
    ];
    for (op, kernel) in binary_ops {
        reg.add_binary(op, ty, ty, ty, kernel);
    }

    let unary_ops: [(Operator, UnaryKernel); 5] = [
        (Operator::Abs, unary::abs::<T>),
        (Operator::Ceil, unary::ceil::<T>),
        (Operator::Floor, unary::floor::<T>),
        (Operator::Round, unary::round::<T>),
        (Operator::Sign, unary::sign::<T>),
    ];
    for (op, kernel) in unary_ops {
        reg.add_unary(op, TypeMatch::Exact(ty), ty, kernel);
    }
}

fn register_negate<T: Negate>(reg: &mut Registry, ty: ScalarType) {
    reg.add_unary(Operator::Minus, TypeMatch::Exact(ty), ty, unary::negate::<T>);
}

/// Comparisons and the value-picking variadics, which only need an order.
fn register_ordered<T: Native>(reg: &mut Registry, ty: ScalarType) {
    let comparisons: [(Operator, BinaryKernel); 6] = [
        (Operator::Eq, compare::eq::<T>),
        (Operator::Ne, compare::ne::<T>),
        (Operator::Lt, compare::lt::<T>),
        (Operator::Le, compare::le::<T>),
        (Operator::Gt, compare::gt::<T>),
        (Operator::Ge, compare::ge::<T>),
    ];
    for (op, kernel) in comparisons {
        reg.add_binary(op, ty, ty, ScalarType::Bool, kernel);
    }

    reg.add_multi(Operator::Coalesce, ty, (1, UNBOUNDED), ty, variadic::coalesce::<T>);
    reg.add_multi(Operator::Greatest, ty, (1, UNBOUNDED), ty, variadic::greatest::<T>);
    reg.add_multi(Operator::Least, ty, (1, UNBOUNDED), ty, variadic::least::<T>);
}

fn register_logic(reg: &mut Registry) {
    let bool_ty = ScalarType::Bool;
    reg.add_binary(Operator::And, bool_ty, bool_ty, bool_ty, logic::and);
    reg.add_binary(Operator::Or, bool_ty, bool_ty, bool_ty, logic::or);
    reg.add_unary(Operator::Not, TypeMatch::Exact(bool_ty), bool_ty, unary::not);
}

fn register_strings(reg: &mut Registry) {
    let text = ScalarType::String;
    reg.add_binary(Operator::Concat, text, text, text, string::concat);
    reg.add_multi(Operator::Concat, text, (1, UNBOUNDED), text, variadic::concat);

    let patterns: [(Operator, BinaryKernel); 4] = [
        (Operator::Like, string::like),
        (Operator::NotLike, string::not_like),
        (Operator::Match, string::regex_match),
        (Operator::NotMatch, string::not_regex_match),
    ];
    for (op, kernel) in patterns {
        reg.add_binary(op, text, text, ScalarType::Bool, kernel);
    }
}

fn register_casts(reg: &mut Registry) {
    for source in ScalarType::ALL {
        for target in ScalarType::ALL {
            reg.add_binary(
                Operator::Typecast,
                source,
                target,
                target,
                cast::kernel_for(source, target),
            );
        }
    }
}
