//! Built-in free functions: trigonometry, exponentials, common math,
//! vector math, and the two per-fragment info functions.
//!
//! Grounded on `OpenGL.Compiler.cpp::print_function`'s `function_names`
//! table, which fixes the exact name and arity of every entry below.

use shade_core::{AstNode, BuiltinFn, NodeKind, TypeTag};

use crate::scalar::{Bool, Float};
use crate::value::{operand_owned, Repr, ShadeValue};
use crate::vector::VectorValue;

fn call1<T: ShadeValue>(func: BuiltinFn, a: T) -> T {
    let ty = T::tag();
    let node = AstNode::builtin_call(ty, func).with_child(operand_owned(a));
    T::from_repr(Repr::temp(ty, node))
}

fn call2<T: ShadeValue>(func: BuiltinFn, a: T, b: T) -> T {
    let ty = T::tag();
    let node = AstNode::builtin_call(ty, func)
        .with_child(operand_owned(a))
        .with_child(operand_owned(b));
    T::from_repr(Repr::temp(ty, node))
}

fn call3<T: ShadeValue>(func: BuiltinFn, a: T, b: T, c: T) -> T {
    let ty = T::tag();
    let node = AstNode::builtin_call(ty, func)
        .with_child(operand_owned(a))
        .with_child(operand_owned(b))
        .with_child(operand_owned(c));
    T::from_repr(Repr::temp(ty, node))
}

macro_rules! unary_fn {
    ($fn_name:ident, $tag:expr) => {
        pub fn $fn_name<T: ShadeValue>(a: T) -> T {
            call1($tag, a)
        }
    };
}

unary_fn!(sin, BuiltinFn::Sin);
unary_fn!(cos, BuiltinFn::Cos);
unary_fn!(tan, BuiltinFn::Tan);
unary_fn!(asin, BuiltinFn::Asin);
unary_fn!(acos, BuiltinFn::Acos);
unary_fn!(atan, BuiltinFn::Atan);
unary_fn!(sinh, BuiltinFn::Sinh);
unary_fn!(cosh, BuiltinFn::Cosh);
unary_fn!(tanh, BuiltinFn::Tanh);
unary_fn!(asinh, BuiltinFn::Asinh);
unary_fn!(acosh, BuiltinFn::Acosh);
unary_fn!(atanh, BuiltinFn::Atanh);
unary_fn!(exp, BuiltinFn::Exp);
unary_fn!(log, BuiltinFn::Log);
unary_fn!(exp2, BuiltinFn::Exp2);
unary_fn!(log2, BuiltinFn::Log2);
unary_fn!(sqrt, BuiltinFn::Sqrt);
unary_fn!(abs, BuiltinFn::Abs);
unary_fn!(sign, BuiltinFn::Sign);
unary_fn!(floor, BuiltinFn::Floor);
unary_fn!(ceil, BuiltinFn::Ceil);

pub fn pow<T: ShadeValue>(base: T, exponent: T) -> T {
    call2(BuiltinFn::Pow, base, exponent)
}

pub fn min<T: ShadeValue>(a: T, b: T) -> T {
    call2(BuiltinFn::Min, a, b)
}

pub fn max<T: ShadeValue>(a: T, b: T) -> T {
    call2(BuiltinFn::Max, a, b)
}

pub fn clamp<T: ShadeValue>(x: T, lo: T, hi: T) -> T {
    call3(BuiltinFn::Clamp, x, lo, hi)
}

/// `isnan`/`isinf` are validity checks on a single float; the source's
/// table fixes their result type implicitly to whatever the target's
/// built-in returns for a scalar float (a boolean), so this crate exposes
/// them only for `Float`, matching every call site in the retrieval pack.
pub fn isnan(a: Float) -> Bool {
    let node = AstNode::builtin_call(TypeTag::BOOL, BuiltinFn::IsNan).with_child(operand_owned(a));
    Bool::from_repr(Repr::temp(TypeTag::BOOL, node))
}

pub fn isinf(a: Float) -> Bool {
    let node = AstNode::builtin_call(TypeTag::BOOL, BuiltinFn::IsInf).with_child(operand_owned(a));
    Bool::from_repr(Repr::temp(TypeTag::BOOL, node))
}

pub fn length<V: VectorValue>(v: V) -> V::Scalar {
    let ty = V::Scalar::tag();
    let node = AstNode::builtin_call(ty, BuiltinFn::Length).with_child(operand_owned(v));
    V::Scalar::from_repr(Repr::temp(ty, node))
}

pub fn distance<V: VectorValue>(a: V, b: V) -> V::Scalar {
    let ty = V::Scalar::tag();
    let node = AstNode::builtin_call(ty, BuiltinFn::Distance)
        .with_child(operand_owned(a))
        .with_child(operand_owned(b));
    V::Scalar::from_repr(Repr::temp(ty, node))
}

pub fn dot<V: VectorValue>(a: V, b: V) -> V::Scalar {
    let ty = V::Scalar::tag();
    let node = AstNode::builtin_call(ty, BuiltinFn::Dot)
        .with_child(operand_owned(a))
        .with_child(operand_owned(b));
    V::Scalar::from_repr(Repr::temp(ty, node))
}

/// Cross product: only well-defined for 3-wide vectors, so this is not
/// generic over `VectorValue` the way `dot`/`length` are.
pub fn cross(a: crate::vector::Float3, b: crate::vector::Float3) -> crate::vector::Float3 {
    call2(BuiltinFn::Cross, a, b)
}

pub fn normalize<V: VectorValue>(v: V) -> V {
    call1(BuiltinFn::Normalize, v)
}

/// The integer pixel/work-item coordinate (spec.md §4.3/§4.6's `GetIndex`).
pub fn index() -> crate::vector::Int2 {
    let node = AstNode::new(NodeKind::GetIndex, TypeTag::INT2);
    crate::vector::Int2::from_repr(Repr::temp(TypeTag::INT2, node))
}

/// The normalized `[0, 1]^2` fragment coordinate (`GetNormalizedIndex`).
pub fn normalized_index() -> crate::vector::Float2 {
    let node = AstNode::new(NodeKind::GetNormalizedIndex, TypeTag::FLOAT2);
    crate::vector::Float2::from_repr(Repr::temp(TypeTag::FLOAT2, node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shade_core::capture;

    fn in_fresh_main<R>(f: impl FnOnce() -> R) -> R {
        capture::begin_capture();
        capture::open_block(NodeKind::ConstData, TypeTag::VOID);
        capture::close_block();
        capture::open_block(NodeKind::OutData, TypeTag::VOID);
        capture::close_block();
        capture::open_block(NodeKind::Main, TypeTag::VOID);
        let r = f();
        capture::close_block();
        let _ = capture::end_capture();
        r
    }

    #[test]
    fn sqrt_preserves_type() {
        in_fresh_main(|| {
            let v = sqrt(Float::new(4.0));
            assert_eq!(v.repr().ty(), TypeTag::FLOAT);
        });
    }

    #[test]
    fn index_is_int2() {
        in_fresh_main(|| {
            let i = index();
            assert_eq!(i.repr().ty(), TypeTag::INT2);
        });
    }
}
