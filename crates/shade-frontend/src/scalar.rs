//! The four scalar wrapper types: `Bool`, `Int`, `UInt`, `Float`.
//!
//! Grounded on `Interfaces.h`'s `Const<T>`/`Out<T>`/`Member<T,P>` templates,
//! rendered as plain Rust structs with `std::ops` operator impls instead of
//! C++ operator overloading (DESIGN.md Open Question 1/6/7). Comparisons and
//! logical `&&`/`||` are exposed as methods rather than operator traits --
//! Rust's `PartialOrd`/`PartialEq` must return real `bool`, and `&&`/`||`
//! are not overloadable tokens at all (spec.md §9's "builder methods like
//! `a.add(b)`" is the prescribed fallback for exactly this case).

use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub};

use shade_core::{AstNode, LiteralValue, NodeKind, SymbolId, TypeTag};

use crate::value::{binary_owned, binary_ref, unary_owned, unary_ref, Repr, ShadeValue};

macro_rules! scalar_type {
    ($name:ident, $tag:expr) => {
        #[derive(Debug)]
        pub struct $name {
            pub(crate) repr: Repr,
        }

        impl ShadeValue for $name {
            fn tag() -> TypeTag {
                $tag
            }
            fn from_repr(repr: Repr) -> Self {
                $name { repr }
            }
            fn repr(&self) -> &Repr {
                &self.repr
            }
            fn repr_mut(&mut self) -> &mut Repr {
                &mut self.repr
            }
            fn into_repr(self) -> Repr {
                self.repr
            }
        }

        impl $name {
            /// A fresh, not-yet-declared local (spec.md §3: "a fresh
            /// (id = `invalid`) value"). The first `.assign()` to it
            /// allocates a symbol and the emitter prints a declaration.
            pub fn fresh() -> Self {
                $name {
                    repr: Repr::fresh($tag),
                }
            }

            /// Assigns `rhs` to this value (`lhs = rhs`). Equivalent to
            /// C++'s `operator=`, which Rust cannot overload for plain
            /// assignment (DESIGN.md Open Question 6).
            pub fn assign(&mut self, rhs: $name) {
                self.repr.assign(rhs.repr.into_operand());
            }

            pub(crate) fn named(id: SymbolId) -> Self {
                $name {
                    repr: Repr::named($tag, id),
                }
            }
        }
    };
}

scalar_type!(Bool, TypeTag::BOOL);
scalar_type!(Int, TypeTag::INT);
scalar_type!(UInt, TypeTag::UINT);
scalar_type!(Float, TypeTag::FLOAT);

impl Bool {
    pub fn new(value: bool) -> Bool {
        Bool {
            repr: Repr::temp(
                TypeTag::BOOL,
                AstNode::literal(NodeKind::Literal, LiteralValue::Bool(value)),
            ),
        }
    }

    pub fn and(self, rhs: Bool) -> Bool {
        binary_owned(NodeKind::LogicalAnd, self, rhs)
    }

    pub fn and_ref(&self, rhs: &Bool) -> Bool {
        binary_ref(NodeKind::LogicalAnd, self, rhs)
    }

    pub fn or(self, rhs: Bool) -> Bool {
        binary_owned(NodeKind::LogicalOr, self, rhs)
    }

    pub fn or_ref(&self, rhs: &Bool) -> Bool {
        binary_ref(NodeKind::LogicalOr, self, rhs)
    }
}

impl Not for Bool {
    type Output = Bool;
    fn not(self) -> Bool {
        unary_owned(NodeKind::LogicalNot, self)
    }
}

impl Not for &Bool {
    type Output = Bool;
    fn not(self) -> Bool {
        unary_ref(NodeKind::LogicalNot, self)
    }
}

impl Int {
    pub fn new(value: i32) -> Int {
        Int {
            repr: Repr::temp(
                TypeTag::INT,
                AstNode::literal(NodeKind::Literal, LiteralValue::Int(value)),
            ),
        }
    }
}

impl UInt {
    pub fn new(value: u32) -> UInt {
        UInt {
            repr: Repr::temp(
                TypeTag::UINT,
                AstNode::literal(NodeKind::Literal, LiteralValue::UInt(value)),
            ),
        }
    }
}

impl Float {
    pub fn new(value: f32) -> Float {
        Float {
            repr: Repr::temp(
                TypeTag::FLOAT,
                AstNode::literal(NodeKind::Literal, LiteralValue::Float(value)),
            ),
        }
    }
}

/// Arithmetic (`+ - * /` and, for integers, `%`), comparisons as methods,
/// and `+=`/`-=`/... compound-assignment desugaring (spec.md §4.3: "lhs =
/// lhs op rhs at capture time") for one numeric scalar type.
macro_rules! numeric_scalar {
    ($name:ident, has_modulo: $has_modulo:tt) => {
        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                binary_owned(NodeKind::Add, self, rhs)
            }
        }
        impl Add for &$name {
            type Output = $name;
            fn add(self, rhs: &$name) -> $name {
                binary_ref(NodeKind::Add, self, rhs)
            }
        }
        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                binary_owned(NodeKind::Subtract, self, rhs)
            }
        }
        impl Sub for &$name {
            type Output = $name;
            fn sub(self, rhs: &$name) -> $name {
                binary_ref(NodeKind::Subtract, self, rhs)
            }
        }
        impl Mul for $name {
            type Output = $name;
            fn mul(self, rhs: $name) -> $name {
                binary_owned(NodeKind::Multiply, self, rhs)
            }
        }
        impl Mul for &$name {
            type Output = $name;
            fn mul(self, rhs: &$name) -> $name {
                binary_ref(NodeKind::Multiply, self, rhs)
            }
        }
        impl Div for $name {
            type Output = $name;
            fn div(self, rhs: $name) -> $name {
                binary_owned(NodeKind::Divide, self, rhs)
            }
        }
        impl Div for &$name {
            type Output = $name;
            fn div(self, rhs: &$name) -> $name {
                binary_ref(NodeKind::Divide, self, rhs)
            }
        }

        numeric_scalar!(@modulo $name, $has_modulo);

        impl $name {
            pub fn eq(&self, rhs: &$name) -> Bool {
                binary_ref(NodeKind::Equal, self, rhs)
            }
            pub fn ne(&self, rhs: &$name) -> Bool {
                binary_ref(NodeKind::NotEqual, self, rhs)
            }
            pub fn lt(&self, rhs: &$name) -> Bool {
                binary_ref(NodeKind::Less, self, rhs)
            }
            pub fn le(&self, rhs: &$name) -> Bool {
                binary_ref(NodeKind::LessEqual, self, rhs)
            }
            pub fn gt(&self, rhs: &$name) -> Bool {
                binary_ref(NodeKind::Greater, self, rhs)
            }
            pub fn ge(&self, rhs: &$name) -> Bool {
                binary_ref(NodeKind::GreaterEqual, self, rhs)
            }

            /// `self += rhs`, desugared to `self = self + rhs` at capture
            /// time (spec.md §4.3).
            pub fn add_assign(&mut self, rhs: $name) {
                let sum: $name = binary_owned(NodeKind::Add, $name { repr: Repr::temp(Self::tag(), self.repr.read()) }, rhs);
                self.repr.assign(sum.repr.into_operand());
            }
            pub fn sub_assign(&mut self, rhs: $name) {
                let diff: $name = binary_owned(NodeKind::Subtract, $name { repr: Repr::temp(Self::tag(), self.repr.read()) }, rhs);
                self.repr.assign(diff.repr.into_operand());
            }
            pub fn mul_assign(&mut self, rhs: $name) {
                let prod: $name = binary_owned(NodeKind::Multiply, $name { repr: Repr::temp(Self::tag(), self.repr.read()) }, rhs);
                self.repr.assign(prod.repr.into_operand());
            }
            pub fn div_assign(&mut self, rhs: $name) {
                let quot: $name = binary_owned(NodeKind::Divide, $name { repr: Repr::temp(Self::tag(), self.repr.read()) }, rhs);
                self.repr.assign(quot.repr.into_operand());
            }
        }
    };
    (@modulo $name:ident, true) => {
        impl Rem for $name {
            type Output = $name;
            fn rem(self, rhs: $name) -> $name {
                binary_owned(NodeKind::Modulo, self, rhs)
            }
        }
        impl Rem for &$name {
            type Output = $name;
            fn rem(self, rhs: &$name) -> $name {
                binary_ref(NodeKind::Modulo, self, rhs)
            }
        }
        impl $name {
            pub fn rem_assign(&mut self, rhs: $name) {
                let m: $name = binary_owned(NodeKind::Modulo, $name { repr: Repr::temp(Self::tag(), self.repr.read()) }, rhs);
                self.repr.assign(m.repr.into_operand());
            }
        }
    };
    (@modulo $name:ident, false) => {};
}

numeric_scalar!(Int, has_modulo: true);
numeric_scalar!(UInt, has_modulo: true);
numeric_scalar!(Float, has_modulo: false);

impl Neg for Int {
    type Output = Int;
    fn neg(self) -> Int {
        unary_owned(NodeKind::UnaryMinus, self)
    }
}
impl Neg for &Int {
    type Output = Int;
    fn neg(self) -> Int {
        unary_ref(NodeKind::UnaryMinus, self)
    }
}
impl Neg for Float {
    type Output = Float;
    fn neg(self) -> Float {
        unary_owned(NodeKind::UnaryMinus, self)
    }
}
impl Neg for &Float {
    type Output = Float;
    fn neg(self) -> Float {
        unary_ref(NodeKind::UnaryMinus, self)
    }
}

/// Bitwise `& | ^ ~` and shifts `<< >>` for one integer scalar type
/// (spec.md §4.3: "bitwise ... (integer types)"; left operand's type is the
/// shift result type).
macro_rules! bitwise_scalar {
    ($name:ident) => {
        impl BitAnd for $name {
            type Output = $name;
            fn bitand(self, rhs: $name) -> $name {
                binary_owned(NodeKind::BitwiseAnd, self, rhs)
            }
        }
        impl BitOr for $name {
            type Output = $name;
            fn bitor(self, rhs: $name) -> $name {
                binary_owned(NodeKind::BitwiseOr, self, rhs)
            }
        }
        impl BitXor for $name {
            type Output = $name;
            fn bitxor(self, rhs: $name) -> $name {
                binary_owned(NodeKind::BitwiseXor, self, rhs)
            }
        }
        impl Not for $name {
            type Output = $name;
            fn not(self) -> $name {
                unary_owned(NodeKind::BitwiseNot, self)
            }
        }
        impl Shl<Int> for $name {
            type Output = $name;
            fn shl(self, rhs: Int) -> $name {
                binary_owned(NodeKind::LeftShift, self, rhs)
            }
        }
        impl Shr<Int> for $name {
            type Output = $name;
            fn shr(self, rhs: Int) -> $name {
                binary_owned(NodeKind::RightShift, self, rhs)
            }
        }
    };
}

bitwise_scalar!(Int);
bitwise_scalar!(UInt);

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
    fn literal_is_a_temp() {
        let v = Int::new(3);
        assert!(v.repr.symbol().is_temp());
    }

    #[test]
    fn arithmetic_produces_add_node() {
        in_fresh_main(|| {
            let sum = Int::new(1) + Int::new(2);
            assert!(sum.repr.symbol().is_temp());
        });
    }

    #[test]
    fn assigning_to_fresh_allocates_symbol() {
        in_fresh_main(|| {
            let mut x = Int::fresh();
            assert!(x.repr.symbol().is_invalid());
            x.assign(Int::new(5));
            assert!(x.repr.symbol().is_allocated());
        });
    }

    #[test]
    fn compound_assign_reads_then_reassigns_same_symbol() {
        in_fresh_main(|| {
            let mut x = Int::fresh();
            x.assign(Int::new(0));
            let sym = x.repr.symbol();
            x.add_assign(Int::new(1));
            assert_eq!(x.repr.symbol(), sym);
        });
    }
}
