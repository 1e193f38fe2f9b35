//! Vector wrapper types: `Int2`/`Int3`/`Int4`, `UInt2`/`UInt3`/`UInt4`,
//! `Float2`/`Float3`/`Float4`.
//!
//! Member access (`.x()`/`.y()`/`.z()`/`.w()`) is grounded on
//! `Interfaces.h`'s `Member<BASE,PARENT>` template: the original allocates
//! a symbol for the parent eagerly (via pointer arithmetic to find it) the
//! first time a still-unassigned vector's component is projected, so that a
//! later whole-vector or component assignment references the same symbol.
//! This crate gives the member wrapper an explicit parent reference instead
//! of pointer arithmetic (DESIGN.md's "Member back-reference" note), which
//! is why component accessors take `&mut self`.

use std::ops::{Add, Div, Mul, Neg, Sub};

use shade_core::{AstNode, NodeKind, SymbolId, TypeTag};

use crate::scalar::{Float, Int, UInt};
use crate::value::{binary_owned, binary_ref, operand_owned, unary_owned, unary_ref, Repr, ShadeValue};

/// Implemented by the vector wrapper types so builtin functions that work
/// on "some vector of some numeric kind" (`Dot`, `Length`, `Normalize`, ...)
/// can be written once generically instead of per width/element-kind.
pub trait VectorValue: ShadeValue {
    type Scalar: ShadeValue;
}

macro_rules! vector_type {
    ($name:ident, $tag:expr, $scalar:ty, $( ($comp_fn:ident, $idx:expr) ),+) => {
        #[derive(Debug)]
        pub struct $name {
            pub(crate) repr: Repr,
        }

        impl ShadeValue for $name {
            fn tag() -> TypeTag { $tag }
            fn from_repr(repr: Repr) -> Self { $name { repr } }
            fn repr(&self) -> &Repr { &self.repr }
            fn repr_mut(&mut self) -> &mut Repr { &mut self.repr }
            fn into_repr(self) -> Repr { self.repr }
        }

        impl VectorValue for $name {
            type Scalar = $scalar;
        }

        impl $name {
            /// A fresh, not-yet-declared local.
            pub fn fresh() -> Self {
                $name { repr: Repr::fresh($tag) }
            }

            pub fn assign(&mut self, rhs: $name) {
                self.repr.assign(rhs.repr.into_operand());
            }

            pub(crate) fn named(id: SymbolId) -> Self {
                $name { repr: Repr::named($tag, id) }
            }

            fn member(&mut self, index: i32) -> $scalar {
                let parent = match self.repr.symbol().is_temp() || self.repr.symbol().is_member() {
                    true => self.repr.read(),
                    false => {
                        if self.repr.symbol().is_invalid() {
                            let id = shade_core::capture::next_symbol();
                            self.repr = Repr::named($tag, id);
                        }
                        self.repr.read()
                    }
                };
                let idx_lit = AstNode::literal(NodeKind::Literal, shade_core::LiteralValue::Int(index));
                let node = AstNode::new(NodeKind::Member, <$scalar as ShadeValue>::tag())
                    .with_child(parent)
                    .with_child(idx_lit);
                <$scalar as ShadeValue>::from_repr(Repr::member(<$scalar as ShadeValue>::tag(), node))
            }

            $(
                pub fn $comp_fn(&mut self) -> $scalar {
                    self.member($idx)
                }
            )+
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name { binary_owned(NodeKind::Add, self, rhs) }
        }
        impl Add for &$name {
            type Output = $name;
            fn add(self, rhs: &$name) -> $name { binary_ref(NodeKind::Add, self, rhs) }
        }
        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name { binary_owned(NodeKind::Subtract, self, rhs) }
        }
        impl Sub for &$name {
            type Output = $name;
            fn sub(self, rhs: &$name) -> $name { binary_ref(NodeKind::Subtract, self, rhs) }
        }
        impl Mul for $name {
            type Output = $name;
            fn mul(self, rhs: $name) -> $name { binary_owned(NodeKind::Multiply, self, rhs) }
        }
        impl Mul for &$name {
            type Output = $name;
            fn mul(self, rhs: &$name) -> $name { binary_ref(NodeKind::Multiply, self, rhs) }
        }
        impl Div for $name {
            type Output = $name;
            fn div(self, rhs: $name) -> $name { binary_owned(NodeKind::Divide, self, rhs) }
        }
        impl Div for &$name {
            type Output = $name;
            fn div(self, rhs: &$name) -> $name { binary_ref(NodeKind::Divide, self, rhs) }
        }
    };
}

vector_type!(Int2, TypeTag::INT2, Int, (x, 0), (y, 1));
vector_type!(Int3, TypeTag::INT3, Int, (x, 0), (y, 1), (z, 2));
vector_type!(Int4, TypeTag::INT4, Int, (x, 0), (y, 1), (z, 2), (w, 3));

vector_type!(UInt2, TypeTag::UINT2, UInt, (x, 0), (y, 1));
vector_type!(UInt3, TypeTag::UINT3, UInt, (x, 0), (y, 1), (z, 2));
vector_type!(UInt4, TypeTag::UINT4, UInt, (x, 0), (y, 1), (z, 2), (w, 3));

vector_type!(Float2, TypeTag::FLOAT2, Float, (x, 0), (y, 1));
vector_type!(Float3, TypeTag::FLOAT3, Float, (x, 0), (y, 1), (z, 2));
vector_type!(Float4, TypeTag::FLOAT4, Float, (x, 0), (y, 1), (z, 2), (w, 3));

impl Neg for Float2 {
    type Output = Float2;
    fn neg(self) -> Float2 { unary_owned(NodeKind::UnaryMinus, self) }
}
impl Neg for &Float2 {
    type Output = Float2;
    fn neg(self) -> Float2 { unary_ref(NodeKind::UnaryMinus, self) }
}

impl Float2 {
    /// `Vec(a, b)` -- builds a `Constructor` node (spec.md §4.3).
    pub fn new(x: Float, y: Float) -> Float2 {
        let node = AstNode::new(NodeKind::Constructor, TypeTag::FLOAT2)
            .with_child(operand_owned(x))
            .with_child(operand_owned(y));
        Float2::from_repr(Repr::temp(TypeTag::FLOAT2, node))
    }
}

impl Float3 {
    pub fn new(x: Float, y: Float, z: Float) -> Float3 {
        let node = AstNode::new(NodeKind::Constructor, TypeTag::FLOAT3)
            .with_child(operand_owned(x))
            .with_child(operand_owned(y))
            .with_child(operand_owned(z));
        Float3::from_repr(Repr::temp(TypeTag::FLOAT3, node))
    }
}

impl Float4 {
    pub fn new(x: Float, y: Float, z: Float, w: Float) -> Float4 {
        let node = AstNode::new(NodeKind::Constructor, TypeTag::FLOAT4)
            .with_child(operand_owned(x))
            .with_child(operand_owned(y))
            .with_child(operand_owned(z))
            .with_child(operand_owned(w));
        Float4::from_repr(Repr::temp(TypeTag::FLOAT4, node))
    }
}

impl Int2 {
    pub fn new(x: Int, y: Int) -> Int2 {
        let node = AstNode::new(NodeKind::Constructor, TypeTag::INT2)
            .with_child(operand_owned(x))
            .with_child(operand_owned(y));
        Int2::from_repr(Repr::temp(TypeTag::INT2, node))
    }
}

impl Int3 {
    pub fn new(x: Int, y: Int, z: Int) -> Int3 {
        let node = AstNode::new(NodeKind::Constructor, TypeTag::INT3)
            .with_child(operand_owned(x))
            .with_child(operand_owned(y))
            .with_child(operand_owned(z));
        Int3::from_repr(Repr::temp(TypeTag::INT3, node))
    }
}

impl Int4 {
    pub fn new(x: Int, y: Int, z: Int, w: Int) -> Int4 {
        let node = AstNode::new(NodeKind::Constructor, TypeTag::INT4)
            .with_child(operand_owned(x))
            .with_child(operand_owned(y))
            .with_child(operand_owned(z))
            .with_child(operand_owned(w));
        Int4::from_repr(Repr::temp(TypeTag::INT4, node))
    }
}

impl UInt2 {
    pub fn new(x: UInt, y: UInt) -> UInt2 {
        let node = AstNode::new(NodeKind::Constructor, TypeTag::UINT2)
            .with_child(operand_owned(x))
            .with_child(operand_owned(y));
        UInt2::from_repr(Repr::temp(TypeTag::UINT2, node))
    }
}

impl UInt3 {
    pub fn new(x: UInt, y: UInt, z: UInt) -> UInt3 {
        let node = AstNode::new(NodeKind::Constructor, TypeTag::UINT3)
            .with_child(operand_owned(x))
            .with_child(operand_owned(y))
            .with_child(operand_owned(z));
        UInt3::from_repr(Repr::temp(TypeTag::UINT3, node))
    }
}

impl UInt4 {
    pub fn new(x: UInt, y: UInt, z: UInt, w: UInt) -> UInt4 {
        let node = AstNode::new(NodeKind::Constructor, TypeTag::UINT4)
            .with_child(operand_owned(x))
            .with_child(operand_owned(y))
            .with_child(operand_owned(z))
            .with_child(operand_owned(w));
        UInt4::from_repr(Repr::temp(TypeTag::UINT4, node))
    }
}
