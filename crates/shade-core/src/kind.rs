//! Closed sets of semantic tags: AST node kinds, the result-type bit flags,
//! and the built-in function catalog.

use bitflags::bitflags;
use std::fmt;

/// What an [`crate::node::AstNode`] represents.
///
/// Variant order mirrors the source enumeration this crate's AST lowering
/// is grounded on, grouped by role: structural, declarations, arithmetic,
/// comparison, logical, bitwise, shift, and the remaining expression forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of a finished capture; exactly three children: ConstData,
    /// OutData, Main.
    Program,
    /// Block holding `ConstVar` declarations.
    ConstData,
    /// Block holding `OutVar` declarations.
    OutData,
    /// The captured body of the program.
    Main,

    /// An ordinary nested statement block (loop/branch body).
    Block,
    If,
    ElseIf,
    Else,
    While,
    ForInRange,

    /// Declares a writable output; carries a symbol id.
    OutVar,
    /// Declares a read-only input; carries a symbol id.
    ConstVar,
    /// References a previously-declared (or about-to-be-declared) symbol.
    Var,
    /// A literal constant.
    Literal,
    /// `lhs = rhs`; left child is the assignment target.
    Assignment,

    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    LogicalAnd,
    LogicalOr,
    LogicalNot,

    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseNot,

    LeftShift,
    RightShift,

    UnaryMinus,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,

    /// Builds a vector/composite value from its children.
    Constructor,
    /// Converts a child's element type.
    Cast,
    /// A built-in function call; first child is a literal function-id tag.
    Function,
    Sample1D,
    Sample2D,
    /// `.x`/`.y`/`.z`/`.w`; exactly two children (parent, literal index).
    Member,
    GetIndex,
    GetNormalizedIndex,
}

impl NodeKind {
    /// True for the three binary-comparison-and-logical families that the
    /// emitter parenthesizes the same way as arithmetic.
    pub fn is_binary_operator(self) -> bool {
        matches!(
            self,
            NodeKind::Equal
                | NodeKind::NotEqual
                | NodeKind::Greater
                | NodeKind::GreaterEqual
                | NodeKind::Less
                | NodeKind::LessEqual
                | NodeKind::LogicalAnd
                | NodeKind::LogicalOr
                | NodeKind::BitwiseAnd
                | NodeKind::BitwiseOr
                | NodeKind::BitwiseXor
                | NodeKind::LeftShift
                | NodeKind::RightShift
                | NodeKind::Add
                | NodeKind::Subtract
                | NodeKind::Multiply
                | NodeKind::Divide
                | NodeKind::Modulo
        )
    }

    pub fn is_unary_operator(self) -> bool {
        matches!(
            self,
            NodeKind::LogicalNot | NodeKind::BitwiseNot | NodeKind::UnaryMinus
        )
    }

    /// True for the block-opening statement kinds that push a frame onto the
    /// capture context's block stack.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            NodeKind::Program
                | NodeKind::ConstData
                | NodeKind::OutData
                | NodeKind::Main
                | NodeKind::Block
                | NodeKind::If
                | NodeKind::ElseIf
                | NodeKind::Else
                | NodeKind::While
                | NodeKind::ForInRange
        )
    }
}

bitflags! {
    /// A composite return-type tag.
    ///
    /// Scalar and vector element kinds each occupy one bit. Buffer
    /// declarations OR a dimensionality flag (`BUFFER1D`/`BUFFER2D`) on top
    /// of the element flag they hold; the emitter masks the dimensionality
    /// bit off to recover the element type (see
    /// [`TypeTag::element`]/[`TypeTag::buffer_dim`]).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeTag: u32 {
        const VOID   = 1 << 0;
        const BOOL   = 1 << 1;
        const INT    = 1 << 2;
        const UINT   = 1 << 3;
        const FLOAT  = 1 << 4;
        const INT2   = 1 << 5;
        const UINT2  = 1 << 6;
        const FLOAT2 = 1 << 7;
        const INT3   = 1 << 8;
        const UINT3  = 1 << 9;
        const FLOAT3 = 1 << 10;
        const INT4   = 1 << 11;
        const UINT4  = 1 << 12;
        const FLOAT4 = 1 << 13;

        const BUFFER1D = 1 << 30;
        const BUFFER2D = 1 << 31;
    }
}

/// Element kinds that can occupy a scalar or vector component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Bool,
    Int,
    UInt,
    Float,
}

/// 1, 2, 3, or 4 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    One,
    Two,
    Three,
    Four,
}

impl TypeTag {
    const DIMENSIONALITY: TypeTag = TypeTag::BUFFER1D.union(TypeTag::BUFFER2D);

    /// Returns the 1D/2D dimensionality this tag carries, if it is a buffer
    /// type at all.
    pub fn buffer_dim(self) -> Option<Width> {
        if self.contains(TypeTag::BUFFER1D) {
            Some(Width::One)
        } else if self.contains(TypeTag::BUFFER2D) {
            Some(Width::Two)
        } else {
            None
        }
    }

    /// Masks the dimensionality flag off, returning the underlying element
    /// type tag. For a non-buffer tag this is a no-op.
    pub fn element(self) -> TypeTag {
        self & !Self::DIMENSIONALITY
    }

    pub fn is_buffer(self) -> bool {
        self.intersects(Self::DIMENSIONALITY)
    }

    /// The scalar element kind a (possibly vector, possibly buffer) tag is
    /// built from, or `None` for `VOID`.
    pub fn element_kind(self) -> Option<ElementKind> {
        let e = self.element();
        if e.intersects(TypeTag::BOOL) {
            Some(ElementKind::Bool)
        } else if e.intersects(TypeTag::INT | TypeTag::INT2 | TypeTag::INT3 | TypeTag::INT4) {
            Some(ElementKind::Int)
        } else if e.intersects(TypeTag::UINT | TypeTag::UINT2 | TypeTag::UINT3 | TypeTag::UINT4) {
            Some(ElementKind::UInt)
        } else if e.intersects(TypeTag::FLOAT | TypeTag::FLOAT2 | TypeTag::FLOAT3 | TypeTag::FLOAT4)
        {
            Some(ElementKind::Float)
        } else {
            None
        }
    }

    /// The component width (1 for scalars) of a (possibly buffer) tag.
    pub fn width(self) -> Width {
        let e = self.element();
        if e.intersects(TypeTag::INT2 | TypeTag::UINT2 | TypeTag::FLOAT2) {
            Width::Two
        } else if e.intersects(TypeTag::INT3 | TypeTag::UINT3 | TypeTag::FLOAT3) {
            Width::Three
        } else if e.intersects(TypeTag::INT4 | TypeTag::UINT4 | TypeTag::FLOAT4) {
            Width::Four
        } else {
            Width::One
        }
    }
}

/// Built-in free functions, matching the emitter's name/arity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFn {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Pow,
    Exp,
    Log,
    Exp2,
    Log2,
    Sqrt,
    Abs,
    Sign,
    Floor,
    Ceil,
    Min,
    Max,
    Clamp,
    IsNan,
    IsInf,
    Length,
    Distance,
    Dot,
    Cross,
    Normalize,
    /// Fragment coordinate / global work-item id, zero arguments.
    Index,
    /// Normalized fragment coordinate in `[0, 1]`, zero arguments.
    NormalizedIndex,
}

impl BuiltinFn {
    /// Number of operand children a call to this function takes (not
    /// counting the leading literal function-id child).
    pub fn arity(self) -> usize {
        use BuiltinFn::*;
        match self {
            Sin | Cos | Tan | Asin | Acos | Atan | Sinh | Cosh | Tanh | Asinh | Acosh | Atanh
            | Exp | Log | Exp2 | Log2 | Sqrt | Abs | Sign | Floor | Ceil | IsNan | IsInf
            | Length | Normalize => 1,
            Pow | Min | Max | Distance | Dot | Cross => 2,
            Clamp => 3,
            Index | NormalizedIndex => 0,
        }
    }
}

impl fmt::Display for BuiltinFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masking_dimensionality_recovers_element() {
        let buf = TypeTag::FLOAT | TypeTag::BUFFER1D;
        assert_eq!(buf.element(), TypeTag::FLOAT);
        assert_eq!(buf.buffer_dim().unwrap() as u8, Width::One as u8);
    }

    #[test]
    fn non_buffer_element_is_identity() {
        assert_eq!(TypeTag::INT3.element(), TypeTag::INT3);
        assert!(!TypeTag::INT3.is_buffer());
    }

    #[test]
    fn element_kind_recognizes_vectors() {
        assert_eq!(TypeTag::UINT4.element_kind(), Some(ElementKind::UInt));
        assert_eq!(TypeTag::VOID.element_kind(), None);
    }

    #[test]
    fn clamp_is_ternary() {
        assert_eq!(BuiltinFn::Clamp.arity(), 3);
        assert_eq!(BuiltinFn::Index.arity(), 0);
    }

    #[test]
    fn arithmetic_is_binary_but_not_bool() {
        assert!(NodeKind::Add.is_binary_operator());
        assert!(!NodeKind::Var.is_binary_operator());
    }
}
