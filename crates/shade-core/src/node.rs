//! The uniform AST node every captured construct is built from.

use crate::id::SymbolId;
use crate::kind::{BuiltinFn, ElementKind, NodeKind, TypeTag};

/// A literal constant, tagged with the element kind it holds.
///
/// This is the idiomatic Rust rendering of "raw bytes + length + element-kind
/// tag": the enum discriminant already carries the kind, and each variant's
/// payload is exactly as wide as that kind requires, so there is no reason to
/// additionally store a byte length or reinterpret a byte blob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue {
    Bool(bool),
    Int(i32),
    UInt(u32),
    Float(f32),
}

impl LiteralValue {
    pub fn element_kind(self) -> ElementKind {
        match self {
            LiteralValue::Bool(_) => ElementKind::Bool,
            LiteralValue::Int(_) => ElementKind::Int,
            LiteralValue::UInt(_) => ElementKind::UInt,
            LiteralValue::Float(_) => ElementKind::Float,
        }
    }

    pub fn type_tag(self) -> TypeTag {
        match self {
            LiteralValue::Bool(_) => TypeTag::BOOL,
            LiteralValue::Int(_) => TypeTag::INT,
            LiteralValue::UInt(_) => TypeTag::UINT,
            LiteralValue::Float(_) => TypeTag::FLOAT,
        }
    }
}

/// The discriminated extra data an [`AstNode`] carries beyond its kind, type,
/// and children.
///
/// There is no `Member` variant here even though `Member`-kind nodes are a
/// distinct case conceptually: a member projection's parent and component
/// index are carried entirely by its two children (see the invariant on
/// [`AstNode::member`]), matching how the source this crate is grounded on
/// actually builds `Member` nodes (see DESIGN.md).
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    None,
    Symbol(SymbolId),
    Literal(LiteralValue),
    /// A built-in function tag, carried as the first child of a `Function`
    /// node.
    Builtin(BuiltinFn),
}

/// A node in the captured program tree.
///
/// Children are owned exclusively: an `AstNode` is never shared between two
/// parents, and moving a subtree out of one place (e.g. consuming an
/// expression value) means it cannot still be referenced from where it came
/// from. Rust's ownership model gives this for free; see DESIGN.md.
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub kind: NodeKind,
    pub ty: TypeTag,
    pub children: Vec<AstNode>,
    pub payload: Payload,
    /// User-supplied name for a `ConstVar`/`OutVar` declaration (spec.md
    /// §3's "carry optional user-supplied names"). Not consulted by the
    /// emitter -- declarations are always printed under their mangled
    /// name (see DESIGN.md) -- but retained for diagnostic dumps.
    pub name: Option<String>,
}

impl AstNode {
    /// A bare structural node with no payload (most statement/block kinds).
    pub fn new(kind: NodeKind, ty: TypeTag) -> AstNode {
        AstNode {
            kind,
            ty,
            children: Vec::new(),
            payload: Payload::None,
            name: None,
        }
    }

    /// A `Var`/`OutVar`/`ConstVar` node naming a symbol.
    pub fn with_symbol(kind: NodeKind, ty: TypeTag, symbol: SymbolId) -> AstNode {
        AstNode {
            kind,
            ty,
            children: Vec::new(),
            payload: Payload::Symbol(symbol),
            name: None,
        }
    }

    /// A `Literal` node. Panics if `kind` isn't `Literal` -- literals are
    /// never anything else.
    pub fn literal(kind: NodeKind, literal: LiteralValue) -> AstNode {
        assert_eq!(kind, NodeKind::Literal, "literal() requires NodeKind::Literal");
        AstNode {
            kind,
            ty: literal.type_tag(),
            children: Vec::new(),
            payload: Payload::Literal(literal),
            name: None,
        }
    }

    /// Attaches a user-supplied declaration name (see the `name` field).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// A `Function` node calling a built-in (`sin`, `dot`, `clamp`, ...).
    /// The function tag lives directly on this node's payload rather than
    /// as a synthetic literal child -- Rust's enum payload already carries
    /// the tag, so there is no reason to additionally encode it as a
    /// `Literal` argument the way the grounding source does (see
    /// DESIGN.md).
    pub fn builtin_call(ty: TypeTag, func: BuiltinFn) -> AstNode {
        AstNode {
            kind: NodeKind::Function,
            ty,
            children: Vec::new(),
            payload: Payload::Builtin(func),
            name: None,
        }
    }

    pub fn builtin(&self) -> Option<BuiltinFn> {
        match self.payload {
            Payload::Builtin(f) => Some(f),
            _ => None,
        }
    }

    pub fn add_child(&mut self, child: AstNode) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn with_child(mut self, child: AstNode) -> Self {
        self.add_child(child);
        self
    }

    pub fn symbol(&self) -> Option<SymbolId> {
        match self.payload {
            Payload::Symbol(id) => Some(id),
            _ => None,
        }
    }

    pub fn literal_value(&self) -> Option<LiteralValue> {
        match self.payload {
            Payload::Literal(v) => Some(v),
            _ => None,
        }
    }

    /// True when this node is a `Member` projection: exactly two children,
    /// the parent expression and a literal component index.
    pub fn is_member(&self) -> bool {
        self.kind == NodeKind::Member
    }

    /// Checks the structural invariants spec.md §3 lists for this node's
    /// kind. Intended for tests and debug assertions, not the hot emission
    /// path.
    pub fn check_invariants(&self) {
        use NodeKind::*;
        match self.kind {
            Literal => assert!(self.children.is_empty(), "Literal must have no children"),
            Var | OutVar | ConstVar => {
                assert!(self.symbol().is_some(), "{:?} must carry a symbol id", self.kind)
            }
            Member => assert_eq!(self.children.len(), 2, "Member must have exactly two children"),
            UnaryMinus | LogicalNot | BitwiseNot => {
                assert_eq!(self.children.len(), 1, "{:?} must have exactly one child", self.kind)
            }
            k if k.is_binary_operator() => {
                assert_eq!(self.children.len(), 2, "{k:?} must have exactly two children")
            }
            If | ElseIf | While => assert!(
                self.children.len() >= 1,
                "{:?} must have a condition child",
                self.kind
            ),
            Else => {}
            ForInRange => assert!(
                self.children.len() >= 3,
                "ForInRange must have iterator var, start, and stop children"
            ),
            Program => assert_eq!(
                self.children.len(),
                3,
                "Program must have exactly three children: ConstData, OutData, Main"
            ),
            _ => {}
        }
        for child in &self.children {
            child.check_invariants();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_carries_its_own_type_tag() {
        let n = AstNode::literal(NodeKind::Literal, LiteralValue::Float(1.5));
        assert_eq!(n.ty, TypeTag::FLOAT);
        assert_eq!(n.literal_value(), Some(LiteralValue::Float(1.5)));
    }

    #[test]
    #[should_panic]
    fn literal_rejects_wrong_kind() {
        AstNode::literal(NodeKind::Add, LiteralValue::Int(1));
    }

    #[test]
    fn member_invariant_requires_two_children() {
        let mut m = AstNode::new(NodeKind::Member, TypeTag::FLOAT);
        m.add_child(AstNode::with_symbol(NodeKind::Var, TypeTag::FLOAT4, SymbolId::new(0)));
        m.add_child(AstNode::literal(NodeKind::Literal, LiteralValue::Int(1)));
        m.check_invariants();
    }

    #[test]
    #[should_panic]
    fn member_invariant_rejects_one_child() {
        let mut m = AstNode::new(NodeKind::Member, TypeTag::FLOAT);
        m.add_child(AstNode::with_symbol(NodeKind::Var, TypeTag::FLOAT4, SymbolId::new(0)));
        m.check_invariants();
    }

    #[test]
    fn structural_equality_ignores_nothing() {
        let a = AstNode::with_symbol(NodeKind::Var, TypeTag::INT, SymbolId::new(3));
        let b = AstNode::with_symbol(NodeKind::Var, TypeTag::INT, SymbolId::new(3));
        let c = AstNode::with_symbol(NodeKind::Var, TypeTag::INT, SymbolId::new(4));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
