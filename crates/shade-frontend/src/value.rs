//! Shared expression-value plumbing every scalar/vector wrapper type in
//! this crate is built from.
//!
//! Grounded on `lmlang-check/src/interpreter/value.rs`'s tagged-value style
//! (a small `Value`-shaped enum with `type_id()`/`type_name()` accessors),
//! adapted here to the eDSL's actual runtime-free contract: a captured value
//! either names a declared symbol or owns a freestanding AST subtree.

use shade_core::{AstNode, NodeKind, SymbolId, TypeTag};

/// The state every expression-value wrapper type (`Bool`, `Int`, `Float2`,
/// ...) holds. See spec.md §3's "Expression value": a value owns either a
/// named symbol (no owned subtree) or a temporary (owning a subtree), with
/// `Member` a third case that owns a subtree (parent + component index) but
/// is still assignable, unlike a plain temporary.
#[derive(Debug)]
pub(crate) struct Repr {
    pub(crate) id: SymbolId,
    pub(crate) ty: TypeTag,
    /// `Some` for `Temp`/`Member` values (the owned subtree); `None` for
    /// `Named` values (invalid-but-undeclared or already-allocated).
    subtree: Option<AstNode>,
}

impl Repr {
    /// A transient value owning a freshly built subtree.
    pub(crate) fn temp(ty: TypeTag, node: AstNode) -> Repr {
        Repr {
            id: SymbolId::TEMP,
            ty,
            subtree: Some(node),
        }
    }

    /// A freshly declared local with no symbol allocated yet -- the first
    /// assignment to it allocates one and the emitter prints a declaration.
    pub(crate) fn fresh(ty: TypeTag) -> Repr {
        Repr {
            id: SymbolId::INVALID,
            ty,
            subtree: None,
        }
    }

    /// A reference to an already-allocated symbol (inputs, outputs, loop
    /// iterators).
    pub(crate) fn named(ty: TypeTag, id: SymbolId) -> Repr {
        Repr {
            id,
            ty,
            subtree: None,
        }
    }

    /// A member projection: owns a `Member`-kind subtree (two children:
    /// parent expression, literal component index) but is still a valid
    /// assignment target, per spec.md §4.3's `parent.component = rhs` rule.
    pub(crate) fn member(ty: TypeTag, node: AstNode) -> Repr {
        Repr {
            id: SymbolId::MEMBER,
            ty,
            subtree: Some(node),
        }
    }

    pub(crate) fn ty(&self) -> TypeTag {
        self.ty
    }

    pub(crate) fn symbol(&self) -> SymbolId {
        self.id
    }

    /// Builds this value's operand form without consuming its identity.
    /// For `Named` values this is always safe (reading a variable doesn't
    /// destroy it); for `Temp`/`Member` values this clones the owned
    /// subtree, used internally only where the source's own semantics
    /// require re-reading an lvalue (compound-assignment desugaring).
    pub(crate) fn read(&self) -> AstNode {
        match &self.subtree {
            Some(node) => node.clone(),
            None => AstNode::with_symbol(NodeKind::Var, self.ty, self.id),
        }
    }

    /// Consumes this value into the AST node it contributes as an operand.
    /// This is the single-consumption path for temporaries: the caller's
    /// `self: Self` parameter (not `&self`) is what makes reuse of a moved
    /// temp a compile error, per spec.md §5 / DESIGN.md Open Question 5.
    pub(crate) fn into_operand(self) -> AstNode {
        self.read()
    }

    /// `lhs = rhs`. Allocates a symbol on first assignment to a fresh
    /// (invalid-id) named value; panics if `self` is a temporary (spec.md
    /// §4.3: "assignment to a fresh ... value allocates a new symbol";
    /// "mixing ... assignment is a programmer error" for temporaries).
    pub(crate) fn assign(&mut self, rhs: AstNode) {
        assert!(
            !self.id.is_temp(),
            "cannot assign to a temporary expression value -- it has no declared identity"
        );
        let left = match &self.subtree {
            Some(member_node) => member_node.clone(),
            None => {
                if self.id.is_invalid() {
                    self.id = shade_core::capture::next_symbol();
                }
                AstNode::with_symbol(NodeKind::Var, self.ty, self.id)
            }
        };
        let mut assignment = AstNode::new(NodeKind::Assignment, TypeTag::VOID);
        assignment.add_child(left);
        assignment.add_child(rhs);
        shade_core::capture::emit(assignment);
    }
}

/// Implemented by every scalar/vector wrapper type in this crate so the
/// generic operator/builtin-function plumbing in this module can build and
/// unwrap them uniformly.
pub trait ShadeValue: Sized {
    #[doc(hidden)]
    fn tag() -> TypeTag;
    #[doc(hidden)]
    fn from_repr(repr: Repr) -> Self;
    #[doc(hidden)]
    fn repr(&self) -> &Repr;
    #[doc(hidden)]
    fn repr_mut(&mut self) -> &mut Repr;
    #[doc(hidden)]
    fn into_repr(self) -> Repr;
}

pub(crate) fn operand_ref<T: ShadeValue>(v: &T) -> AstNode {
    v.repr().read()
}

pub(crate) fn operand_owned<T: ShadeValue>(v: T) -> AstNode {
    v.into_repr().into_operand()
}

/// Builds a two-operand expression node by value, consuming both operands.
pub(crate) fn binary_owned<L: ShadeValue, R: ShadeValue, O: ShadeValue>(
    kind: NodeKind,
    lhs: L,
    rhs: R,
) -> O {
    let ty = O::tag();
    let node = AstNode::new(kind, ty)
        .with_child(operand_owned(lhs))
        .with_child(operand_owned(rhs));
    O::from_repr(Repr::temp(ty, node))
}

/// Builds a two-operand expression node by reference, leaving both operands
/// usable afterward (the common case for named/member values read more than
/// once, e.g. `val.x * val.x`).
pub(crate) fn binary_ref<L: ShadeValue, R: ShadeValue, O: ShadeValue>(
    kind: NodeKind,
    lhs: &L,
    rhs: &R,
) -> O {
    let ty = O::tag();
    let node = AstNode::new(kind, ty)
        .with_child(operand_ref(lhs))
        .with_child(operand_ref(rhs));
    O::from_repr(Repr::temp(ty, node))
}

pub(crate) fn unary_owned<I: ShadeValue, O: ShadeValue>(kind: NodeKind, operand: I) -> O {
    let ty = O::tag();
    let node = AstNode::new(kind, ty).with_child(operand_owned(operand));
    O::from_repr(Repr::temp(ty, node))
}

pub(crate) fn unary_ref<I: ShadeValue, O: ShadeValue>(kind: NodeKind, operand: &I) -> O {
    let ty = O::tag();
    let node = AstNode::new(kind, ty).with_child(operand_ref(operand));
    O::from_repr(Repr::temp(ty, node))
}

/// Explicit conversion between element kinds (spec.md §4.3's `Cast` node),
/// e.g. `cast::<Int, Float>(i)`. Unlike the arithmetic/comparison builders
/// above this isn't restricted to a single `ShadeValue` type on both sides:
/// the source and target types only need to agree structurally (same
/// width), which the emitter -- not this crate -- is responsible for
/// rejecting if they don't (DESIGN.md).
pub fn cast<From: ShadeValue, To: ShadeValue>(value: From) -> To {
    let ty = To::tag();
    let node = AstNode::new(NodeKind::Cast, ty).with_child(operand_owned(value));
    To::from_repr(Repr::temp(ty, node))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_repr_has_invalid_id() {
        let r = Repr::fresh(TypeTag::INT);
        assert!(r.symbol().is_invalid());
    }

    #[test]
    #[should_panic]
    fn assigning_through_a_temp_panics() {
        let mut r = Repr::temp(
            TypeTag::INT,
            AstNode::literal(NodeKind::Literal, shade_core::LiteralValue::Int(1)),
        );
        r.assign(AstNode::literal(NodeKind::Literal, shade_core::LiteralValue::Int(2)));
    }
}
