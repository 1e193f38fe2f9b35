//! Input/output declaration wrappers, usable only inside their matching
//! capture block (spec.md §4.4).
//!
//! Grounded on `Interfaces.h`'s `Const<T>`/`Out<T>` templates: both allocate
//! a symbol, assert the current block kind, and add a declaration node to
//! the enclosing block before the value itself is ever used.

use shade_core::{capture, AstNode, NodeKind, TypeTag};

use crate::value::{Repr, ShadeValue};

/// Declares a read-only input inside the `ConstData` block (spec.md §4.4).
/// Panics if called outside that block.
pub fn const_input<T: ShadeValue>(name: &str) -> T {
    assert_eq!(
        capture::current_block_kind(),
        Some(NodeKind::ConstData),
        "const_input: must be called while the ConstData block is open"
    );
    let id = capture::next_symbol();
    let ty = T::tag();
    let decl = AstNode::with_symbol(NodeKind::ConstVar, ty, id).with_name(name);
    capture::emit(decl);
    T::from_repr(Repr::named(ty, id))
}

/// Declares a writable output inside the `OutData` block (spec.md §4.4).
/// Panics if called outside that block.
pub fn output<T: ShadeValue>(name: &str) -> T {
    assert_eq!(
        capture::current_block_kind(),
        Some(NodeKind::OutData),
        "output: must be called while the OutData block is open"
    );
    let id = capture::next_symbol();
    let ty = T::tag();
    let decl = AstNode::with_symbol(NodeKind::OutVar, ty, id).with_name(name);
    capture::emit(decl);
    T::from_repr(Repr::named(ty, id))
}

/// The type tag a buffer declaration uses: the element type OR'd with a
/// dimensionality flag (spec.md §4.8). Implemented by the scalar and
/// vector types that are valid buffer elements.
pub trait BufferElement: ShadeValue {}

impl BufferElement for crate::scalar::Int {}
impl BufferElement for crate::scalar::UInt {}
impl BufferElement for crate::scalar::Float {}
impl BufferElement for crate::vector::Int2 {}
impl BufferElement for crate::vector::Int3 {}
impl BufferElement for crate::vector::Int4 {}
impl BufferElement for crate::vector::UInt2 {}
impl BufferElement for crate::vector::UInt3 {}
impl BufferElement for crate::vector::UInt4 {}
impl BufferElement for crate::vector::Float2 {}
impl BufferElement for crate::vector::Float3 {}
impl BufferElement for crate::vector::Float4 {}

pub(crate) fn declare_buffer(name: &str, ty: TypeTag) -> shade_core::SymbolId {
    assert_eq!(
        capture::current_block_kind(),
        Some(NodeKind::ConstData),
        "buffer inputs must be declared while the ConstData block is open"
    );
    let id = capture::next_symbol();
    let decl = AstNode::with_symbol(NodeKind::ConstVar, ty, id).with_name(name);
    capture::emit(decl);
    id
}
