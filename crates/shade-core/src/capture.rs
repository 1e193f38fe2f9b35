//! The capture context: thread-local, per-capture mutable state that
//! `shade-frontend`'s wrapper types build an [`AstNode`] tree into.
//!
//! Exactly one capture may be in progress per thread at a time. There is no
//! explicit context object passed around by the caller (mirroring the
//! process-wide singleton the frontend types are built against); instead a
//! `thread_local!` cell holds the active [`CaptureState`], and misuse
//! (starting a capture while one is open, emitting outside a capture,
//! closing a block that was never opened) is a `panic!`, per spec.md §7's
//! "programmer errors abort" policy.

use std::cell::RefCell;

use crate::id::SymbolId;
use crate::kind::{NodeKind, TypeTag};
use crate::node::AstNode;

struct Frame {
    kind: NodeKind,
    ty: TypeTag,
    children: Vec<AstNode>,
}

impl Frame {
    fn new(kind: NodeKind, ty: TypeTag) -> Frame {
        Frame {
            kind,
            ty,
            children: Vec::new(),
        }
    }

    fn finish(self) -> AstNode {
        AstNode {
            kind: self.kind,
            ty: self.ty,
            children: self.children,
            payload: crate::node::Payload::None,
            name: None,
        }
    }
}

struct CaptureState {
    stack: Vec<Frame>,
    next_symbol: i64,
}

thread_local! {
    static CAPTURE: RefCell<Option<CaptureState>> = const { RefCell::new(None) };
}

/// Starts a new capture on the current thread. Panics if one is already in
/// progress.
pub fn begin_capture() {
    CAPTURE.with(|cell| {
        let mut slot = cell.borrow_mut();
        assert!(
            slot.is_none(),
            "begin_capture: a capture is already in progress on this thread"
        );
        tracing::debug!("capture started");
        *slot = Some(CaptureState {
            stack: vec![Frame::new(NodeKind::Program, TypeTag::VOID)],
            next_symbol: 0,
        });
    });
}

/// Finishes the current capture, returning the finished `Program` node.
/// Panics if no capture is in progress, or if blocks remain open (a `_StartBlock`
/// without a matching `close_block`).
pub fn end_capture() -> AstNode {
    CAPTURE.with(|cell| {
        let state = cell
            .borrow_mut()
            .take()
            .expect("end_capture: no capture in progress");
        assert_eq!(
            state.stack.len(),
            1,
            "end_capture: {} block(s) still open",
            state.stack.len() - 1
        );
        let node = state.stack.into_iter().next().unwrap().finish();
        node.check_invariants();
        tracing::debug!("capture finished");
        node
    })
}

/// Allocates the next symbol id in the current capture.
pub fn next_symbol() -> SymbolId {
    CAPTURE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let state = slot
            .as_mut()
            .expect("next_symbol: no capture in progress");
        let id = SymbolId::new(state.next_symbol);
        state.next_symbol += 1;
        id
    })
}

/// True if a capture is currently in progress on this thread.
pub fn is_capturing() -> bool {
    CAPTURE.with(|cell| cell.borrow().is_some())
}

/// The `NodeKind` of the innermost open block, if any. Used by the frontend
/// to assert, e.g., that a `ConstVar` is only declared inside a `ConstData`
/// block.
pub fn current_block_kind() -> Option<NodeKind> {
    CAPTURE.with(|cell| {
        cell.borrow()
            .as_ref()
            .and_then(|s| s.stack.last())
            .map(|f| f.kind)
    })
}

/// Opens a new block of the given kind, pushing a frame onto the block
/// stack. Must be matched by a later `close_block`.
pub fn open_block(kind: NodeKind, ty: TypeTag) {
    CAPTURE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let state = slot.as_mut().expect("open_block: no capture in progress");
        tracing::trace!(?kind, "open_block");
        state.stack.push(Frame::new(kind, ty));
    });
}

/// Closes the innermost open block, appending it as a child of its enclosing
/// block. Panics if that would close the outermost (`Program`) frame --
/// use `end_capture` for that.
pub fn close_block() {
    CAPTURE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let state = slot.as_mut().expect("close_block: no capture in progress");
        assert!(
            state.stack.len() > 1,
            "close_block: no open block to close (did you mean end_capture?)"
        );
        let frame = state.stack.pop().unwrap();
        tracing::trace!(kind = ?frame.kind, "close_block");
        let node = frame.finish();
        state.stack.last_mut().unwrap().children.push(node);
    });
}

/// Appends a finished node as the next statement (or leading child, for
/// condition/iterator expressions) of the innermost open block.
pub fn emit(node: AstNode) {
    CAPTURE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let state = slot.as_mut().expect("emit: no capture in progress");
        state
            .stack
            .last_mut()
            .expect("emit: no open block to emit into")
            .children
            .push(node);
    });
}

/// `if (cond) { body }`. `body` is run with the `If` block open, so any
/// `emit` calls it makes become the block's statements.
pub fn if_(cond: AstNode, body: impl FnOnce()) {
    open_block(NodeKind::If, TypeTag::VOID);
    emit(cond);
    body();
    close_block();
}

/// `else if (cond) { body }`, as a sibling statement following the `If`/
/// `ElseIf` it chains from (see DESIGN.md for why this is structurally
/// equivalent to the original's nested-then-flattened block chaining).
pub fn elseif_(cond: AstNode, body: impl FnOnce()) {
    open_block(NodeKind::ElseIf, TypeTag::VOID);
    emit(cond);
    body();
    close_block();
}

/// `else { body }`.
pub fn else_(body: impl FnOnce()) {
    open_block(NodeKind::Else, TypeTag::VOID);
    body();
    close_block();
}

/// `while (cond) { body }`.
pub fn while_(cond: AstNode, body: impl FnOnce()) {
    open_block(NodeKind::While, TypeTag::VOID);
    emit(cond);
    body();
    close_block();
}

/// `for (iter_decl = from; iter < to; ++iter) { body }`. `iter_decl` must be
/// a `Var` node naming a freshly-allocated symbol; the caller is responsible
/// for asserting the iterator value was `invalid` before allocating it (see
/// `shade_frontend`'s `for_in_range`).
pub fn for_in_range(iter_decl: AstNode, from: AstNode, to: AstNode, body: impl FnOnce()) {
    open_block(NodeKind::ForInRange, TypeTag::VOID);
    emit(iter_decl);
    emit(from);
    emit(to);
    body();
    close_block();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{LiteralValue, Payload};

    fn reset() {
        CAPTURE.with(|cell| *cell.borrow_mut() = None);
    }

    #[test]
    fn empty_program_has_three_blocks() {
        reset();
        begin_capture();
        open_block(NodeKind::ConstData, TypeTag::VOID);
        close_block();
        open_block(NodeKind::OutData, TypeTag::VOID);
        close_block();
        open_block(NodeKind::Main, TypeTag::VOID);
        close_block();
        let program = end_capture();
        assert_eq!(program.kind, NodeKind::Program);
        assert_eq!(program.children.len(), 3);
        assert_eq!(program.children[0].kind, NodeKind::ConstData);
        assert_eq!(program.children[2].kind, NodeKind::Main);
    }

    #[test]
    #[should_panic]
    fn double_begin_capture_panics() {
        reset();
        begin_capture();
        begin_capture();
    }

    #[test]
    #[should_panic]
    fn end_capture_with_open_block_panics() {
        reset();
        begin_capture();
        open_block(NodeKind::Main, TypeTag::VOID);
        end_capture();
    }

    #[test]
    fn if_else_produce_sibling_statements() {
        reset();
        begin_capture();
        open_block(NodeKind::ConstData, TypeTag::VOID);
        close_block();
        open_block(NodeKind::OutData, TypeTag::VOID);
        close_block();
        open_block(NodeKind::Main, TypeTag::VOID);
        let cond = AstNode::literal(NodeKind::Literal, LiteralValue::Bool(true));
        if_(cond, || {});
        else_(|| {});
        close_block();
        let program = end_capture();
        let main = &program.children[2];
        assert_eq!(main.children.len(), 2);
        assert_eq!(main.children[0].kind, NodeKind::If);
        assert_eq!(main.children[1].kind, NodeKind::Else);
    }

    #[test]
    fn next_symbol_is_monotonic() {
        reset();
        begin_capture();
        let a = next_symbol();
        let b = next_symbol();
        assert!(b.value() > a.value());
        open_block(NodeKind::ConstData, TypeTag::VOID);
        close_block();
        open_block(NodeKind::OutData, TypeTag::VOID);
        close_block();
        open_block(NodeKind::Main, TypeTag::VOID);
        close_block();
        let _ = end_capture();
    }

    #[test]
    fn for_in_range_has_iterator_and_bounds_first() {
        reset();
        begin_capture();
        open_block(NodeKind::ConstData, TypeTag::VOID);
        close_block();
        open_block(NodeKind::OutData, TypeTag::VOID);
        close_block();
        open_block(NodeKind::Main, TypeTag::VOID);
        let sym = next_symbol();
        let iter_decl = AstNode::with_symbol(NodeKind::Var, TypeTag::INT, sym);
        let from = AstNode::literal(NodeKind::Literal, LiteralValue::Int(0));
        let to = AstNode::literal(NodeKind::Literal, LiteralValue::Int(10));
        for_in_range(iter_decl, from, to, || {});
        close_block();
        let program = end_capture();
        let main = &program.children[2];
        let for_node = &main.children[0];
        assert_eq!(for_node.kind, NodeKind::ForInRange);
        assert_eq!(for_node.children[0].payload, Payload::Symbol(sym));
        assert_eq!(for_node.children[1].literal_value(), Some(LiteralValue::Int(0)));
        assert_eq!(for_node.children[2].literal_value(), Some(LiteralValue::Int(10)));
    }
}
