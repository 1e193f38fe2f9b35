//! Structured control flow: `if`/`elseif`/`else`, `while`, and the ranged
//! `for` loop (spec.md §4.1).
//!
//! Grounded on `Source.h`'s `If`/`ElseIf`/`Else`/`While`/`ForInRange` macro
//! surface, rendered here as closure-taking functions instead of
//! begin/end macro pairs -- Rust has no unmatched-block-end hazard to guard
//! against, so the closure's return is the block's natural close.

use shade_core::capture;

use crate::scalar::{Bool, Int};
use crate::value::{operand_owned, ShadeValue};

/// `if cond { body }`. `cond` is consumed: it is captured once, at the
/// point the `if` is built, not re-evaluated per iteration or branch.
pub fn if_then(cond: Bool, body: impl FnOnce()) {
    capture::if_(operand_owned(cond), body);
}

/// `else if cond { body }`, chained immediately after an `if_then`/
/// `elseif_then` call.
pub fn elseif_then(cond: Bool, body: impl FnOnce()) {
    capture::elseif_(operand_owned(cond), body);
}

/// `else { body }`, chained immediately after the `if`/`elseif` it closes.
pub fn else_then(body: impl FnOnce()) {
    capture::else_(body);
}

/// `while cond { body }`.
pub fn while_loop(cond: Bool, body: impl FnOnce()) {
    capture::while_(operand_owned(cond), body);
}

/// `for i in from..to { body }`. Allocates the loop iterator's symbol
/// itself and hands the body closure a `Named` `Int` bound to it, matching
/// `Interfaces.h`'s `ForInRange` which owns the iterator variable for the
/// loop's lifetime rather than letting the caller supply one.
pub fn for_in_range(from: Int, to: Int, body: impl FnOnce(Int)) {
    let id = capture::next_symbol();
    let iter_decl = shade_core::AstNode::with_symbol(shade_core::NodeKind::Var, Int::tag(), id);
    let from_node = operand_owned(from);
    let to_node = operand_owned(to);
    capture::for_in_range(iter_decl, from_node, to_node, || {
        body(Int::from_repr(crate::value::Repr::named(Int::tag(), id)));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use shade_core::{NodeKind, TypeTag};

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
    fn if_then_else_nest_as_siblings() {
        in_fresh_main(|| {
            if_then(Bool::new(true), || {});
            else_then(|| {});
        });
    }

    #[test]
    fn for_in_range_exposes_a_named_iterator() {
        in_fresh_main(|| {
            for_in_range(Int::new(0), Int::new(10), |i| {
                assert!(i.repr().symbol().is_allocated());
                assert!(!i.repr().symbol().is_temp());
            });
        });
    }

    #[test]
    fn while_loop_consumes_its_condition() {
        in_fresh_main(|| {
            let mut counter = Int::fresh();
            counter.assign(Int::new(0));
            while_loop(counter.lt(&Int::new(10)), || {
                counter.add_assign(Int::new(1));
            });
        });
    }
}
