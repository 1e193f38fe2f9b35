//! The user-facing surface of the `shade` eDSL: scalar and vector wrapper
//! types whose operators and methods build an AST instead of computing a
//! result, plus the `Program` trait that ties a `const_data`/`out_data`/
//! `main` triple into one capture (spec.md §2/§6).
//!
//! This crate depends only on `shade-core`'s capture primitives; it knows
//! nothing about GLSL or OpenCL. `shade-codegen` is what walks the
//! `AstNode` a [`parse`] call returns.

mod value;

pub mod builtin;
pub mod buffer;
pub mod control;
pub mod io;
pub mod scalar;
pub mod vector;

pub use builtin::*;
pub use buffer::{Buffer1D, Buffer2D};
pub use control::{elseif_then, else_then, for_in_range, if_then, while_loop};
pub use io::{const_input, output, BufferElement};
pub use scalar::{Bool, Float, Int, UInt};
pub use value::{cast, ShadeValue};
pub use vector::{Float2, Float3, Float4, Int2, Int3, Int4, UInt2, UInt3, UInt4, VectorValue};

pub use shade_core::AstNode;

use shade_core::{capture, NodeKind, TypeTag};

/// A kernel program's three declaration blocks (spec.md §2: "program = one
/// `ConstData` block, one `OutData` block, one `Main` block, captured in
/// that fixed order").
///
/// Implement this once per kernel and call [`parse`] to drive the capture.
/// The default bodies are empty, matching kernels that need no inputs or no
/// outputs (a vertex-free compute kernel, for instance); `main` has no
/// default since a kernel that writes nothing is never useful.
pub trait Program {
    /// Declares this program's inputs via [`const_input`]/buffer handles.
    fn const_data(&mut self) {}

    /// Declares this program's outputs via [`output`].
    fn out_data(&mut self) {}

    /// The per-invocation body.
    fn main(&mut self);
}

/// Captures `program` into a finished `Program`-kind [`AstNode`] (spec.md
/// §6: "drives a capture through the fixed `ConstData`/`OutData`/`Main`
/// sequence"). Panics if a capture is already in progress on this thread.
pub fn parse<P: Program>(program: &mut P) -> AstNode {
    capture::begin_capture();
    capture::open_block(NodeKind::ConstData, TypeTag::VOID);
    program.const_data();
    capture::close_block();
    capture::open_block(NodeKind::OutData, TypeTag::VOID);
    program.out_data();
    capture::close_block();
    capture::open_block(NodeKind::Main, TypeTag::VOID);
    program.main();
    capture::close_block();
    capture::end_capture()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;

    impl Program for Identity {
        fn const_data(&mut self) {
            let _x: Float = const_input("x");
        }

        fn out_data(&mut self) {
            let _y: Float = output("y");
        }

        fn main(&mut self) {}
    }

    #[test]
    fn parse_produces_a_three_child_program() {
        let ast = parse(&mut Identity);
        assert_eq!(ast.kind, NodeKind::Program);
        assert_eq!(ast.children.len(), 3);
        assert_eq!(ast.children[0].children.len(), 1);
        assert_eq!(ast.children[1].children.len(), 1);
    }

    #[test]
    #[should_panic]
    fn parse_is_not_reentrant() {
        struct Nested;
        impl Program for Nested {
            fn main(&mut self) {
                parse(&mut Identity);
            }
        }
        parse(&mut Nested);
    }
}
