//! The capture mechanism shared by every `shade` eDSL program: the type-tag
//! registry, the uniform AST node, and the thread-local capture context.
//!
//! This crate has no notion of GLSL or OpenCL -- it only knows how to record
//! a tree shaped like spec.md §3 describes. `shade-frontend` builds the
//! user-visible scalar/vector types on top of it; `shade-codegen` walks the
//! finished tree to emit target source.

pub mod capture;
pub mod error;
pub mod id;
pub mod kind;
pub mod node;

pub use error::CoreError;
pub use id::SymbolId;
pub use kind::{BuiltinFn, ElementKind, NodeKind, TypeTag, Width};
pub use node::{AstNode, LiteralValue, Payload};
