//! Emission error types covering every way a captured `AstNode` can fail
//! to lower to target source.

/// Errors that can occur while lowering a captured program to GLSL or
/// OpenCL C source.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// A node kind appeared somewhere the target emitter has no rule for
    /// (e.g. `GetIndex` inside an OpenCL kernel).
    #[error("{kind:?} is not supported by the {target} backend")]
    UnsupportedNode { kind: &'static str, target: &'static str },

    /// A node failed one of `AstNode::check_invariants`'s structural rules.
    #[error("malformed AST: {0}")]
    MalformedAst(String),

    /// A type tag has no spelling in the target language (should not
    /// happen for any tag a frontend type can produce).
    #[error("no {target} type name for tag {tag:?}")]
    UnknownType { tag: shade_core::TypeTag, target: &'static str },

    /// The captured root was not a well-formed `Program` node.
    #[error("expected a Program node with ConstData/OutData/Main children")]
    NotAProgram,
}
