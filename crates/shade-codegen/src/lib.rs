//! Lowers a captured `shade-frontend` program to target shader/kernel
//! source text (spec.md §2 component 5).
//!
//! This crate has no notion of the eDSL's operator overloads or capture
//! context -- it only walks a finished [`shade_core::AstNode`] tree and
//! either a GLSL fragment shader or an OpenCL C kernel falls out, or an
//! [`EmitError`] does.

pub mod dialect;
pub mod dump;
pub mod error;
pub mod glsl;
pub mod mangle;
pub mod opencl;
mod visitor;

pub use error::EmitError;

use shade_core::AstNode;

/// Lowers a captured program to GLSL 3.30 fragment shader source.
pub fn emit_glsl(program: &AstNode) -> Result<String, EmitError> {
    glsl::emit(program)
}

/// Lowers a captured program to an OpenCL C kernel definition.
pub fn emit_opencl(program: &AstNode) -> Result<String, EmitError> {
    opencl::emit(program)
}

/// Which backend to lower a captured program for (`shade-cli`'s
/// subcommand selector).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Glsl,
    OpenCl,
}

impl Backend {
    pub fn emit(self, program: &AstNode) -> Result<String, EmitError> {
        match self {
            Backend::Glsl => emit_glsl(program),
            Backend::OpenCl => emit_opencl(program),
        }
    }
}
