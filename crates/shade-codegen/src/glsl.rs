//! Top-level GLSL fragment shader emission.
//!
//! Grounded on `OpenGLCompiler::print_glsl`/`Build`: a fixed varying
//! preamble, then each `ConstData` child becomes a `uniform`, each
//! `OutData` child becomes a `layout(location=i) out`, and the `Main`
//! block's body is walked by [`crate::visitor`].

use shade_core::{AstNode, NodeKind, TypeTag};

use crate::dialect::{Dialect, Glsl};
use crate::error::EmitError;
use crate::mangle::mangle;
use crate::visitor::Visitor;

fn declared_type(ty: TypeTag) -> Result<String, EmitError> {
    if ty.is_buffer() {
        Glsl::buffer_type_name(ty)
    } else {
        Glsl::scalar_type_name(ty).map(str::to_string)
    }
}

fn declaration(node: &AstNode) -> Result<String, EmitError> {
    let sym = node
        .symbol()
        .ok_or_else(|| EmitError::MalformedAst(format!("{:?} must carry a symbol", node.kind)))?;
    Ok(format!("{} {}", declared_type(node.ty)?, mangle(sym.value())))
}

/// Lowers a captured `Program` node to a complete `#version 330` fragment
/// shader, matching `print_glsl`'s section order: preamble, uniforms,
/// outputs, `main`.
pub fn emit(program: &AstNode) -> Result<String, EmitError> {
    if program.kind != NodeKind::Program || program.children.len() != 3 {
        return Err(EmitError::NotAProgram);
    }
    let const_data = &program.children[0];
    let out_data = &program.children[1];
    let main = &program.children[2];
    if const_data.kind != NodeKind::ConstData
        || out_data.kind != NodeKind::OutData
        || main.kind != NodeKind::Main
    {
        return Err(EmitError::NotAProgram);
    }

    let mut out = String::new();
    out.push_str("#version 330\n\n");
    out.push_str("// from vertex shader\n");
    out.push_str("noperspective in vec2 index;\n");
    out.push_str("noperspective in vec2 normalized_index;\n\n");

    let mut visitor = Visitor::<Glsl>::new();

    out.push_str("// uniform inputs\n");
    for child in &const_data.children {
        out.push_str("uniform ");
        out.push_str(&declaration(child)?);
        out.push_str(";\n");
        if let Some(sym) = child.symbol() {
            visitor.predeclare(sym.value());
        }
    }
    out.push('\n');

    out.push_str("// outputs\n");
    for (i, child) in out_data.children.iter().enumerate() {
        out.push_str(&format!("layout (location = {i}) out "));
        out.push_str(&declaration(child)?);
        out.push_str(";\n");
        if let Some(sym) = child.symbol() {
            visitor.predeclare(sym.value());
        }
    }
    out.push('\n');

    out.push_str("void main()\n{\n");
    out.push_str(" // code\n");
    visitor.emit_main(main)?;
    out.push_str(&visitor.into_output());
    out.push_str("}\n");

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shade_core::LiteralValue;

    fn program_with(const_decls: Vec<AstNode>, out_decls: Vec<AstNode>, main_body: Vec<AstNode>) -> AstNode {
        let mut const_data = AstNode::new(NodeKind::ConstData, TypeTag::VOID);
        for d in const_decls {
            const_data.add_child(d);
        }
        let mut out_data = AstNode::new(NodeKind::OutData, TypeTag::VOID);
        for d in out_decls {
            out_data.add_child(d);
        }
        let mut main = AstNode::new(NodeKind::Main, TypeTag::VOID);
        for s in main_body {
            main.add_child(s);
        }
        AstNode::new(NodeKind::Program, TypeTag::VOID)
            .with_child(const_data)
            .with_child(out_data)
            .with_child(main)
    }

    #[test]
    fn identity_shader_assigns_input_to_output() {
        use shade_core::SymbolId;
        let x = AstNode::with_symbol(NodeKind::ConstVar, TypeTag::FLOAT, SymbolId::new(0)).with_name("x");
        let y = AstNode::with_symbol(NodeKind::OutVar, TypeTag::FLOAT, SymbolId::new(1)).with_name("y");
        let assign = AstNode::new(NodeKind::Assignment, TypeTag::VOID)
            .with_child(AstNode::with_symbol(NodeKind::Var, TypeTag::FLOAT, SymbolId::new(1)))
            .with_child(AstNode::with_symbol(NodeKind::Var, TypeTag::FLOAT, SymbolId::new(0)));
        let program = program_with(vec![x], vec![y], vec![assign]);

        let src = emit(&program).unwrap();
        assert!(src.contains("#version 330"));
        assert!(src.contains("uniform float a;"));
        assert!(src.contains("layout (location = 0) out float b;"));
        // b was already declared by the output section; the assignment must
        // not redeclare its type.
        assert!(src.contains("b = a;"));
        assert!(!src.contains("float b = a;"));
    }

    #[test]
    fn rejects_a_non_program_root() {
        let not_a_program = AstNode::new(NodeKind::Block, TypeTag::VOID);
        assert!(matches!(emit(&not_a_program), Err(EmitError::NotAProgram)));
    }

    #[test]
    fn float_literal_uses_trimmed_precision() {
        use shade_core::SymbolId;
        let y = AstNode::with_symbol(NodeKind::OutVar, TypeTag::FLOAT, SymbolId::new(0)).with_name("y");
        let assign = AstNode::new(NodeKind::Assignment, TypeTag::VOID)
            .with_child(AstNode::with_symbol(NodeKind::Var, TypeTag::FLOAT, SymbolId::new(0)))
            .with_child(AstNode::literal(NodeKind::Literal, LiteralValue::Float(0.5)));
        let program = program_with(vec![], vec![y], vec![assign]);
        let src = emit(&program).unwrap();
        assert!(src.contains("a = 0.5f;"));
    }
}
