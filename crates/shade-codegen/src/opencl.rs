//! Top-level OpenCL C kernel emission.
//!
//! Grounded on `OpenCLCompiler::print_kernel_source`: every buffer
//! parameter expands into an extra `uint ..._length` (1D) or
//! `uint ..._width, uint ..._height` (2D) auxiliary parameter ahead of the
//! pointer itself, `ConstData` parameters are `const __global`, `OutData`
//! parameters are plain `__global`. Unlike the grounding source's
//! `print_code`, which is an empty stub for this backend, the kernel body
//! here is a real statement emission via [`crate::visitor`].

use shade_core::{AstNode, NodeKind, TypeTag};

use crate::dialect::{Dialect, OpenCl};
use crate::error::EmitError;
use crate::mangle::mangle;
use crate::visitor::Visitor;

fn buffer_aux_params(name: &str, ty: TypeTag) -> Vec<String> {
    match ty.buffer_dim() {
        Some(shade_core::Width::One) => vec![format!("uint {name}_length")],
        Some(shade_core::Width::Two) => vec![format!("uint {name}_width"), format!("uint {name}_height")],
        _ => Vec::new(),
    }
}

fn const_param(node: &AstNode) -> Result<Vec<String>, EmitError> {
    let sym = node
        .symbol()
        .ok_or_else(|| EmitError::MalformedAst("ConstVar must carry a symbol".into()))?;
    let name = mangle(sym.value());
    let mut params = buffer_aux_params(&name, node.ty);
    let qualifier = if node.ty.is_buffer() { "const __global " } else { "const " };
    let type_name = if node.ty.is_buffer() {
        OpenCl::buffer_type_name(node.ty)?
    } else {
        OpenCl::scalar_type_name(node.ty)?.to_string()
    };
    params.push(format!("{qualifier}{type_name} {name}"));
    Ok(params)
}

fn out_param(node: &AstNode) -> Result<Vec<String>, EmitError> {
    let sym = node
        .symbol()
        .ok_or_else(|| EmitError::MalformedAst("OutVar must carry a symbol".into()))?;
    let name = mangle(sym.value());
    let mut params = buffer_aux_params(&name, node.ty);
    // a kernel has no return channel, so every output -- buffer or plain
    // scalar -- is written through a __global pointer.
    let type_name = if node.ty.is_buffer() {
        OpenCl::buffer_type_name(node.ty)?
    } else {
        format!("{}*", OpenCl::scalar_type_name(node.ty)?)
    };
    params.push(format!("__global {type_name} {name}"));
    Ok(params)
}

/// Lowers a captured `Program` node to a complete `__kernel void
/// KernelMain(...)` definition.
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

    let mut params = Vec::new();
    let mut visitor = Visitor::<OpenCl>::new();
    for child in &const_data.children {
        params.extend(const_param(child)?);
        if let Some(sym) = child.symbol() {
            visitor.predeclare(sym.value());
        }
    }
    for child in &out_data.children {
        params.extend(out_param(child)?);
        if let Some(sym) = child.symbol() {
            visitor.predeclare(sym.value());
        }
    }

    let mut out = String::new();
    out.push_str("__kernel void KernelMain(\n");
    for (i, param) in params.iter().enumerate() {
        out.push_str("    ");
        out.push_str(param);
        if i + 1 != params.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str(")\n{\n");
    visitor.emit_main(main)?;
    out.push_str(&visitor.into_output());
    out.push_str("}\n");

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shade_core::SymbolId;

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
    fn scalar_const_becomes_a_const_parameter() {
        let x = AstNode::with_symbol(NodeKind::ConstVar, TypeTag::FLOAT, SymbolId::new(0)).with_name("x");
        let y = AstNode::with_symbol(NodeKind::OutVar, TypeTag::FLOAT, SymbolId::new(1)).with_name("y");
        let assign = AstNode::new(NodeKind::Assignment, TypeTag::VOID)
            .with_child(AstNode::with_symbol(NodeKind::Var, TypeTag::FLOAT, SymbolId::new(1)))
            .with_child(AstNode::with_symbol(NodeKind::Var, TypeTag::FLOAT, SymbolId::new(0)));
        let program = program_with(vec![x], vec![y], vec![assign]);

        let src = emit(&program).unwrap();
        assert!(src.starts_with("__kernel void KernelMain("));
        assert!(src.contains("const float a"));
        assert!(src.contains("__global float* b"));
        assert!(src.contains("b = a;"));
    }

    #[test]
    fn buffer1d_const_gains_a_length_parameter() {
        let buf_ty = TypeTag::FLOAT | TypeTag::BUFFER1D;
        let buf = AstNode::with_symbol(NodeKind::ConstVar, buf_ty, SymbolId::new(0)).with_name("buf");
        let program = program_with(vec![buf], vec![], vec![]);
        let src = emit(&program).unwrap();
        assert!(src.contains("uint a_length"));
        assert!(src.contains("const __global float* a"));
    }

    #[test]
    fn buffer2d_const_gains_width_and_height_parameters() {
        let buf_ty = TypeTag::FLOAT | TypeTag::BUFFER2D;
        let buf = AstNode::with_symbol(NodeKind::ConstVar, buf_ty, SymbolId::new(0)).with_name("buf");
        let program = program_with(vec![buf], vec![], vec![]);
        let src = emit(&program).unwrap();
        assert!(src.contains("uint a_width"));
        assert!(src.contains("uint a_height"));
    }

    #[test]
    fn no_fragment_index_builtins_in_opencl() {
        let idx = AstNode::new(NodeKind::GetIndex, TypeTag::INT2);
        let program = program_with(vec![], vec![], vec![idx]);
        assert!(emit(&program).is_err());
    }
}
