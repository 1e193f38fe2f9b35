//! The statement/expression emitter shared by both backends.
//!
//! Grounded on `OpenGLCompiler::print_code`: every rule in this file
//! (operator parenthesization, first-use declaration of a fresh `Var`,
//! control-flow bracing, the four-way swizzle table) is identical between
//! GLSL and OpenCL C. `OpenCLCompiler::print_code` in the source this
//! crate is grounded on is an empty stub; per DESIGN.md's Open Question 2
//! this module is what fills it in, with only type spelling and buffer
//! sampling routed through [`Dialect`].

use std::collections::HashSet;
use std::marker::PhantomData;

use shade_core::{AstNode, BuiltinFn, LiteralValue, NodeKind, TypeTag};

use crate::dialect::{Dialect, SampleCoord2D};
use crate::error::EmitError;
use crate::mangle::mangle;

pub(crate) struct Visitor<D: Dialect> {
    out: String,
    indent: usize,
    declared: HashSet<i64>,
    _dialect: PhantomData<D>,
}

impl<D: Dialect> Visitor<D> {
    pub(crate) fn new() -> Self {
        Visitor {
            out: String::new(),
            indent: 0,
            declared: HashSet::new(),
            _dialect: PhantomData,
        }
    }

    pub(crate) fn into_output(self) -> String {
        self.out
    }

    /// Marks a symbol already declared, so the emitted kernel/shader body
    /// doesn't redeclare a `ConstVar`/`OutVar` it already printed as a
    /// parameter or uniform.
    pub(crate) fn predeclare(&mut self, symbol: i64) {
        self.declared.insert(symbol);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push(' ');
        }
    }

    fn needs_semicolon(kind: NodeKind) -> bool {
        !matches!(
            kind,
            NodeKind::Block | NodeKind::If | NodeKind::ElseIf | NodeKind::Else | NodeKind::While | NodeKind::ForInRange
        )
    }

    fn emit_statement_list(&mut self, stmts: &[AstNode]) -> Result<(), EmitError> {
        for stmt in stmts {
            self.write_indent();
            self.emit(stmt)?;
            if Self::needs_semicolon(stmt.kind) {
                self.out.push_str(";\n");
            } else {
                self.out.push('\n');
            }
        }
        Ok(())
    }

    /// Emits the body of the captured `Main` block at one indent level in,
    /// matching `print_code`'s `NodeType::Main` case.
    pub(crate) fn emit_main(&mut self, main: &AstNode) -> Result<(), EmitError> {
        assert_eq!(main.kind, NodeKind::Main, "emit_main requires a Main node");
        self.indent = 1;
        self.emit_statement_list(&main.children)
    }

    fn emit_block_body(&mut self, stmts: &[AstNode]) -> Result<(), EmitError> {
        self.out.push_str("{\n");
        self.indent += 1;
        self.emit_statement_list(stmts)?;
        self.indent -= 1;
        self.write_indent();
        self.out.push_str("}\n");
        Ok(())
    }

    fn emit_operator(&mut self, op: &str, lhs: &AstNode, rhs: &AstNode) -> Result<(), EmitError> {
        self.out.push('(');
        self.emit(lhs)?;
        self.out.push(' ');
        self.out.push_str(op);
        self.out.push(' ');
        self.emit(rhs)?;
        self.out.push(')');
        Ok(())
    }

    fn emit_literal(&mut self, node: &AstNode) -> Result<(), EmitError> {
        let value = node
            .literal_value()
            .ok_or_else(|| EmitError::MalformedAst("Literal node carries no value".into()))?;
        match value {
            LiteralValue::Bool(b) => self.out.push_str(if b { "true" } else { "false" }),
            LiteralValue::Int(i) => self.out.push_str(&i.to_string()),
            LiteralValue::UInt(u) => {
                self.out.push_str(&u.to_string());
                self.out.push('u');
            }
            LiteralValue::Float(f) => self.out.push_str(&format_float(f)),
        }
        Ok(())
    }

    fn emit_member(&mut self, node: &AstNode) -> Result<(), EmitError> {
        if node.children.len() != 2 {
            return Err(EmitError::MalformedAst("Member must have exactly two children".into()));
        }
        self.emit(&node.children[0])?;
        let idx = match node.children[1].literal_value() {
            Some(LiteralValue::Int(i)) => i,
            _ => return Err(EmitError::MalformedAst("Member's component index must be an Int literal".into())),
        };
        let letter = match idx {
            0 => "x",
            1 => "y",
            2 => "z",
            3 => "w",
            other => return Err(EmitError::MalformedAst(format!("invalid member index {other}"))),
        };
        self.out.push('.');
        self.out.push_str(letter);
        Ok(())
    }

    fn emit_assignment(&mut self, node: &AstNode) -> Result<(), EmitError> {
        if node.children.len() != 2 {
            return Err(EmitError::MalformedAst("Assignment must have exactly two children".into()));
        }
        let lhs = &node.children[0];
        if lhs.kind == NodeKind::Var {
            let sym = lhs
                .symbol()
                .ok_or_else(|| EmitError::MalformedAst("Var with no symbol".into()))?;
            if !self.declared.contains(&sym.value()) {
                self.out.push_str(D::scalar_type_name(lhs.ty)?);
                self.out.push(' ');
                self.declared.insert(sym.value());
            }
        }
        self.emit(lhs)?;
        self.out.push_str(" = ");
        self.emit(&node.children[1])?;
        Ok(())
    }

    fn emit_branch(&mut self, keyword: &str, node: &AstNode) -> Result<(), EmitError> {
        if node.children.is_empty() {
            return Err(EmitError::MalformedAst(format!("{keyword} is missing its condition")));
        }
        self.out.push_str(keyword);
        self.out.push_str(" ( ");
        self.emit(&node.children[0])?;
        self.out.push_str(" )\n");
        self.write_indent();
        self.emit_block_body(&node.children[1..])
    }

    fn emit_for_in_range(&mut self, node: &AstNode) -> Result<(), EmitError> {
        if node.children.len() < 3 {
            return Err(EmitError::MalformedAst(
                "ForInRange needs an iterator, a start bound, and a stop bound".into(),
            ));
        }
        let sym = node.children[0]
            .symbol()
            .ok_or_else(|| EmitError::MalformedAst("ForInRange's iterator must carry a symbol".into()))?;
        let (from, to) = match (node.children[1].literal_value(), node.children[2].literal_value()) {
            (Some(LiteralValue::Int(f)), Some(LiteralValue::Int(t))) => (f, t),
            _ => return Err(EmitError::MalformedAst("ForInRange's bounds must be Int literals".into())),
        };
        let name = mangle(sym.value());
        self.out.push_str(&format!("for (int {name} = {from}; {name} < {to}; ++{name}) \n"));
        self.write_indent();
        self.emit_block_body(&node.children[3..])
    }

    fn emit_constructor(&mut self, node: &AstNode) -> Result<(), EmitError> {
        self.out.push_str(D::scalar_type_name(node.ty)?);
        self.out.push('(');
        for (i, child) in node.children.iter().enumerate() {
            if i != 0 {
                self.out.push_str(", ");
            }
            self.emit(child)?;
        }
        self.out.push(')');
        Ok(())
    }

    fn emit_cast(&mut self, node: &AstNode) -> Result<(), EmitError> {
        if node.children.len() != 1 {
            return Err(EmitError::MalformedAst("Cast must have exactly one child".into()));
        }
        self.out.push_str(D::scalar_type_name(node.ty)?);
        self.out.push('(');
        self.emit(&node.children[0])?;
        self.out.push(')');
        Ok(())
    }

    fn emit_function(&mut self, node: &AstNode) -> Result<(), EmitError> {
        let func = node
            .builtin()
            .ok_or_else(|| EmitError::MalformedAst("Function node carries no builtin tag".into()))?;
        self.out.push_str(builtin_name(func));
        self.out.push('(');
        for (i, child) in node.children.iter().enumerate() {
            if i != 0 {
                self.out.push_str(", ");
            }
            self.emit(child)?;
        }
        self.out.push(')');
        Ok(())
    }

    fn buffer_var_name(node: &AstNode) -> Result<String, EmitError> {
        let sym = node
            .symbol()
            .ok_or_else(|| EmitError::MalformedAst("sample operand must reference a buffer Var".into()))?;
        Ok(mangle(sym.value()))
    }

    fn emit_sample1d(&mut self, node: &AstNode) -> Result<(), EmitError> {
        if node.children.len() != 2 {
            return Err(EmitError::MalformedAst("Sample1D needs a buffer and an index".into()));
        }
        let buf = Self::buffer_var_name(&node.children[0])?;
        let index_code = render_expr::<D>(&node.children[1], self.indent)?;
        let expr = D::sample1d(&buf, node.ty, &index_code)?;
        self.out.push_str(&expr);
        Ok(())
    }

    fn emit_sample2d(&mut self, node: &AstNode) -> Result<(), EmitError> {
        if node.children.len() != 2 && node.children.len() != 3 {
            return Err(EmitError::MalformedAst(
                "Sample2D needs a buffer and either one Int2 or two Int operands".into(),
            ));
        }
        let buf = Self::buffer_var_name(&node.children[0])?;
        let coords = if node.children.len() == 2 {
            SampleCoord2D::Packed(render_expr::<D>(&node.children[1], self.indent)?)
        } else {
            SampleCoord2D::Separate(
                render_expr::<D>(&node.children[1], self.indent)?,
                render_expr::<D>(&node.children[2], self.indent)?,
            )
        };
        let expr = D::sample2d(&buf, node.ty, coords)?;
        self.out.push_str(&expr);
        Ok(())
    }

    fn emit(&mut self, node: &AstNode) -> Result<(), EmitError> {
        use NodeKind::*;
        match node.kind {
            Var => {
                let sym = node
                    .symbol()
                    .ok_or_else(|| EmitError::MalformedAst("Var with no symbol".into()))?;
                self.out.push_str(&mangle(sym.value()));
            }
            Literal => self.emit_literal(node)?,
            Member => self.emit_member(node)?,
            Assignment => self.emit_assignment(node)?,
            Equal => self.emit_operator("==", &node.children[0], &node.children[1])?,
            NotEqual => self.emit_operator("!=", &node.children[0], &node.children[1])?,
            Greater => self.emit_operator(">", &node.children[0], &node.children[1])?,
            GreaterEqual => self.emit_operator(">=", &node.children[0], &node.children[1])?,
            Less => self.emit_operator("<", &node.children[0], &node.children[1])?,
            LessEqual => self.emit_operator("<=", &node.children[0], &node.children[1])?,
            LogicalAnd => self.emit_operator("&&", &node.children[0], &node.children[1])?,
            LogicalOr => self.emit_operator("||", &node.children[0], &node.children[1])?,
            LogicalNot => {
                self.out.push_str("!(");
                self.emit(&node.children[0])?;
                self.out.push(')');
            }
            BitwiseAnd => self.emit_operator("&", &node.children[0], &node.children[1])?,
            BitwiseOr => self.emit_operator("|", &node.children[0], &node.children[1])?,
            BitwiseXor => self.emit_operator("^", &node.children[0], &node.children[1])?,
            BitwiseNot => {
                self.out.push_str("~(");
                self.emit(&node.children[0])?;
                self.out.push(')');
            }
            LeftShift => self.emit_operator("<<", &node.children[0], &node.children[1])?,
            RightShift => self.emit_operator(">>", &node.children[0], &node.children[1])?,
            UnaryMinus => {
                self.out.push('-');
                self.emit(&node.children[0])?;
            }
            Add => self.emit_operator("+", &node.children[0], &node.children[1])?,
            Subtract => self.emit_operator("-", &node.children[0], &node.children[1])?,
            Multiply => self.emit_operator("*", &node.children[0], &node.children[1])?,
            Divide => self.emit_operator("/", &node.children[0], &node.children[1])?,
            Modulo => self.emit_operator("%", &node.children[0], &node.children[1])?,
            Block => self.emit_block_body(&node.children)?,
            If => self.emit_branch("if", node)?,
            ElseIf => self.emit_branch("else if", node)?,
            Else => {
                self.out.push_str("else\n");
                self.write_indent();
                self.emit_block_body(&node.children)?;
            }
            While => self.emit_branch("while", node)?,
            ForInRange => self.emit_for_in_range(node)?,
            Constructor => self.emit_constructor(node)?,
            Cast => self.emit_cast(node)?,
            Function => self.emit_function(node)?,
            Sample1D => self.emit_sample1d(node)?,
            Sample2D => self.emit_sample2d(node)?,
            GetIndex => self.out.push_str(D::fragment_index()?),
            GetNormalizedIndex => self.out.push_str(D::normalized_fragment_index()?),
            Program | ConstData | OutData | Main | OutVar | ConstVar => {
                return Err(EmitError::UnsupportedNode { kind: node_kind_name(node.kind), target: D::NAME })
            }
        }
        Ok(())
    }
}

fn render_expr<D: Dialect>(node: &AstNode, indent: usize) -> Result<String, EmitError> {
    let mut v = Visitor::<D>::new();
    v.indent = indent;
    v.emit(node)?;
    Ok(v.into_output())
}

fn node_kind_name(kind: NodeKind) -> &'static str {
    use NodeKind::*;
    match kind {
        Program => "Program",
        ConstData => "ConstData",
        OutData => "OutData",
        Main => "Main",
        OutVar => "OutVar",
        ConstVar => "ConstVar",
        _ => "unsupported node",
    }
}

fn builtin_name(f: BuiltinFn) -> &'static str {
    use BuiltinFn::*;
    match f {
        Sin => "sin",
        Cos => "cos",
        Tan => "tan",
        Asin => "asin",
        Acos => "acos",
        Atan => "atan",
        Sinh => "sinh",
        Cosh => "cosh",
        Tanh => "tanh",
        Asinh => "asinh",
        Acosh => "acosh",
        Atanh => "atanh",
        Pow => "pow",
        Exp => "exp",
        Log => "log",
        Exp2 => "exp2",
        Log2 => "log2",
        Sqrt => "sqrt",
        Abs => "abs",
        Sign => "sign",
        Floor => "floor",
        Ceil => "ceil",
        Min => "min",
        Max => "max",
        Clamp => "clamp",
        IsNan => "isnan",
        IsInf => "isinf",
        Length => "length",
        Distance => "distance",
        Dot => "dot",
        Cross => "cross",
        Normalize => "normalize",
        // `shade-frontend` never wraps these two in a `Function` node; they
        // build `GetIndex`/`GetNormalizedIndex` nodes directly instead.
        Index | NormalizedIndex => unreachable!("Index/NormalizedIndex are never Function nodes"),
    }
}

/// Ports `print_code`'s float formatting: six fixed decimal digits, then
/// trim trailing zeros but never the single digit immediately after the
/// decimal point.
fn format_float(val: f32) -> String {
    let mut s = format!("{val:.6}");
    while s.ends_with('0') && !s.ends_with(".0") && !s.ends_with("-.0") {
        s.pop();
    }
    s.push('f');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_zeros_but_keeps_one_digit() {
        assert_eq!(format_float(1.5), "1.5f");
        assert_eq!(format_float(2.0), "2.0f");
        assert_eq!(format_float(0.125), "0.125f");
    }

    #[test]
    fn node_kind_name_covers_struct_kinds() {
        assert_eq!(node_kind_name(NodeKind::Program), "Program");
    }
}
