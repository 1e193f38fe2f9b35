//! Diagnostic dumps of a captured `AstNode` tree: an indented text form and
//! a Graphviz `digraph` form (spec.md §6's two diagnostic formats).
//!
//! Ported from `AST.cpp`'s `ASTNode::Print`/`PrintNode`/`PrintDot`: one
//! space of indent per tree level, `kind -> type` as the label stem with
//! `, symbol = ..., name = ...` or `, val = ...` appended for the node
//! kinds that carry a payload, and a `digraph AST { ... }` with the
//! source's exact `node [fontsize=12, shape=box]; rankdir=LR;` header and
//! `node<id>` vertex names.

use shade_core::{AstNode, LiteralValue, NodeKind};

use crate::mangle::mangle;

fn node_label(node: &AstNode) -> String {
    let mut label = format!("{:?} -> {:?}", node.kind, node.ty);
    match node.kind {
        NodeKind::Var | NodeKind::ConstVar | NodeKind::OutVar => {
            if let Some(sym) = node.symbol() {
                label.push_str(&format!(", symbol = {}", mangle(sym.value())));
            }
            if let Some(name) = &node.name {
                label.push_str(&format!(", name = {name}"));
            }
        }
        NodeKind::Literal => {
            if let Some(value) = node.literal_value() {
                let val = match value {
                    LiteralValue::Bool(b) => b.to_string(),
                    LiteralValue::Int(i) => i.to_string(),
                    LiteralValue::UInt(u) => u.to_string(),
                    LiteralValue::Float(f) => f.to_string(),
                };
                label.push_str(&format!(", val = {val}"));
            }
        }
        _ => {}
    }
    label
}

/// Renders `root` as an indented text tree, one space per level (`AST.cpp`'s
/// `Print(node, indent)`).
pub fn dump_text(root: &AstNode) -> String {
    let mut out = String::new();
    dump_text_into(root, 0, &mut out);
    out
}

fn dump_text_into(node: &AstNode, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push(' ');
    }
    out.push_str(&node_label(node));
    out.push('\n');
    for child in &node.children {
        dump_text_into(child, depth + 1, out);
    }
}

/// Renders `root` as a Graphviz `digraph AST { ... }`, matching `PrintDot`'s
/// header, `node<id>` vertex names, and pre-order edge numbering.
pub fn dump_dot(root: &AstNode) -> String {
    let mut out = String::new();
    out.push_str("digraph AST\n{\n");
    out.push_str(" node [fontsize=12, shape=box];\n");
    out.push_str(" rankdir=LR;\n");
    let mut id = 0u32;
    dump_dot_node(root, &mut id, &mut out);
    out.push_str("}\n");
    out
}

fn dump_dot_node(node: &AstNode, id: &mut u32, out: &mut String) {
    let my_id = *id;
    out.push_str(&format!(" node{my_id} [label=\"{}\"];\n", node_label(node).replace('"', "\\\"")));
    for child in &node.children {
        *id += 1;
        out.push_str(&format!(" node{my_id} -> node{};\n", *id));
        dump_dot_node(child, id, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shade_core::{SymbolId, TypeTag};

    #[test]
    fn text_dump_indents_children_one_space_per_level() {
        let leaf = AstNode::with_symbol(NodeKind::Var, TypeTag::INT, SymbolId::new(0));
        let root = AstNode::new(NodeKind::Block, TypeTag::VOID).with_child(leaf);
        let text = dump_text(&root);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Block"));
        assert!(lines[1].starts_with(" Var"));
        assert!(!lines[1].starts_with("  Var"));
    }

    #[test]
    fn dot_dump_emits_one_edge_per_child() {
        let leaf = AstNode::with_symbol(NodeKind::Var, TypeTag::INT, SymbolId::new(0));
        let root = AstNode::new(NodeKind::Block, TypeTag::VOID).with_child(leaf);
        let dot = dump_dot(&root);
        assert!(dot.starts_with("digraph AST\n{\n"));
        assert!(dot.contains("rankdir=LR;"));
        assert!(dot.contains("node0 -> node1;"));
    }
}
