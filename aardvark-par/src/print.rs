//! Debug renderers for syntax kinds and parse trees.
//!
//! These exist for the `-s`/`-t` dump flags a CLI front end offers; they
//! are not on any hot path and have no bearing on evaluation.

use std::fmt::Write as _;

use aardvark_util::Idx;

use crate::node::{Ast, NodeId, Payload, SyntaxKind};

/// A short, stable name for a syntax kind, independent of `Debug`'s
/// derive-generated spelling.
pub fn print_syntax(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::Identifier => "IDENTIFIER",
        SyntaxKind::Integer => "INTEGER",
        SyntaxKind::String => "STRING",
        SyntaxKind::Comma => "COMMA",
        SyntaxKind::LParen => "LPAREN",
        SyntaxKind::RParen => "RPAREN",
        SyntaxKind::Plus => "PLUS",
        SyntaxKind::Minus => "MINUS",
        SyntaxKind::Star => "STAR",
        SyntaxKind::Slash => "SLASH",
        SyntaxKind::Assign => "ASSIGN",
        SyntaxKind::Not => "NOT",
        SyntaxKind::Greater => "GREATER",
        SyntaxKind::Less => "LESS",
        SyntaxKind::Equal => "EQUAL",
        SyntaxKind::NotEqual => "NOT_EQUAL",
        SyntaxKind::GreaterEqual => "GREATER_EQUAL",
        SyntaxKind::LessEqual => "LESS_EQUAL",
        SyntaxKind::Do => "DO",
        SyntaxKind::Else => "ELSE",
        SyntaxKind::End => "END",
        SyntaxKind::Fn => "FN",
        SyntaxKind::If => "IF",
        SyntaxKind::Return => "RETURN",
        SyntaxKind::Then => "THEN",
        SyntaxKind::Var => "VAR",
        SyntaxKind::While => "WHILE",
        SyntaxKind::Program => "PROGRAM",
        SyntaxKind::Function => "FUNCTION",
        SyntaxKind::Block => "BLOCK",
        SyntaxKind::Declaration => "DECLARATION",
        SyntaxKind::Assignment => "ASSIGNMENT",
        SyntaxKind::Call => "CALL",
        SyntaxKind::ParameterList => "PARAMETER_LIST",
        SyntaxKind::ArgumentList => "ARGUMENT_LIST",
        SyntaxKind::ReturnStmt => "RETURN_STMT",
        SyntaxKind::IfStmt => "IF_STMT",
        SyntaxKind::WhileStmt => "WHILE_STMT",
        SyntaxKind::StandardCall => "STANDARD_CALL",
        SyntaxKind::KnownCall => "KNOWN_CALL",
        SyntaxKind::KnownLocal => "KNOWN_LOCAL",
        SyntaxKind::KnownGlobal => "KNOWN_GLOBAL",
    }
}

/// Renders the full tree as indented text, one node per line.
pub fn parse_tree_print(ast: &Ast) -> String {
    let mut out = String::new();
    write_node(ast, ast.root, 0, &mut out);
    out
}

fn write_node(ast: &Ast, id: NodeId, depth: usize, out: &mut String) {
    let node = ast.node(id);
    let _ = write!(out, "{:indent$}{}", "", print_syntax(node.kind), indent = depth * 2);
    match &node.payload {
        Payload::None => {}
        Payload::Identifier(fp) => {
            let _ = write!(out, " #{:016x}", fp.raw());
        }
        Payload::Integer(v) => {
            let _ = write!(out, " {v}");
        }
        Payload::Str(s) => {
            let _ = write!(out, " {s:?}");
        }
        Payload::LocalSlot(slot) => {
            let _ = write!(out, " local[{slot}]");
        }
        Payload::GlobalSlot(slot) => {
            let _ = write!(out, " global[{slot}]");
        }
        Payload::Function(fid) => {
            let _ = write!(out, " -> node#{}", fid.index());
        }
    }
    out.push('\n');
    for &child in &node.children {
        write_node(ast, child, depth + 1, out);
    }
}
