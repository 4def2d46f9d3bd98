//! aardvark-par - Parsing for aardvark source.
//!
//! Turns a flat token list into a parse tree: recursive descent for
//! statements and declarations, precedence climbing for expressions. This
//! is the largest single piece of the core, at roughly 40% of its budget.
//!
//! The tree this crate builds is also where the evaluator's resolver
//! writes its resolved variants back in (see [`node::SyntaxKind`]); this
//! crate only knows how to build the unresolved shapes.

mod error;
mod expr;
mod node;
mod parser;
mod print;

pub use error::ParseError;
pub use node::{binary_precedence, Ast, Node, NodeId, Payload, SyntaxKind};
pub use parser::parse_program;
pub use print::{parse_tree_print, print_syntax};

#[cfg(test)]
mod tests {
    use super::*;
    use aardvark_lex::tokenize;

    fn parse_source(src: &str) -> Ast {
        let tokens = tokenize(src.as_bytes()).expect("lex");
        parse_program(&tokens).expect("parse")
    }

    fn child_kinds(ast: &Ast, id: NodeId) -> Vec<SyntaxKind> {
        ast.children(id).iter().map(|&c| ast.kind(c)).collect()
    }

    #[test]
    fn empty_program_parses_to_empty_program_node() {
        let ast = parse_source("");
        assert_eq!(ast.kind(ast.root), SyntaxKind::Program);
        assert!(ast.children(ast.root).is_empty());
    }

    #[test]
    fn declaration_with_initializer_has_two_children() {
        let ast = parse_source("var x = 10");
        let decl = ast.children(ast.root)[0];
        assert_eq!(ast.kind(decl), SyntaxKind::Declaration);
        assert_eq!(child_kinds(&ast, decl), vec![SyntaxKind::Identifier, SyntaxKind::Integer]);
    }

    #[test]
    fn declaration_without_initializer_has_one_child() {
        let ast = parse_source("var x");
        let decl = ast.children(ast.root)[0];
        assert_eq!(child_kinds(&ast, decl), vec![SyntaxKind::Identifier]);
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        // 1 + 2 * 3  =>  Plus(1, Star(2, 3))
        let ast = parse_source("print(1 + 2 * 3)");
        let call = ast.children(ast.root)[0];
        let args = ast.children(call)[1];
        let plus = ast.children(args)[0];
        assert_eq!(ast.kind(plus), SyntaxKind::Plus);
        let rhs = ast.children(plus)[1];
        assert_eq!(ast.kind(rhs), SyntaxKind::Star);
    }

    #[test]
    fn parenthesized_expression_overrides_precedence() {
        // (1 + 2) * 3  =>  Star(Plus(1, 2), 3)
        let ast = parse_source("print((1 + 2) * 3)");
        let call = ast.children(ast.root)[0];
        let args = ast.children(call)[1];
        let star = ast.children(args)[0];
        assert_eq!(ast.kind(star), SyntaxKind::Star);
        let lhs = ast.children(star)[0];
        assert_eq!(ast.kind(lhs), SyntaxKind::Plus);
    }

    #[test]
    fn addition_chain_is_left_associative() {
        // 1 - 2 - 3  =>  Minus(Minus(1, 2), 3)
        let ast = parse_source("print(1 - 2 - 3)");
        let call = ast.children(ast.root)[0];
        let args = ast.children(call)[1];
        let outer = ast.children(args)[0];
        assert_eq!(ast.kind(outer), SyntaxKind::Minus);
        let inner_lhs = ast.children(outer)[0];
        assert_eq!(ast.kind(inner_lhs), SyntaxKind::Minus);
    }

    #[test]
    fn unary_not_chain_nests_right() {
        let ast = parse_source("print(!!x)");
        let call = ast.children(ast.root)[0];
        let args = ast.children(call)[1];
        let outer = ast.children(args)[0];
        assert_eq!(ast.kind(outer), SyntaxKind::Not);
        let inner = ast.children(outer)[0];
        assert_eq!(ast.kind(inner), SyntaxKind::Not);
    }

    #[test]
    fn function_children_are_name_params_block() {
        let ast = parse_source("fn add(a, b) return a + b end");
        let func = ast.children(ast.root)[0];
        assert_eq!(ast.kind(func), SyntaxKind::Function);
        assert_eq!(
            child_kinds(&ast, func),
            vec![SyntaxKind::Identifier, SyntaxKind::ParameterList, SyntaxKind::Block]
        );
    }

    #[test]
    fn if_else_if_else_has_alternating_condition_branch_children() {
        let ast = parse_source(
            r#"if 1 == 2 then print("a") else if 2 == 2 then print("b") else print("c") end"#,
        );
        let if_stmt = ast.children(ast.root)[0];
        assert_eq!(ast.kind(if_stmt), SyntaxKind::IfStmt);
        let kinds: Vec<SyntaxKind> = child_kinds(&ast, if_stmt);
        // cond, block, cond, block, block(else) = 5 children, odd => trailing else
        assert_eq!(kinds.len(), 5);
        assert_eq!(kinds[0], SyntaxKind::Equal);
        assert_eq!(kinds[1], SyntaxKind::Block);
        assert_eq!(kinds[2], SyntaxKind::Equal);
        assert_eq!(kinds[3], SyntaxKind::Block);
        assert_eq!(kinds[4], SyntaxKind::Block);
    }

    #[test]
    fn while_children_are_condition_and_body() {
        let ast = parse_source("while i < 3 do print(i) end");
        let while_stmt = ast.children(ast.root)[0];
        assert_eq!(ast.kind(while_stmt), SyntaxKind::WhileStmt);
        assert_eq!(child_kinds(&ast, while_stmt), vec![SyntaxKind::Less, SyntaxKind::Block]);
    }

    #[test]
    fn call_children_are_callee_and_arguments() {
        let ast = parse_source("fact(n - 1)");
        let call = ast.children(ast.root)[0];
        assert_eq!(ast.kind(call), SyntaxKind::Call);
        let kinds = child_kinds(&ast, call);
        assert_eq!(kinds, vec![SyntaxKind::Identifier, SyntaxKind::ArgumentList]);
    }

    #[test]
    fn trailing_tokens_after_a_complete_program_are_an_error() {
        let tokens = tokenize(b"var x = 1 )").unwrap();
        let err = parse_program(&tokens).unwrap_err();
        match err {
            ParseError::UnparsedTrailingTokens { kind, .. } => {
                assert_eq!(kind, aardvark_lex::TokenKind::RParen);
            }
            other => panic!("expected UnparsedTrailingTokens, got {other:?}"),
        }
    }

    #[test]
    fn print_syntax_gives_stable_names() {
        assert_eq!(print_syntax(SyntaxKind::Plus), "PLUS");
        assert_eq!(print_syntax(SyntaxKind::IfStmt), "IF_STMT");
    }

    #[test]
    fn parse_tree_print_includes_every_node_kind_name() {
        let ast = parse_source("var x = 1");
        let rendered = parse_tree_print(&ast);
        assert!(rendered.contains("PROGRAM"));
        assert!(rendered.contains("DECLARATION"));
        assert!(rendered.contains("IDENTIFIER"));
        assert!(rendered.contains("INTEGER"));
    }
}
