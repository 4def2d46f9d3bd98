//! Expression parsing: precedence climbing over the three binary
//! precedence levels, plus right-associative unary `!`.
//!
//! This replaces the reference implementation's in-place rightmost-spine
//! tree rewrite with the textbook precedence-climbing recursion. Both
//! produce the same left-associative shape for this grammar; the
//! recursive form needs no scratch wrapper node and no spine walk.

use aardvark_lex::TokenKind;

use crate::node::{binary_precedence, Node, NodeId, SyntaxKind};
use crate::parser::Parser;

impl<'t> Parser<'t> {
    pub(crate) fn parse_expression(&mut self) -> Option<NodeId> {
        self.parse_expression_bp(0)
    }

    fn parse_expression_bp(&mut self, min_precedence: u8) -> Option<NodeId> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op_kind = match self.peek_kind() {
                Some(kind) => kind,
                None => break,
            };
            let precedence = match binary_precedence(op_kind.into()) {
                Some(p) if p >= min_precedence => p,
                _ => break,
            };
            self.advance_one();
            // Recursing with `precedence + 1` rather than `precedence`
            // is what keeps equal-precedence operators out of the right
            // subtree, which is what makes the chain left-associative.
            let rhs = self.parse_expression_bp(precedence + 1)?;
            lhs = self.alloc(Node::interior(op_kind.into(), vec![lhs, rhs]));
        }
        Some(lhs)
    }

    fn parse_unary(&mut self) -> Option<NodeId> {
        if let Some(negated) = self.attempt(|p| {
            p.eat_kind(TokenKind::Not)?;
            let operand = p.parse_unary()?;
            Some(p.alloc(Node::interior(SyntaxKind::Not, vec![operand])))
        }) {
            return Some(negated);
        }
        self.parse_primary()
    }
}
