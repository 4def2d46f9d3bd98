//! Recursive-descent parsing for the statement grammar.
//!
//! Every production that can fail is total: on mismatch it leaves the
//! token cursor exactly where it found it, so the caller can always try
//! the next alternative in source order. [`Parser::attempt`] is the
//! savepoint guard that makes this automatic — a production never has to
//! remember how far it got before bailing out.

use aardvark_lex::{Token, TokenKind, TokenPayload};

use crate::error::ParseError;
use crate::node::{Ast, AstBuilder, Node, NodeId, Payload, SyntaxKind};

pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    builder: AstBuilder,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Parser { tokens, pos: 0, builder: Ast::builder() }
    }

    /// Runs `f` from the current position; if it returns `None`, the
    /// cursor is restored to where it stood before the call. Nothing `f`
    /// allocates in the node arena is reclaimed on failure — those nodes
    /// simply never become reachable from the final tree.
    pub(crate) fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let saved = self.pos;
        let result = f(self);
        if result.is_none() {
            self.pos = saved;
        }
        result
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    pub(crate) fn advance_one(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Consumes the current token if its kind is `kind`. Leaves the
    /// cursor untouched otherwise.
    pub(crate) fn eat_kind(&mut self, kind: TokenKind) -> Option<()> {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            Some(())
        } else {
            None
        }
    }

    fn eat_token(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek_kind() == Some(kind) {
            let tok = self.tokens[self.pos].clone();
            self.pos += 1;
            Some(tok)
        } else {
            None
        }
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        self.builder.alloc(node)
    }

    fn empty_list(&mut self, kind: SyntaxKind) -> NodeId {
        self.builder.alloc(Node::interior(kind, Vec::new()))
    }

    fn parse_identifier_leaf(&mut self) -> Option<NodeId> {
        let tok = self.eat_token(TokenKind::Identifier)?;
        let fp = match tok.payload {
            TokenPayload::Identifier(fp) => fp,
            _ => unreachable!("Identifier token without identifier payload"),
        };
        Some(self.builder.alloc(Node::leaf(SyntaxKind::Identifier, Payload::Identifier(fp))))
    }

    fn parse_integer_leaf(&mut self) -> Option<NodeId> {
        let tok = self.eat_token(TokenKind::Integer)?;
        let value = match tok.payload {
            TokenPayload::Integer(v) => v,
            _ => unreachable!("Integer token without integer payload"),
        };
        Some(self.builder.alloc(Node::leaf(SyntaxKind::Integer, Payload::Integer(value))))
    }

    fn parse_string_leaf(&mut self) -> Option<NodeId> {
        let tok = self.eat_token(TokenKind::String)?;
        let value = match tok.payload {
            TokenPayload::String(s) => s,
            _ => unreachable!("String token without string payload"),
        };
        Some(self.builder.alloc(Node::leaf(SyntaxKind::String, Payload::Str(value))))
    }

    pub(crate) fn parse_program_node(&mut self) -> NodeId {
        let mut children = Vec::new();
        while let Some(component) = self.parse_component() {
            children.push(component);
        }
        self.builder.alloc(Node::interior(SyntaxKind::Program, children))
    }

    fn parse_component(&mut self) -> Option<NodeId> {
        self.parse_function().or_else(|| self.parse_line()).or_else(|| self.parse_control())
    }

    fn parse_function(&mut self) -> Option<NodeId> {
        self.attempt(|p| {
            p.eat_kind(TokenKind::Fn)?;
            let name = p.parse_identifier_leaf()?;
            p.eat_kind(TokenKind::LParen)?;
            let params =
                p.parse_parameter_list().unwrap_or_else(|| p.empty_list(SyntaxKind::ParameterList));
            p.eat_kind(TokenKind::RParen)?;
            let body = p.parse_block();
            p.eat_kind(TokenKind::End)?;
            Some(p.builder.alloc(Node::interior(SyntaxKind::Function, vec![name, params, body])))
        })
    }

    fn parse_parameter_list(&mut self) -> Option<NodeId> {
        self.attempt(|p| {
            let first = p.parse_identifier_leaf()?;
            let mut children = vec![first];
            while p.eat_kind(TokenKind::Comma).is_some() {
                children.push(p.parse_identifier_leaf()?);
            }
            Some(p.builder.alloc(Node::interior(SyntaxKind::ParameterList, children)))
        })
    }

    pub(crate) fn parse_argument_list(&mut self) -> Option<NodeId> {
        self.attempt(|p| {
            let first = p.parse_expression()?;
            let mut children = vec![first];
            while p.eat_kind(TokenKind::Comma).is_some() {
                children.push(p.parse_expression()?);
            }
            Some(p.builder.alloc(Node::interior(SyntaxKind::ArgumentList, children)))
        })
    }

    fn parse_line(&mut self) -> Option<NodeId> {
        self.parse_declaration()
            .or_else(|| self.parse_assignment())
            .or_else(|| self.parse_call())
            .or_else(|| self.parse_return())
    }

    fn parse_declaration(&mut self) -> Option<NodeId> {
        self.attempt(|p| {
            p.eat_kind(TokenKind::Var)?;
            let name = p.parse_identifier_leaf()?;
            let initializer = p.attempt(|p| {
                p.eat_kind(TokenKind::Assign)?;
                p.parse_expression()
            });
            let mut children = vec![name];
            children.extend(initializer);
            Some(p.builder.alloc(Node::interior(SyntaxKind::Declaration, children)))
        })
    }

    fn parse_assignment(&mut self) -> Option<NodeId> {
        self.attempt(|p| {
            let target = p.parse_identifier_leaf()?;
            p.eat_kind(TokenKind::Assign)?;
            let value = p.parse_expression()?;
            Some(p.builder.alloc(Node::interior(SyntaxKind::Assignment, vec![target, value])))
        })
    }

    pub(crate) fn parse_call(&mut self) -> Option<NodeId> {
        self.attempt(|p| {
            let callee = p.parse_identifier_leaf()?;
            p.eat_kind(TokenKind::LParen)?;
            let args =
                p.parse_argument_list().unwrap_or_else(|| p.empty_list(SyntaxKind::ArgumentList));
            p.eat_kind(TokenKind::RParen)?;
            Some(p.builder.alloc(Node::interior(SyntaxKind::Call, vec![callee, args])))
        })
    }

    fn parse_return(&mut self) -> Option<NodeId> {
        self.attempt(|p| {
            p.eat_kind(TokenKind::Return)?;
            let mut children = Vec::new();
            children.extend(p.parse_expression());
            Some(p.builder.alloc(Node::interior(SyntaxKind::ReturnStmt, children)))
        })
    }

    fn parse_control(&mut self) -> Option<NodeId> {
        self.parse_if().or_else(|| self.parse_while())
    }

    fn parse_if(&mut self) -> Option<NodeId> {
        self.attempt(|p| {
            p.eat_kind(TokenKind::If)?;
            let mut children = Vec::new();
            children.push(p.parse_expression()?);
            p.eat_kind(TokenKind::Then)?;
            children.push(p.parse_block());

            loop {
                let else_if = p.attempt(|p| {
                    p.eat_kind(TokenKind::Else)?;
                    p.eat_kind(TokenKind::If)?;
                    let cond = p.parse_expression()?;
                    p.eat_kind(TokenKind::Then)?;
                    let branch = p.parse_block();
                    Some((cond, branch))
                });
                match else_if {
                    Some((cond, branch)) => {
                        children.push(cond);
                        children.push(branch);
                    }
                    None => break,
                }
            }

            if let Some(branch) = p.attempt(|p| {
                p.eat_kind(TokenKind::Else)?;
                Some(p.parse_block())
            }) {
                children.push(branch);
            }

            p.eat_kind(TokenKind::End)?;
            Some(p.builder.alloc(Node::interior(SyntaxKind::IfStmt, children)))
        })
    }

    fn parse_while(&mut self) -> Option<NodeId> {
        self.attempt(|p| {
            p.eat_kind(TokenKind::While)?;
            let cond = p.parse_expression()?;
            p.eat_kind(TokenKind::Do)?;
            let body = p.parse_block();
            p.eat_kind(TokenKind::End)?;
            Some(p.builder.alloc(Node::interior(SyntaxKind::WhileStmt, vec![cond, body])))
        })
    }

    fn parse_block(&mut self) -> NodeId {
        let mut children = Vec::new();
        loop {
            if let Some(line) = self.parse_line() {
                children.push(line);
                continue;
            }
            if let Some(control) = self.parse_control() {
                children.push(control);
                continue;
            }
            break;
        }
        self.builder.alloc(Node::interior(SyntaxKind::Block, children))
    }

    fn parse_primary_call_or_leaf(&mut self) -> Option<NodeId> {
        self.parse_call()
            .or_else(|| self.parse_identifier_leaf())
            .or_else(|| self.parse_integer_leaf())
            .or_else(|| self.parse_string_leaf())
    }

    pub(crate) fn parse_primary(&mut self) -> Option<NodeId> {
        if let Some(parenthesized) = self.attempt(|p| {
            p.eat_kind(TokenKind::LParen)?;
            let inner = p.parse_expression()?;
            p.eat_kind(TokenKind::RParen)?;
            Some(inner)
        }) {
            return Some(parenthesized);
        }
        self.parse_primary_call_or_leaf()
    }
}

/// Parses a complete program from a flat token list.
///
/// Consumes `tokens` fully on success. If the top-level component loop
/// stops with tokens still remaining, that is the parser's single failure
/// mode — there is no partial tree returned and no recovery attempted.
pub fn parse_program(tokens: &[Token]) -> Result<Ast, ParseError> {
    let mut parser = Parser::new(tokens);
    let root = parser.parse_program_node();
    if let Some(kind) = parser.peek_kind() {
        return Err(ParseError::UnparsedTrailingTokens { index: parser.pos, kind });
    }
    Ok(parser.builder.finish(root))
}
