//! The parse tree: a single tagged-node arena shared by raw tokens,
//! grammar productions, and the evaluator's resolved variants.

use std::rc::Rc;

use aardvark_util::{define_idx, Fingerprint, IndexVec};

use aardvark_lex::TokenKind;

define_idx! {
    /// A handle into an [`Ast`]'s node arena.
    ///
    /// Storing a `NodeId` instead of a reference or raw pointer is what
    /// lets the resolver rewrite one node (say, a call's own kind and
    /// payload) while the evaluator still holds a live borrow of a
    /// sibling node elsewhere in the tree — there is never more than one
    /// node borrowed out of the arena at a time.
    NodeId
}

/// The single discriminator every parse node carries: which raw token it
/// came from, which grammar production it heads, or which resolved
/// runtime variant the evaluator has rewritten it to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    // Raw token kinds (leaves).
    Identifier,
    Integer,
    String,
    Comma,
    LParen,
    RParen,
    Plus,
    Minus,
    Star,
    Slash,
    Assign,
    Not,
    Greater,
    Less,
    Equal,
    NotEqual,
    GreaterEqual,
    LessEqual,
    Do,
    Else,
    End,
    Fn,
    If,
    Return,
    Then,
    Var,
    While,

    // Grammar productions.
    Program,
    Function,
    Block,
    Declaration,
    Assignment,
    Call,
    ParameterList,
    ArgumentList,
    ReturnStmt,
    IfStmt,
    WhileStmt,

    // Resolved runtime variants, written in place by the evaluator the
    // first time it visits the node that originally held `Identifier` or
    // `Call`.
    StandardCall,
    KnownCall,
    KnownLocal,
    KnownGlobal,
}

impl From<TokenKind> for SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Identifier => SyntaxKind::Identifier,
            TokenKind::Integer => SyntaxKind::Integer,
            TokenKind::String => SyntaxKind::String,
            TokenKind::Comma => SyntaxKind::Comma,
            TokenKind::LParen => SyntaxKind::LParen,
            TokenKind::RParen => SyntaxKind::RParen,
            TokenKind::Plus => SyntaxKind::Plus,
            TokenKind::Minus => SyntaxKind::Minus,
            TokenKind::Star => SyntaxKind::Star,
            TokenKind::Slash => SyntaxKind::Slash,
            TokenKind::Assign => SyntaxKind::Assign,
            TokenKind::Not => SyntaxKind::Not,
            TokenKind::Greater => SyntaxKind::Greater,
            TokenKind::Less => SyntaxKind::Less,
            TokenKind::Equal => SyntaxKind::Equal,
            TokenKind::NotEqual => SyntaxKind::NotEqual,
            TokenKind::GreaterEqual => SyntaxKind::GreaterEqual,
            TokenKind::LessEqual => SyntaxKind::LessEqual,
            TokenKind::Do => SyntaxKind::Do,
            TokenKind::Else => SyntaxKind::Else,
            TokenKind::End => SyntaxKind::End,
            TokenKind::Fn => SyntaxKind::Fn,
            TokenKind::If => SyntaxKind::If,
            TokenKind::Return => SyntaxKind::Return,
            TokenKind::Then => SyntaxKind::Then,
            TokenKind::Var => SyntaxKind::Var,
            TokenKind::While => SyntaxKind::While,
        }
    }
}

/// Returns the operator precedence of a binary-operator syntax kind, or
/// `None` if `kind` is not a binary operator.
///
/// Level 0 (loosest): comparisons. Level 1: `+ -`. Level 2 (tightest):
/// `* /`. All binary operators are left-associative.
pub fn binary_precedence(kind: SyntaxKind) -> Option<u8> {
    match kind {
        SyntaxKind::Equal
        | SyntaxKind::NotEqual
        | SyntaxKind::Greater
        | SyntaxKind::Less
        | SyntaxKind::GreaterEqual
        | SyntaxKind::LessEqual => Some(0),
        SyntaxKind::Plus | SyntaxKind::Minus => Some(1),
        SyntaxKind::Star | SyntaxKind::Slash => Some(2),
        _ => None,
    }
}

/// The payload variant that applies to a node depends entirely on its
/// current `SyntaxKind`; this is the sum type the reference's untagged
/// union would otherwise have to be.
#[derive(Debug, Clone)]
pub enum Payload {
    None,
    Identifier(Fingerprint),
    Integer(i64),
    Str(Rc<str>),
    /// Frame-relative stack slot for a `KnownLocal`. Negative for
    /// parameters, non-negative for declared locals.
    LocalSlot(i64),
    /// Absolute stack slot for a `KnownGlobal`.
    GlobalSlot(usize),
    /// Handle to the `Function` node this `KnownCall` resolves to.
    Function(NodeId),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: SyntaxKind,
    pub payload: Payload,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn leaf(kind: SyntaxKind, payload: Payload) -> Self {
        Node { kind, payload, children: Vec::new() }
    }

    pub fn interior(kind: SyntaxKind, children: Vec<NodeId>) -> Self {
        Node { kind, payload: Payload::None, children }
    }
}

/// The parse tree arena.
///
/// All nodes for one program live in one `Ast`; children are referenced
/// by [`NodeId`] rather than by pointer, so the whole tree is an ordinary
/// `Vec` under the hood (see [`aardvark_util::IndexVec`]) with none of the
/// lifetime or aliasing questions a pointer-based tree would raise when
/// the resolver mutates nodes mid-traversal.
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: IndexVec<NodeId, Node>,
    pub root: NodeId,
}

impl Ast {
    pub(crate) fn builder() -> AstBuilder {
        AstBuilder { nodes: IndexVec::new() }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.nodes[id].kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }
}

/// Incremental builder used only by the parser; kept separate from [`Ast`]
/// so nothing outside this crate can allocate dangling node ids.
pub(crate) struct AstBuilder {
    nodes: IndexVec<NodeId, Node>,
}

impl AstBuilder {
    pub fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(node)
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn finish(self, root: NodeId) -> Ast {
        Ast { nodes: self.nodes, root }
    }
}
