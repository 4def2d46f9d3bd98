//! Parser-level errors.

use thiserror::Error;

use aardvark_lex::TokenKind;

/// The parser never fails partway through a production: every alternative
/// that doesn't match is backtracked out of silently, and the only
/// observable failure is the top-level program loop stopping with tokens
/// still unconsumed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unparsed trailing tokens starting at token {index} (kind {kind:?})")]
    UnparsedTrailingTokens { index: usize, kind: TokenKind },

    #[error("unexpected end of tokens while parsing a program")]
    UnexpectedEof,
}
