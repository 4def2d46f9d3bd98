//! Lexer error type.

use thiserror::Error;

/// Everything that can make the lexer fail.
///
/// There is no recovery: the tokenizer stops at the first offending byte
/// and the caller is expected to report the message and exit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("Unknown character {byte:#04x} at byte offset {position}")]
    UnknownByte { byte: u8, position: usize },

    #[error("Reached end of characters before terminating '\"' of string literal")]
    UnterminatedString { position: usize },

    #[error("Reached end of string literal before end of escape sequence")]
    UnterminatedEscape { position: usize },

    #[error("Unsupported escape sequence '\\{found}' at byte offset {position}")]
    UnsupportedEscape { found: char, position: usize },
}
