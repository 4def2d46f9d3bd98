//! aardvark-lex - Lexical analysis for aardvark source.
//!
//! Converts a byte buffer into a flat token sequence. This is the ~15% of
//! the core's budget: there is no backtracking here, every byte is
//! consumed exactly once, and the only state carried between tokens is
//! the cursor position.

mod cursor;
mod error;
mod lexer;
mod token;

pub use error::LexError;
pub use lexer::Lexer;
pub use token::{Token, TokenKind, TokenPayload};

/// Tokenizes `source` in one pass.
///
/// Pure function: does not consult or mutate any state outside `source`.
/// Fails fatally (no partial result) on the first unknown byte or
/// unterminated literal.
pub fn tokenize(source: &[u8]) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aardvark_util::fingerprint;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src.as_bytes()).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_are_recognized_exactly() {
        assert_eq!(kinds("do else end fn if return then var while"), vec![
            TokenKind::Do,
            TokenKind::Else,
            TokenKind::End,
            TokenKind::Fn,
            TokenKind::If,
            TokenKind::Return,
            TokenKind::Then,
            TokenKind::Var,
            TokenKind::While,
        ]);
    }

    #[test]
    fn keyword_prefix_is_an_identifier() {
        // "ifx" must not match "if": the comparison requires equal length.
        assert_eq!(kinds("ifx"), vec![TokenKind::Identifier]);
    }

    #[test]
    fn keyword_as_prefix_of_identifier_does_not_match_either() {
        assert_eq!(kinds("endless"), vec![TokenKind::Identifier]);
    }

    #[test]
    fn nine_tokenizes_as_an_integer() {
        let tokens = tokenize(b"9").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Integer);
        assert_eq!(tokens[0].payload, TokenPayload::Integer(9));
    }

    #[test]
    fn two_character_operators_upgrade() {
        assert_eq!(kinds("= == ! != > >= < <="), vec![
            TokenKind::Assign,
            TokenKind::Equal,
            TokenKind::Not,
            TokenKind::NotEqual,
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]);
    }

    #[test]
    fn string_literal_decodes_supported_escapes() {
        let tokens = tokenize(br#""a\\b\nc""#).unwrap();
        assert_eq!(tokens.len(), 1);
        match &tokens[0].payload {
            TokenPayload::String(s) => assert_eq!(&**s, "a\\b\nc"),
            other => panic!("expected string payload, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_string_is_a_fatal_error() {
        let err = tokenize(br#""abc"#).unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
    }

    #[test]
    fn unsupported_escape_is_a_fatal_error() {
        let err = tokenize(br#""a\tb""#).unwrap_err();
        assert!(matches!(err, LexError::UnsupportedEscape { found: 't', .. }));
    }

    #[test]
    fn unknown_byte_is_a_fatal_error() {
        let err = tokenize(b"@").unwrap_err();
        assert_eq!(err, LexError::UnknownByte { byte: b'@', position: 0 });
    }

    #[test]
    fn identifier_carries_expected_fingerprint() {
        let tokens = tokenize(b"print").unwrap();
        assert_eq!(tokens[0].payload, TokenPayload::Identifier(fingerprint(b"print")));
    }

    #[test]
    fn whitespace_variants_are_all_skipped() {
        assert_eq!(kinds(" \tvar\nx"), vec![TokenKind::Var, TokenKind::Identifier]);
    }
}
