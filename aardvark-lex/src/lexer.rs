//! The lexer itself: byte buffer in, token stream out.

use std::rc::Rc;

use aardvark_util::fingerprint;

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};

/// Lexer for aardvark source.
///
/// Call [`Lexer::tokenize`] (or the free function [`crate::tokenize`]) to
/// run it to completion; the struct itself is only exposed for callers
/// that want to pull tokens one at a time (the REPL's `-t` flag does not
/// need to, but a future streaming front end might).
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self { cursor: Cursor::new(source) }
    }

    /// Runs the lexer to completion, returning every token in source
    /// order. Fails fatally on the first unrecognized byte or unterminated
    /// literal; there is no recovery.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::with_capacity(16);
        loop {
            self.skip_whitespace();
            if self.cursor.is_at_end() {
                return Ok(tokens);
            }
            tokens.push(self.next_token()?);
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.cursor.current() {
            match b {
                b' ' | b'\t' | b'\n' => self.cursor.advance(),
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        let b = self.cursor.current().expect("caller checked is_at_end");
        match b {
            b'_' | b'a'..=b'z' | b'A'..=b'Z' => Ok(self.read_identifier_or_keyword()),
            // The reference lexer's first-byte dispatch table only lists
            // '0'..'8'; '9' falls through to the "unknown byte" arm there.
            // Every ASCII digit is accepted here instead, matching what a
            // maximal-digit-run reading of the grammar actually requires.
            b'0'..=b'9' => Ok(self.read_integer()),
            b'"' => self.read_string(),
            b',' => self.single(TokenKind::Comma),
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'+' => self.single(TokenKind::Plus),
            b'-' => self.single(TokenKind::Minus),
            b'*' => self.single(TokenKind::Star),
            b'/' => self.single(TokenKind::Slash),
            b'=' => Ok(self.read_operator(TokenKind::Assign)),
            b'!' => Ok(self.read_operator(TokenKind::Not)),
            b'>' => Ok(self.read_operator(TokenKind::Greater)),
            b'<' => Ok(self.read_operator(TokenKind::Less)),
            other => Err(LexError::UnknownByte { byte: other, position: self.cursor.position() }),
        }
    }

    fn single(&mut self, kind: TokenKind) -> Result<Token, LexError> {
        self.cursor.advance();
        Ok(Token::simple(kind))
    }

    /// Reads a maximal run of `[A-Za-z0-9_]` and classifies it as one of
    /// the nine keywords or as an identifier.
    ///
    /// The keyword comparison uses `max(run_len, keyword_len)` as its
    /// length in the reference implementation, which only succeeds when
    /// both lengths agree exactly (bytes past the shorter string compare
    /// against its NUL terminator). A direct length-then-bytes comparison
    /// reproduces that: no prefix of a keyword matches, and no keyword is
    /// a prefix of a longer identifier.
    fn read_identifier_or_keyword(&mut self) -> Token {
        let start = self.cursor.position();
        while let Some(b) = self.cursor.current() {
            if b == b'_' || b.is_ascii_alphanumeric() {
                self.cursor.advance();
            } else {
                break;
            }
        }
        let end = self.cursor.position();
        let run = &self.source()[start..end];

        for (spelling, kind) in TokenKind::KEYWORDS {
            if run == spelling.as_bytes() {
                return Token::simple(kind);
            }
        }
        Token::identifier(fingerprint(run))
    }

    fn read_integer(&mut self) -> Token {
        let start = self.cursor.position();
        while let Some(b) = self.cursor.current() {
            if b.is_ascii_digit() {
                self.cursor.advance();
            } else {
                break;
            }
        }
        let end = self.cursor.position();
        let digits = &self.source()[start..end];
        // Decimal digit runs only; this cannot overflow for any literal
        // that the grammar can actually accept without wrapping, and
        // wrapping on pathological input matches the reference's
        // unchecked int64_t accumulation.
        let mut value: i64 = 0;
        for &d in digits {
            value = value.wrapping_mul(10).wrapping_add((d - b'0') as i64);
        }
        Token::integer(value)
    }

    /// Reads a double-quoted string literal, resolving `\\` and `\n`
    /// escapes as the only supported sequences. Any other escape
    /// character is a fatal error rather than the reference
    /// implementation's silent skip-until-recognized behavior.
    fn read_string(&mut self) -> Result<Token, LexError> {
        self.cursor.advance(); // opening quote
        let mut out = Vec::new();
        loop {
            let b = self.cursor.current().ok_or(LexError::UnterminatedString {
                position: self.cursor.position(),
            })?;
            match b {
                b'"' => {
                    self.cursor.advance();
                    break;
                }
                b'\\' => {
                    self.cursor.advance();
                    let escape = self.cursor.current().ok_or(LexError::UnterminatedEscape {
                        position: self.cursor.position(),
                    })?;
                    match escape {
                        b'n' => out.push(b'\n'),
                        b'\\' => out.push(b'\\'),
                        other => {
                            return Err(LexError::UnsupportedEscape {
                                found: other as char,
                                position: self.cursor.position(),
                            })
                        }
                    }
                    self.cursor.advance();
                }
                other => {
                    out.push(other);
                    self.cursor.advance();
                }
            }
        }
        let text = String::from_utf8_lossy(&out).into_owned();
        Ok(Token::string(Rc::from(text)))
    }

    /// Reads `=`, `!`, `>` or `<`, upgrading to the two-character form if
    /// the next byte is `=`.
    fn read_operator(&mut self, base: TokenKind) -> Token {
        self.cursor.advance();
        if self.cursor.current() == Some(b'=') {
            if let Some(upgraded) = base.upgrade_with_equals() {
                self.cursor.advance();
                return Token::simple(upgraded);
            }
        }
        Token::simple(base)
    }

    fn source(&self) -> &'a [u8] {
        self.cursor.bytes()
    }
}
