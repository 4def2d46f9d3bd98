//! Byte cursor for traversing source text.
//!
//! Aardvark source is a plain byte buffer, not a `str`: identifiers are
//! ASCII-only and string payload bytes pass through without any UTF-8
//! validation, so there is nothing here that needs `char` boundaries.

pub struct Cursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.bytes.len()
    }

    /// The byte at the cursor, or `None` past the end.
    pub fn current(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    pub fn advance(&mut self) {
        if self.position < self.bytes.len() {
            self.position += 1;
        }
    }

    /// The full underlying buffer, for extracting the span of a token
    /// already scanned by byte offsets.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }
}
