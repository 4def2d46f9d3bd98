//! Identifier fingerprinting.
//!
//! Identifiers are never stored as strings past lexing. Instead every
//! identifier is reduced to a 64-bit fingerprint by XORing each byte of its
//! UTF-8 spelling, shifted by `8 * (i mod 8)`. Two distinct names that land
//! on the same residue fingerprint to the same value; this is a deliberate
//! property of the source language, not a bug, and resolver lookups must
//! treat such collisions as the same name.

use std::fmt;

/// A 64-bit hash of an identifier's bytes.
///
/// `Fingerprint` is `Copy` and compares in O(1), which is what lets the
/// resolver and scope tables avoid ever touching identifier text again
/// once the lexer has produced one of these.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub const fn from_raw(value: u64) -> Self {
        Fingerprint(value)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({:#x})", self.0)
    }
}

/// Computes the identifier fingerprint of `bytes`.
///
/// `h(bytes) = XOR over i of (bytes[i] << (8 * (i mod 8)))`. This exact
/// function (not a "better" hash) must be used, since the `print` built-in
/// is recognized by the specific fingerprint value any conforming
/// implementation produces for the bytes `"print"`.
pub fn fingerprint(bytes: &[u8]) -> Fingerprint {
    let mut result: u64 = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let shift = (i & 0b111) * 8;
        result ^= (byte as u64) << shift;
    }
    Fingerprint(result)
}

/// Fingerprint of the built-in identifier `print`, little-endian bytes
/// `"print"` packed into a `u64`: `0x746e697270`.
pub const PRINT_FINGERPRINT: Fingerprint = Fingerprint(0x0000_0074_6e69_7270);
