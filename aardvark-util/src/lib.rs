//! aardvark-util - Shared foundation types for the aardvark toolchain
//!
//! This crate has no knowledge of lexing, parsing, or evaluation. It only
//! provides the small set of primitives every other `aardvark-*` crate
//! builds on:
//!
//! - [`Fingerprint`] - the 64-bit identifier hash used in place of interned
//!   strings (aardvark never keeps identifier text past lexing).
//! - [`IndexVec`] / [`Idx`] - a typed-index vector, used by the parser for
//!   its node arena and by the evaluator for its scope tables.
//! - [`Limits`] - the configurable resource ceilings the reference
//!   interpreter enforced as fixed array sizes.

mod fingerprint;
mod index_vec;
mod limits;

pub use fingerprint::{fingerprint, Fingerprint, PRINT_FINGERPRINT};
pub use index_vec::{Idx, IndexVec};
pub use limits::Limits;
