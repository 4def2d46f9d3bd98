//! Resource ceilings.
//!
//! The reference interpreter backed its scope tables, function table and
//! value stack with fixed-size arrays (16 globals, 32 locals, 32
//! functions, 128 stack slots). This crate keeps those numbers as the
//! defaults but makes them a runtime setting rather than a compile-time
//! constant, so an embedder can raise them (or an integration test can
//! lower them to exercise the "resource limit exceeded" error path).

/// Configurable ceilings for the evaluator's bounded tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_globals: usize,
    pub max_locals: usize,
    pub max_functions: usize,
    pub max_stack: usize,
}

impl Limits {
    /// The ceilings the reference interpreter used.
    pub const REFERENCE: Limits = Limits {
        max_globals: 16,
        max_locals: 32,
        max_functions: 32,
        max_stack: 128,
    };
}

impl Default for Limits {
    fn default() -> Self {
        Limits::REFERENCE
    }
}
