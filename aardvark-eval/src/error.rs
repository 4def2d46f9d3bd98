//! Evaluator-level errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("Variable not in scope")]
    VariableNotInScope,

    #[error("Function not found")]
    FunctionNotFound,

    #[error("Unknown standard function")]
    UnknownStandardFunction,

    #[error("Invalid syntax in eval: {detail}")]
    InvalidSyntax { detail: String },

    #[error("Resource limit exceeded: {resource} (limit {limit})")]
    ResourceLimitExceeded { resource: &'static str, limit: usize },
}

impl EvalError {
    pub(crate) fn resource_limit(resource: &'static str, limit: usize) -> Self {
        EvalError::ResourceLimitExceeded { resource, limit }
    }
}
