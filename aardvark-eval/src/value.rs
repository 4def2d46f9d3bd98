//! Runtime values.

use std::rc::Rc;

use crate::error::EvalError;

/// A value produced by evaluating a node.
///
/// `None` is the sentinel for "this statement produced no value"; it is
/// what lets [`Interpreter`](crate::Interpreter) tell a fall-through block
/// apart from a propagating `return`. `Void` is the opposite sentinel: an
/// explicit `return` with no expression, which a calling block still
/// recognizes as "stop evaluating further statements" but which unwraps
/// back to `None` once it reaches the call site that receives it.
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Void,
    Integer(i64),
    String(Rc<str>),
}

impl Value {
    /// Extracts the integer interpretation of this value, or fails.
    ///
    /// The reference implementation reads `.integer` unconditionally here,
    /// which is undefined behavior for string and `none` operands; this
    /// makes that case a fatal evaluation error instead.
    pub fn as_integer(&self) -> Result<i64, EvalError> {
        match self {
            Value::Integer(v) => Ok(*v),
            other => Err(EvalError::InvalidSyntax {
                detail: format!("expected an integer operand, found {other:?}"),
            }),
        }
    }

    pub fn truthy(&self) -> Result<bool, EvalError> {
        Ok(self.as_integer()? != 0)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }
}
