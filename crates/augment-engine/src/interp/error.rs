//! Evaluation errors

use thiserror::Error;

/// Errors raised while evaluating a module
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A `throw` that reached the top level
    #[error("Uncaught Error: {message}")]
    Thrown { message: String },

    #[error("TypeError: {0}")]
    TypeError(String),

    #[error("ReferenceError: {0}")]
    ReferenceError(String),

    /// Construct outside the supported language subset
    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("RangeError: Maximum call stack size exceeded")]
    StackOverflow,
}

impl EvalError {
    pub fn type_error(message: impl Into<String>) -> Self {
        EvalError::TypeError(message.into())
    }

    /// Message of a thrown error, if this is one.
    pub fn thrown_message(&self) -> Option<&str> {
        match self {
            EvalError::Thrown { message } => Some(message),
            _ => None,
        }
    }
}
