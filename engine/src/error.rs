//! FILENAME: engine/src/error.rs
//! PURPOSE: Errors raised while evaluating expressions.

use parser::SyntaxError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The host's variable table could not resolve a path.
    #[error("Unresolved variable '{path}': {reason}")]
    UnresolvedVariable { path: String, reason: String },

    #[error("Unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("Function '{name}' expects {expected} argument(s), found {found}")]
    ArgumentCount {
        name: String,
        expected: usize,
        found: usize,
    },
}

impl EvalError {
    /// Builds an `UnresolvedVariable` error for a path, joining segments with '.'.
    pub fn unresolved(path: &[String], reason: impl Into<String>) -> Self {
        EvalError::UnresolvedVariable {
            path: path.join("."),
            reason: reason.into(),
        }
    }
}

/// Any failure of the string-in, number-out convenience entry points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}
