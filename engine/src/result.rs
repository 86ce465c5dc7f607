//! FILENAME: engine/src/result.rs
//! PURPOSE: The value produced by evaluating an expression.
//! CONTEXT: Only numbers flow through the expression language. Booleans are
//! encoded as 1.0 / 0.0 and any nonzero value counts as true.

use serde::{Deserialize, Serialize};

/// The result of evaluating an expression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpResult {
    pub value: f64,
}

impl ExpResult {
    pub fn new(value: f64) -> Self {
        ExpResult { value }
    }

    /// Encodes a boolean as 1.0 (true) or 0.0 (false).
    pub fn from_bool(b: bool) -> Self {
        ExpResult::new(if b { 1.0 } else { 0.0 })
    }

    /// Nonzero is true.
    pub fn is_true(&self) -> bool {
        self.value != 0.0
    }
}

impl From<f64> for ExpResult {
    fn from(value: f64) -> Self {
        ExpResult::new(value)
    }
}

impl From<ExpResult> for f64 {
    fn from(result: ExpResult) -> Self {
        result.value
    }
}

impl std::fmt::Display for ExpResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
