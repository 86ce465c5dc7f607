//! FILENAME: tests/common/mod.rs
//! Variable tables and helpers shared by the engine integration tests.

#![allow(dead_code)]

use engine::{EvalError, ExpEngine, ExpResult, VarTable};

/// Resolves by root name only: foo -> 4, bar -> 3, anything else -> 1.
pub struct RootLookup;

impl VarTable for RootLookup {
    fn get_variable_value(&self, path: &[String]) -> Result<ExpResult, EvalError> {
        let value = match path.first().map(String::as_str) {
            Some("foo") => 4.0,
            Some("bar") => 3.0,
            _ => 1.0,
        };
        Ok(ExpResult::new(value))
    }
}

/// Resolves nested attributes of `foo`; other roots are 0.
pub struct AttributeLookup;

impl VarTable for AttributeLookup {
    fn get_variable_value(&self, path: &[String]) -> Result<ExpResult, EvalError> {
        if path.first().map(String::as_str) != Some("foo") {
            return Ok(ExpResult::new(0.0));
        }

        let value = match (path.get(1).map(String::as_str), path.get(2).map(String::as_str)) {
            (Some("bar"), Some("baz")) => 4.0,
            (Some("bonk"), _) => 5.0,
            _ => -1.0,
        };
        Ok(ExpResult::new(value))
    }
}

/// Fails every lookup.
pub struct EmptyLookup;

impl VarTable for EmptyLookup {
    fn get_variable_value(&self, path: &[String]) -> Result<ExpResult, EvalError> {
        Err(EvalError::unresolved(path, "empty table"))
    }
}

/// Parses and evaluates with the default engine, panicking on any error.
pub fn eval_with(source: &str, vars: &dyn VarTable) -> f64 {
    let engine = ExpEngine::new();
    match engine.evaluate_str(source, vars) {
        Ok(result) => result.value,
        Err(e) => panic!("{:?} failed: {}", source, e),
    }
}

pub fn eval(source: &str) -> f64 {
    eval_with(source, &RootLookup)
}
