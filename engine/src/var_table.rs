//! FILENAME: engine/src/var_table.rs
//! PURPOSE: The capability the host supplies to resolve variable paths.
//! CONTEXT: The evaluator never owns or caches a table; it borrows one for a
//! single evaluate call. Hosts implement `VarTable` on their entity store, or
//! pass a closure for one-off lookups.

use std::collections::HashMap;

use crate::error::EvalError;
use crate::result::ExpResult;

/// Resolves a dotted variable path such as `[foo].bar.baz` to a value.
pub trait VarTable {
    fn get_variable_value(&self, path: &[String]) -> Result<ExpResult, EvalError>;
}

impl<F> VarTable for F
where
    F: Fn(&[String]) -> Result<ExpResult, EvalError>,
{
    fn get_variable_value(&self, path: &[String]) -> Result<ExpResult, EvalError> {
        self(path)
    }
}

/// A simple table keyed by the full path, with an optional value for misses.
#[derive(Debug, Clone, Default)]
pub struct MapVarTable {
    values: HashMap<Vec<String>, f64>,
    fallback: Option<f64>,
}

impl MapVarTable {
    pub fn new() -> Self {
        MapVarTable::default()
    }

    /// Paths not in the table resolve to `value` instead of failing.
    pub fn with_fallback(value: f64) -> Self {
        MapVarTable {
            values: HashMap::new(),
            fallback: Some(value),
        }
    }

    /// Sets the value of a path given as segments, e.g. `&["foo", "bar"]`.
    pub fn set(&mut self, path: &[&str], value: f64) {
        let key = path.iter().map(|s| s.to_string()).collect();
        self.values.insert(key, value);
    }

    pub fn insert(&mut self, path: Vec<String>, value: f64) -> Option<f64> {
        self.values.insert(path, value)
    }

    pub fn get(&self, path: &[String]) -> Option<f64> {
        self.values.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl VarTable for MapVarTable {
    fn get_variable_value(&self, path: &[String]) -> Result<ExpResult, EvalError> {
        match (self.get(path), self.fallback) {
            (Some(value), _) => Ok(ExpResult::new(value)),
            (None, Some(value)) => Ok(ExpResult::new(value)),
            (None, None) => Err(EvalError::unresolved(path, "no such variable")),
        }
    }
}
