//! FILENAME: engine/src/functions.rs
//! PURPOSE: Registry of callable functions for the expression evaluator.
//! CONTEXT: The parser only recognizes call syntax. Whether a name exists and
//! how many arguments it takes is decided here, at evaluation time, so hosts
//! can add functions without touching the parser.
//!
//! BUILT-INS:
//! - max(a, b), min(a, b)
//! - abs(x), floor(x), ceil(x), sqrt(x), exp(x)
//! - ln(x) (natural log), log(x) (base 10)

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::error::EvalError;

/// A numeric operation over already-evaluated arguments.
pub type NumericFn = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// A registered function: its fixed argument count and implementation.
#[derive(Clone)]
pub struct FunctionDef {
    pub arity: usize,
    pub op: NumericFn,
}

impl std::fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionDef")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Maps function names (case-sensitive) to their definitions.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionDef>,
}

/// Shared copy of the built-ins for callers that don't bring their own registry.
pub static BUILTINS: Lazy<FunctionRegistry> = Lazy::new(FunctionRegistry::with_builtins);

impl FunctionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        FunctionRegistry::default()
    }

    /// Creates a registry holding the built-in math functions.
    pub fn with_builtins() -> Self {
        let mut registry = FunctionRegistry::new();

        registry.register("max", 2, |args| args[0].max(args[1]));
        registry.register("min", 2, |args| args[0].min(args[1]));
        registry.register("abs", 1, |args| args[0].abs());
        registry.register("floor", 1, |args| args[0].floor());
        registry.register("ceil", 1, |args| args[0].ceil());
        registry.register("sqrt", 1, |args| args[0].sqrt());
        registry.register("exp", 1, |args| args[0].exp());
        registry.register("ln", 1, |args| args[0].ln());
        registry.register("log", 1, |args| args[0].log10());

        registry
    }

    /// Adds or replaces a function. Returns the previous definition, if any.
    /// `op` is only ever called with exactly `arity` arguments.
    pub fn register<F>(&mut self, name: impl Into<String>, arity: usize, op: F) -> Option<FunctionDef>
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.functions.insert(
            name.into(),
            FunctionDef {
                arity,
                op: Arc::new(op),
            },
        )
    }

    pub fn unregister(&mut self, name: &str) -> Option<FunctionDef> {
        self.functions.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of functions callable as `name()`; the parser needs these.
    pub fn zero_arity_names(&self) -> HashSet<String> {
        self.functions
            .iter()
            .filter(|(_, def)| def.arity == 0)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Looks up `name` and checks that `found` arguments suit it.
    pub fn check(&self, name: &str, found: usize) -> Result<&FunctionDef, EvalError> {
        let def = self.get(name).ok_or_else(|| EvalError::UnknownFunction {
            name: name.to_string(),
        })?;

        if def.arity != found {
            return Err(EvalError::ArgumentCount {
                name: name.to_string(),
                expected: def.arity,
                found,
            });
        }

        Ok(def)
    }

    /// Calls a function with evaluated arguments.
    pub fn call(&self, name: &str, args: &[f64]) -> Result<f64, EvalError> {
        let def = self.check(name, args.len())?;
        Ok((def.op)(args))
    }
}
