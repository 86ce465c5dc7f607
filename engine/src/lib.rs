//! FILENAME: engine/src/lib.rs
//! PURPOSE: Main library entry point for the expression engine.
//! CONTEXT: Re-exports public types and modules for use by host applications.
//! The parser crate turns text into trees; this crate evaluates them against
//! a host-supplied VarTable and an extensible FunctionRegistry.

pub mod config;
pub mod dependency_extractor;
pub mod error;
pub mod evaluator;
pub mod exp_engine;
pub mod functions;
pub mod result;
pub mod var_table;

// Re-export commonly used types at the crate root
pub use config::EngineConfig;
pub use dependency_extractor::{
    extract_assignment_dependencies, extract_function_names, extract_variable_paths,
};
pub use error::{EvalError, ExpError};
pub use evaluator::{evaluate, EvalOutcome, EvaluatedAssignment, Evaluator};
pub use exp_engine::ExpEngine;
pub use functions::{FunctionDef, FunctionRegistry, NumericFn, BUILTINS};
pub use parser::{
    Assignment, BinaryOperator, Expression, ParseError, SyntaxError, TokenizeError, UnaryOperator,
};
pub use result::ExpResult;
pub use var_table::{MapVarTable, VarTable};
