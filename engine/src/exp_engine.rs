//! FILENAME: engine/src/exp_engine.rs
//! PURPOSE: Host-facing entry point that bundles configuration and the function registry.
//! CONTEXT: The simulation host keeps one ExpEngine, registers its own
//! functions on it, and uses it to parse, validate and evaluate user input.
//! The engine holds no per-evaluation state, so it can be shared across threads.

use parser::logging::{log_debug, log_info};
use parser::{tokenize, Assignment, Expression, ParseOptions, Parser, SyntaxError};

use crate::config::EngineConfig;
use crate::dependency_extractor::extract_function_names;
use crate::error::{EvalError, ExpError};
use crate::evaluator::{EvaluatedAssignment, Evaluator};
use crate::functions::FunctionRegistry;
use crate::result::ExpResult;
use crate::var_table::VarTable;

#[derive(Debug, Clone)]
pub struct ExpEngine {
    config: EngineConfig,
    registry: FunctionRegistry,
}

impl Default for ExpEngine {
    fn default() -> Self {
        ExpEngine::new()
    }
}

impl ExpEngine {
    /// Creates an engine with the default configuration and built-in functions.
    pub fn new() -> Self {
        ExpEngine::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let registry = if config.builtin_functions {
            FunctionRegistry::with_builtins()
        } else {
            FunctionRegistry::new()
        };

        log_info!(
            "ENGINE",
            "created engine max_depth={} functions={}",
            config.max_depth,
            registry.names().len()
        );

        ExpEngine { config, registry }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Mutable access for registering host functions.
    pub fn registry_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.registry
    }

    pub fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(&self.registry)
    }

    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            zero_arity_functions: self.registry.zero_arity_names(),
            ..self.config.parse_options()
        }
    }

    /// Tokenizes and parses an expression.
    pub fn parse_expression(&self, source: &str) -> Result<Expression, SyntaxError> {
        let tokens = tokenize(source)?;
        let options = self.parse_options();
        let expr = Parser::new(&tokens, &options)
            .parse_expression()
            .inspect_err(|e| log_debug!("PARSE", "rejected {:?}: {}", source, e))?;
        Ok(expr)
    }

    /// Tokenizes and parses an assignment statement.
    pub fn parse_assignment(&self, source: &str) -> Result<Assignment, SyntaxError> {
        let tokens = tokenize(source)?;
        let options = self.parse_options();
        let assignment = Parser::new(&tokens, &options)
            .parse_assignment()
            .inspect_err(|e| log_debug!("PARSE", "rejected {:?}: {}", source, e))?;
        Ok(assignment)
    }

    pub fn evaluate(&self, expr: &Expression, vars: &dyn VarTable) -> Result<ExpResult, EvalError> {
        self.evaluator().evaluate(expr, vars)
    }

    pub fn evaluate_assignment(
        &self,
        assignment: &Assignment,
        vars: &dyn VarTable,
    ) -> Result<EvaluatedAssignment, EvalError> {
        self.evaluator().evaluate_assignment(assignment, vars)
    }

    /// Parses and evaluates in one step.
    pub fn evaluate_str(&self, source: &str, vars: &dyn VarTable) -> Result<ExpResult, ExpError> {
        let expr = self.parse_expression(source)?;
        Ok(self.evaluate(&expr, vars)?)
    }

    /// Checks an expression without evaluating it: syntax, function names and
    /// argument counts. Variable paths are not checked.
    pub fn validate(&self, source: &str) -> Result<Expression, ExpError> {
        let expr = self.parse_expression(source)?;
        self.check_calls(&expr)?;
        Ok(expr)
    }

    fn check_calls(&self, expr: &Expression) -> Result<(), EvalError> {
        // Unknown names first, so the message names the function the user mistyped.
        for name in extract_function_names(expr) {
            if !self.registry.contains(&name) {
                return Err(EvalError::UnknownFunction { name });
            }
        }
        check_arities(expr, &self.registry)
    }
}

fn check_arities(expr: &Expression, registry: &FunctionRegistry) -> Result<(), EvalError> {
    match expr {
        Expression::Literal(_) | Expression::VariablePath(_) => Ok(()),
        Expression::UnaryOp { operand, .. } => check_arities(operand, registry),
        Expression::BinaryOp { left, right, .. } => {
            check_arities(left, registry)?;
            check_arities(right, registry)
        }
        Expression::FunctionCall { name, args } => {
            registry.check(name, args.len())?;
            args.iter().try_for_each(|arg| check_arities(arg, registry))
        }
    }
}
