//! FILENAME: engine/src/evaluator.rs
//! PURPOSE: Evaluates AST expressions to compute numeric results.
//! CONTEXT: After an expression is parsed into an AST, this module traverses
//! the tree and computes the final result. Variable paths are resolved
//! through the host's VarTable and function calls through a FunctionRegistry.
//!
//! SUPPORTED FEATURES:
//! - Literal evaluation
//! - Variable path lookup via VarTable
//! - Binary operations: ||, &&, ==, !=, <, <=, >, >=, +, -, *, /, ^
//! - Unary operations: !, -, +
//! - Function calls checked against the registry (name and arity)
//! - Assignments: value evaluated, destination handed back to the host
//!
//! Booleans are numbers: comparisons and logical operators produce 1.0 or 0.0,
//! and any nonzero operand counts as true. Both operands of && and || are
//! evaluated, left first.

use parser::logging::log_debug;
use parser::{Assignment, BinaryOperator, Expression, UnaryOperator};

use crate::error::EvalError;
use crate::functions::{FunctionRegistry, BUILTINS};
use crate::result::ExpResult;
use crate::var_table::VarTable;

pub type EvalOutcome = Result<ExpResult, EvalError>;

/// An assignment whose value has been computed. Storing it is up to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedAssignment {
    pub destination: Vec<String>,
    pub value: ExpResult,
}

/// The expression evaluator.
/// Holds a reference to the function registry; the variable table is passed
/// per call, so one evaluator can serve many tables and threads.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    registry: &'a FunctionRegistry,
}

impl Default for Evaluator<'static> {
    fn default() -> Self {
        Evaluator::new(&BUILTINS)
    }
}

impl<'a> Evaluator<'a> {
    pub fn new(registry: &'a FunctionRegistry) -> Self {
        Evaluator { registry }
    }

    /// Evaluates an AST expression and returns the result.
    pub fn evaluate(&self, expr: &Expression, vars: &dyn VarTable) -> EvalOutcome {
        match expr {
            Expression::Literal(n) => Ok(ExpResult::new(*n)),
            Expression::VariablePath(path) => self.eval_variable(path, vars),
            Expression::UnaryOp { op, operand } => self.eval_unary_op(*op, operand, vars),
            Expression::BinaryOp { left, op, right } => self.eval_binary_op(left, *op, right, vars),
            Expression::FunctionCall { name, args } => self.eval_function(name, args, vars),
        }
    }

    /// Evaluates the right-hand side of an assignment.
    pub fn evaluate_assignment(
        &self,
        assignment: &Assignment,
        vars: &dyn VarTable,
    ) -> Result<EvaluatedAssignment, EvalError> {
        let value = self.evaluate(&assignment.value, vars)?;
        Ok(EvaluatedAssignment {
            destination: assignment.destination.clone(),
            value,
        })
    }

    fn eval_variable(&self, path: &[String], vars: &dyn VarTable) -> EvalOutcome {
        vars.get_variable_value(path)
            .inspect_err(|e| log_debug!("EVAL", "variable lookup failed: {}", e))
    }

    /// Evaluates a unary operation.
    fn eval_unary_op(&self, op: UnaryOperator, operand: &Expression, vars: &dyn VarTable) -> EvalOutcome {
        let val = self.evaluate(operand, vars)?;

        let result = match op {
            UnaryOperator::Negate => ExpResult::new(-val.value),
            UnaryOperator::Plus => val,
            UnaryOperator::Not => ExpResult::from_bool(val.value == 0.0),
        };
        Ok(result)
    }

    /// Evaluates a binary operation, left operand first.
    fn eval_binary_op(
        &self,
        left: &Expression,
        op: BinaryOperator,
        right: &Expression,
        vars: &dyn VarTable,
    ) -> EvalOutcome {
        let l = self.evaluate(left, vars)?.value;
        let r = self.evaluate(right, vars)?.value;

        let result = match op {
            // Logical operations
            BinaryOperator::Or => ExpResult::from_bool(l != 0.0 || r != 0.0),
            BinaryOperator::And => ExpResult::from_bool(l != 0.0 && r != 0.0),

            // Comparison operations
            BinaryOperator::Equal => ExpResult::from_bool(l == r),
            BinaryOperator::NotEqual => ExpResult::from_bool(l != r),
            BinaryOperator::LessThan => ExpResult::from_bool(l < r),
            BinaryOperator::LessEqual => ExpResult::from_bool(l <= r),
            BinaryOperator::GreaterThan => ExpResult::from_bool(l > r),
            BinaryOperator::GreaterEqual => ExpResult::from_bool(l >= r),

            // Arithmetic operations
            BinaryOperator::Add => ExpResult::new(l + r),
            BinaryOperator::Subtract => ExpResult::new(l - r),
            BinaryOperator::Multiply => ExpResult::new(l * r),
            BinaryOperator::Divide => ExpResult::new(l / r),
            BinaryOperator::Power => ExpResult::new(l.powf(r)),
        };
        Ok(result)
    }

    /// Evaluates a function call. The name and argument count are checked
    /// before any argument is evaluated.
    fn eval_function(&self, name: &str, args: &[Expression], vars: &dyn VarTable) -> EvalOutcome {
        let def = self
            .registry
            .check(name, args.len())
            .inspect_err(|e| log_debug!("EVAL", "rejected call: {}", e))?;

        let values = args
            .iter()
            .map(|arg| self.evaluate(arg, vars).map(|r| r.value))
            .collect::<Result<Vec<f64>, EvalError>>()?;

        Ok(ExpResult::new((def.op)(&values)))
    }
}

/// Evaluates an expression with the built-in functions.
pub fn evaluate(expr: &Expression, vars: &dyn VarTable) -> EvalOutcome {
    Evaluator::default().evaluate(expr, vars)
}
