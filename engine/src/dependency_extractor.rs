//! FILENAME: engine/src/dependency_extractor.rs
//! PURPOSE: Extracts variable paths and function names from parsed AST expressions.
//! CONTEXT: A host that re-evaluates expressions when entity attributes change
//! needs to know which paths an expression reads. This module walks the tree
//! and reports them in first-appearance order, without duplicates.

use std::collections::HashSet;

use parser::{Assignment, Expression};

/// Extracts every variable path referenced by the expression.
pub fn extract_variable_paths(expr: &Expression) -> Vec<Vec<String>> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();
    collect_paths(expr, &mut seen, &mut paths);
    paths
}

/// Extracts every function name called by the expression.
pub fn extract_function_names(expr: &Expression) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    collect_functions(expr, &mut seen, &mut names);
    names
}

/// Paths read by the value side of an assignment. The destination is written,
/// not read, so it is not included.
pub fn extract_assignment_dependencies(assignment: &Assignment) -> Vec<Vec<String>> {
    extract_variable_paths(&assignment.value)
}

fn collect_paths<'e>(
    expr: &'e Expression,
    seen: &mut HashSet<&'e [String]>,
    paths: &mut Vec<Vec<String>>,
) {
    match expr {
        Expression::Literal(_) => {}

        Expression::VariablePath(path) => {
            if seen.insert(path.as_slice()) {
                paths.push(path.clone());
            }
        }

        Expression::UnaryOp { operand, .. } => collect_paths(operand, seen, paths),

        Expression::BinaryOp { left, right, .. } => {
            collect_paths(left, seen, paths);
            collect_paths(right, seen, paths);
        }

        Expression::FunctionCall { args, .. } => {
            for arg in args {
                collect_paths(arg, seen, paths);
            }
        }
    }
}

fn collect_functions<'e>(
    expr: &'e Expression,
    seen: &mut HashSet<&'e str>,
    names: &mut Vec<String>,
) {
    match expr {
        Expression::Literal(_) | Expression::VariablePath(_) => {}

        Expression::UnaryOp { operand, .. } => collect_functions(operand, seen, names),

        Expression::BinaryOp { left, right, .. } => {
            collect_functions(left, seen, names);
            collect_functions(right, seen, names);
        }

        Expression::FunctionCall { name, args } => {
            if seen.insert(name.as_str()) {
                names.push(name.clone());
            }
            for arg in args {
                collect_functions(arg, seen, names);
            }
        }
    }
}
