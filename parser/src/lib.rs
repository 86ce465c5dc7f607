//! FILENAME: parser/src/lib.rs
//! PURPOSE: Library root for the simulation expression parser.
//! CONTEXT: This module exposes the tokenizer, parser, and AST components
//! needed to convert expression strings into evaluatable trees.
//!
//! PIPELINE: Expression String --> Lexer --> Tokens --> Parser --> AST --> Evaluator
//!
//! SUPPORTED FEATURES:
//! - Arithmetic: +, -, *, /, ^ (power, right associative)
//! - Comparison: ==, !=, <, >, <=, >=
//! - Logical: &&, ||, !
//! - Variable paths: foo.bar, [Entity 1].attr
//! - Function calls: max(a, b), abs(x)
//! - Parentheses for grouping
//! - Chained unary prefixes: --2, !-x
//! - Assignment statements: [foo].bar = 40 + 2

pub mod ast;
pub mod error;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod token;


// Re-export commonly used types for convenience
pub use ast::{Assignment, BinaryOperator, Expression, UnaryOperator};
pub use error::{ParseError, ParseResult, SyntaxError, TokenizeError};
pub use lexer::{tokenize, Lexer};
pub use parser::{
    parse_assignment, parse_assignment_str, parse_assignment_with, parse_expression,
    parse_expression_str, parse_expression_with, ParseOptions, Parser, DEFAULT_MAX_DEPTH,
};
pub use token::{Token, TokenKind};
