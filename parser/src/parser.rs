//! FILENAME: parser/src/parser.rs
//! PURPOSE: Recursive descent parser that converts a sequence of Tokens into an AST.
//! CONTEXT: This is the second stage of the parsing pipeline. It takes tokens
//! from the Lexer and builds an Expression tree (or an Assignment) that the
//! engine can evaluate.
//!
//! GRAMMAR:
//!   assignment     --> path "=" expression
//!   expression     --> or
//!   or             --> and ( "||" and )*
//!   and            --> equality ( "&&" equality )*
//!   equality       --> relational ( ("==" | "!=") relational )*
//!   relational     --> additive ( ("<" | "<=" | ">" | ">=") additive )*
//!   additive       --> multiplicative ( ("+" | "-") multiplicative )*
//!   multiplicative --> unary ( ("*" | "/") unary )*
//!   unary          --> ("!" | "-" | "+") unary | power
//!   power          --> primary ( "^" unary )?
//!   primary        --> NUMBER | function_call | path | "(" expression ")"
//!   path           --> (QUOTED | VARIABLE) ( "." VARIABLE )*
//!   function_call  --> VARIABLE "(" arguments ")"
//!   arguments      --> expression ("," expression)*

use std::collections::HashSet;

use crate::ast::{Assignment, BinaryOperator, Expression, UnaryOperator};
use crate::error::{ParseError, ParseResult, SyntaxError};
use crate::lexer::tokenize;
use crate::logging::log_debug;
use crate::token::{Token, TokenKind};

/// Default limit on nesting (parentheses, prefix chains, exponent chains,
/// chains of binary operators).
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs that change what the parser accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Maximum nesting depth of the tree before the parser gives up.
    pub max_depth: usize,
    /// Functions that may be called with an empty argument list, e.g. `now()`.
    pub zero_arity_functions: HashSet<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            zero_arity_functions: HashSet::new(),
        }
    }
}

/// The Parser struct holds the token slice and the current position.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], options: &'a ParseOptions) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
            options,
        }
    }

    /// Parses the entire token sequence as one expression.
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        if self.tokens.is_empty() {
            return Err(ParseError::new(0, "Empty expression"));
        }

        let expr = self.parse_or()?;
        self.expect_end()?;
        Ok(expr)
    }

    /// Parses the entire token sequence as `path = expression`.
    pub fn parse_assignment(&mut self) -> ParseResult<Assignment> {
        if self.tokens.is_empty() {
            return Err(ParseError::new(0, "Empty assignment"));
        }

        let destination = match self.current() {
            Some(tok) if tok.kind == TokenKind::QuotedPathSegment || tok.kind == TokenKind::Variable => {
                let root = tok.text.clone();
                self.advance();
                self.parse_path_tail(root)?
            }
            _ => return Err(self.unexpected("a destination variable")),
        };

        if !self.current_is_symbol("=") {
            return Err(self.unexpected("'='"));
        }
        self.advance();

        if self.current().is_none() {
            return Err(self.unexpected("an expression after '='"));
        }

        let value = self.parse_or()?;
        self.expect_end()?;

        Ok(Assignment { destination, value })
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn current_is_symbol(&self, sym: &str) -> bool {
        self.current().is_some_and(|tok| tok.is_symbol(sym))
    }

    /// Position of the current token, or the end of the last token at end of input.
    fn current_position(&self) -> usize {
        match self.current() {
            Some(tok) => tok.position,
            None => self.tokens.last().map_or(0, token_end),
        }
    }

    /// Builds an "expected X, found Y" error at the current token.
    fn unexpected(&self, expected: &str) -> ParseError {
        let found = match self.current() {
            Some(tok) => format!("{} {}", tok.kind, tok),
            None => "end of input".to_string(),
        };
        ParseError::new(
            self.current_position(),
            format!("Expected {}, found {}", expected, found),
        )
    }

    fn expect_end(&self) -> ParseResult<()> {
        match self.current() {
            None => Ok(()),
            Some(tok) => Err(ParseError::new(
                tok.position,
                format!("Unexpected token after expression: {}", tok),
            )),
        }
    }

    /// Parses one left-associative precedence level.
    fn parse_left_assoc(
        &mut self,
        symbols: &[&str],
        next: fn(&mut Self) -> ParseResult<Expression>,
    ) -> ParseResult<Expression> {
        let mut left = next(self)?;
        // Each operator in a flat chain nests the tree one level deeper on the left.
        let mut chained = 0;

        loop {
            let op = match self.current() {
                Some(tok) if tok.kind == TokenKind::Symbol && symbols.contains(&tok.text.as_str()) => {
                    match BinaryOperator::from_symbol(&tok.text) {
                        Some(op) => op,
                        None => break,
                    }
                }
                _ => break,
            };

            self.enter_nesting()?;
            chained += 1;

            self.advance();
            let right = next(self)?;

            left = Expression::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        self.depth -= chained;
        Ok(left)
    }

    fn parse_or(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(&["||"], Self::parse_and)
    }

    fn parse_and(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(&["&&"], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(&["==", "!="], Self::parse_relational)
    }

    fn parse_relational(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(&["<", "<=", ">", ">="], Self::parse_additive)
    }

    fn parse_additive(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(&["+", "-"], Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(&["*", "/"], Self::parse_unary)
    }

    /// Counts one more level of tree nesting, failing once the limit is passed.
    /// Callers undo the increment when the level is finished.
    fn enter_nesting(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(ParseError::new(
                self.current_position(),
                format!("Expression nested too deeply (limit {})", self.options.max_depth),
            ));
        }
        Ok(())
    }

    /// Parses prefix operators. Every recursive cycle of the grammar passes
    /// through here, so this is where recursive nesting is tracked.
    fn parse_unary(&mut self) -> ParseResult<Expression> {
        self.enter_nesting()?;

        let prefix = self
            .current()
            .filter(|tok| tok.kind == TokenKind::Symbol)
            .and_then(|tok| UnaryOperator::from_symbol(&tok.text));

        let result = match prefix {
            Some(op) => {
                self.advance();
                self.parse_unary().map(|operand| Expression::UnaryOp {
                    op,
                    operand: Box::new(operand),
                })
            }
            None => self.parse_power(),
        };

        self.depth -= 1;
        result
    }

    /// Parses exponentiation. The right operand goes back through `unary`,
    /// which makes `^` right associative and allows `2^-1`.
    fn parse_power(&mut self) -> ParseResult<Expression> {
        let left = self.parse_primary()?;

        if self.current_is_symbol("^") {
            self.advance();
            let right = self.parse_unary()?;

            return Ok(Expression::BinaryOp {
                left: Box::new(left),
                op: BinaryOperator::Power,
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    /// Parses primary expressions (literals, paths, function calls, parentheses).
    fn parse_primary(&mut self) -> ParseResult<Expression> {
        let tok = match self.current() {
            Some(tok) => tok,
            None => return Err(self.unexpected("an expression")),
        };

        match tok.kind {
            TokenKind::Number => {
                let value: f64 = tok.text.parse().map_err(|_| {
                    ParseError::new(tok.position, format!("Invalid number: {}", tok.text))
                })?;
                if !value.is_finite() {
                    return Err(ParseError::new(
                        tok.position,
                        format!("Number out of range: {}", tok.text),
                    ));
                }
                self.advance();
                Ok(Expression::Literal(value))
            }

            TokenKind::QuotedPathSegment => {
                self.advance();
                let path = self.parse_path_tail(tok.text.clone())?;
                Ok(Expression::VariablePath(path))
            }

            TokenKind::Variable => {
                self.advance();

                if self.current_is_symbol("(") {
                    return self.parse_function_call(tok);
                }

                let path = self.parse_path_tail(tok.text.clone())?;
                Ok(Expression::VariablePath(path))
            }

            TokenKind::Symbol if tok.text == "(" => {
                self.advance();
                let expr = self.parse_or()?;
                if !self.current_is_symbol(")") {
                    return Err(self.unexpected(&format!(
                        "')' to close '(' at position {}",
                        tok.position
                    )));
                }
                self.advance();
                Ok(expr)
            }

            TokenKind::Symbol => Err(self.unexpected("an expression")),
        }
    }

    /// Collects `. name` pairs following a path root.
    fn parse_path_tail(&mut self, root: String) -> ParseResult<Vec<String>> {
        let mut segments = vec![root];

        while self.current_is_symbol(".") {
            self.advance();
            match self.current() {
                Some(tok) if tok.kind == TokenKind::Variable => {
                    segments.push(tok.text.clone());
                    self.advance();
                }
                _ => return Err(self.unexpected("an attribute name after '.'")),
            }
        }

        Ok(segments)
    }

    /// Parses a function call like max(a, 10). The current token is the '('.
    fn parse_function_call(&mut self, name_tok: &Token) -> ParseResult<Expression> {
        let open_position = self.current_position();
        let name = name_tok.text.clone();

        // Consume the '('
        self.advance();

        let mut args = Vec::new();

        // Handle empty argument list
        if self.current_is_symbol(")") {
            if !self.options.zero_arity_functions.contains(&name) {
                return Err(ParseError::new(
                    self.current_position(),
                    format!("Function '{}' called with no arguments", name),
                ));
            }
            self.advance();
            return Ok(Expression::FunctionCall { name, args });
        }

        // Parse first argument
        args.push(self.parse_or()?);

        // Parse remaining arguments separated by commas
        while self.current_is_symbol(",") {
            self.advance();
            args.push(self.parse_or()?);
        }

        if !self.current_is_symbol(")") {
            return Err(self.unexpected(&format!(
                "',' or ')' to close the call to '{}' at position {}",
                name, open_position
            )));
        }
        self.advance();

        Ok(Expression::FunctionCall { name, args })
    }
}

/// Byte offset just past a token's source text.
fn token_end(tok: &Token) -> usize {
    match tok.kind {
        // The brackets are not part of the captured text.
        TokenKind::QuotedPathSegment => tok.position + tok.text.len() + 2,
        _ => tok.position + tok.text.len(),
    }
}

/// Parses tokens as an expression with default options.
pub fn parse_expression(tokens: &[Token]) -> ParseResult<Expression> {
    parse_expression_with(tokens, &ParseOptions::default())
}

pub fn parse_expression_with(tokens: &[Token], options: &ParseOptions) -> ParseResult<Expression> {
    Parser::new(tokens, options).parse_expression()
}

/// Parses tokens as an assignment statement with default options.
pub fn parse_assignment(tokens: &[Token]) -> ParseResult<Assignment> {
    parse_assignment_with(tokens, &ParseOptions::default())
}

pub fn parse_assignment_with(tokens: &[Token], options: &ParseOptions) -> ParseResult<Assignment> {
    Parser::new(tokens, options).parse_assignment()
}

/// Convenience function to tokenize and parse an expression string directly.
pub fn parse_expression_str(source: &str) -> Result<Expression, SyntaxError> {
    let tokens = tokenize(source)?;
    log_debug!("PARSE", "expression {:?} ({} tokens)", source, tokens.len());
    Ok(parse_expression(&tokens)?)
}

/// Convenience function to tokenize and parse an assignment string directly.
pub fn parse_assignment_str(source: &str) -> Result<Assignment, SyntaxError> {
    let tokens = tokenize(source)?;
    log_debug!("PARSE", "assignment {:?} ({} tokens)", source, tokens.len());
    Ok(parse_assignment(&tokens)?)
}
