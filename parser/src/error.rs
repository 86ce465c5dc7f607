//! FILENAME: parser/src/error.rs
//! PURPOSE: Error types raised while tokenizing and parsing expressions.

use thiserror::Error;

/// Raised by the tokenizer on an unrecognized character or an unterminated `[`.
#[derive(Error, Debug, PartialEq, Clone)]
#[error("Tokenize error at position {position}: {message}")]
pub struct TokenizeError {
    pub position: usize,
    pub message: String,
}

impl TokenizeError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        TokenizeError {
            position,
            message: message.into(),
        }
    }
}

/// Raised by the parser on a grammar violation.
#[derive(Error, Debug, PartialEq, Clone)]
#[error("Parse error at position {position}: {message}")]
pub struct ParseError {
    /// Byte offset of the offending token, or the source length at end of input.
    pub position: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        ParseError {
            position,
            message: message.into(),
        }
    }
}

/// Either stage of turning source text into a tree failed.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum SyntaxError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    /// Byte offset in the source where the error was detected.
    pub fn position(&self) -> usize {
        match self {
            SyntaxError::Tokenize(e) => e.position,
            SyntaxError::Parse(e) => e.position,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
