//! FILENAME: parser/src/token.rs
//! PURPOSE: Token definitions for the expression tokenizer.
//! CONTEXT: Tokens are the atomic units produced by the tokenizer and consumed by the parser.
//! Each token keeps its original text and the byte offset where it starts so the
//! parser can report errors against the source string.

/// The lexical class of a token.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// Identifier: letters, digits and underscore, not starting with a digit.
    Variable,
    /// Unsigned numeric literal such as `12.3e6`.
    Number,
    /// Operator or punctuation: `&&`, `<=`, `(`, `.`, ...
    Symbol,
    /// Contents of a `[...]` segment, captured verbatim.
    QuotedPathSegment,
}

/// A single classified lexical unit.
#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Byte offset of the first character in the source.
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    /// Returns true if this is the symbol `sym`.
    pub fn is_symbol(&self, sym: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == sym
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Variable => write!(f, "variable"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::Symbol => write!(f, "symbol"),
            TokenKind::QuotedPathSegment => write!(f, "quoted segment"),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::QuotedPathSegment => write!(f, "'[{}]'", self.text),
            _ => write!(f, "'{}'", self.text),
        }
    }
}
