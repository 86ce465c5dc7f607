//! FILENAME: parser/src/lexer.rs
//! PURPOSE: Scans a raw expression string and produces a sequence of Tokens.
//! CONTEXT: This is the first stage of the parsing pipeline. It handles
//! whitespace skipping, number scanning, identifiers, bracket-quoted path
//! segments and multi-character operators like <= and &&.
//!
//! SUPPORTED SYMBOLS:
//! - Multi char (matched first): && || == != <= >=
//! - Single char: any other ASCII punctuation, e.g. = & | ! + - * / ^ ( ) . , < >
//! - Quoted segments: [anything up to the first closing bracket]

use crate::error::TokenizeError;
use crate::logging::log_trace;
use crate::token::{Token, TokenKind};

/// Operators longer than one character, tried before single characters.
const MULTI_CHAR_SYMBOLS: [&str; 6] = ["&&", "||", "==", "!=", "<=", ">="];

pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer { source, pos: 0 }
    }

    /// Advances the lexer and returns the next token, or None at end of input.
    pub fn next_token(&mut self) -> Option<Result<Token, TokenizeError>> {
        self.skip_whitespace();

        let start = self.pos;
        let ch = self.peek()?;

        let result = match ch {
            '[' => self.read_quoted_segment(start),
            c if c.is_ascii_digit() => Ok(self.read_number(start)),
            c if is_ident_start(c) => Ok(self.read_identifier(start)),
            c if c.is_ascii_punctuation() => Ok(self.read_symbol(start)),
            c => {
                self.bump();
                Err(TokenizeError::new(
                    start,
                    format!("Unrecognized character '{}'", c.escape_debug()),
                ))
            }
        };

        if let Ok(tok) = &result {
            log_trace!("TOKENIZE", "{:?} {:?} at {}", tok.kind, tok.text, tok.position);
        }

        Some(result)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Looks `n` characters past the current one.
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn eat_digits(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
    }

    /// Reads `digits ['.' digits] [('e'|'E') ['+'|'-'] digits]`.
    /// A '.' or exponent marker that is not followed by digits is left for the next token.
    fn read_number(&mut self, start: usize) -> Token {
        self.eat_digits();

        if self.peek() == Some('.') && matches!(self.peek_nth(1), Some(c) if c.is_ascii_digit()) {
            self.bump();
            self.eat_digits();
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let digit_offset = match self.peek_nth(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if matches!(self.peek_nth(digit_offset), Some(c) if c.is_ascii_digit()) {
                for _ in 0..digit_offset {
                    self.bump();
                }
                self.eat_digits();
            }
        }

        Token::new(TokenKind::Number, &self.source[start..self.pos], start)
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        while matches!(self.peek(), Some(c) if is_ident_continue(c)) {
            self.bump();
        }
        Token::new(TokenKind::Variable, &self.source[start..self.pos], start)
    }

    /// Reads a `[...]` segment. Everything up to the first ']' is kept verbatim.
    fn read_quoted_segment(&mut self, start: usize) -> Result<Token, TokenizeError> {
        // Consume the '['
        self.bump();
        let content_start = self.pos;

        match self.source[content_start..].find(']') {
            Some(len) => {
                let text = &self.source[content_start..content_start + len];
                self.pos = content_start + len + 1;
                Ok(Token::new(TokenKind::QuotedPathSegment, text, start))
            }
            None => {
                self.pos = self.source.len();
                Err(TokenizeError::new(start, "Unterminated '[' quoted segment"))
            }
        }
    }

    /// Longest match first: two-character operators before single punctuation.
    fn read_symbol(&mut self, start: usize) -> Token {
        let rest = &self.source[start..];
        let len = MULTI_CHAR_SYMBOLS
            .iter()
            .find(|sym| rest.starts_with(**sym))
            .map(|sym| sym.len())
            .unwrap_or(1);

        self.pos += len;
        Token::new(TokenKind::Symbol, &rest[..len], start)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Converts the whole source into tokens, failing on the first bad character.
pub fn tokenize(source: &str) -> Result<Vec<Token>, TokenizeError> {
    Lexer::new(source).collect()
}
