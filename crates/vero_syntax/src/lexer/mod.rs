//! Lexer for the Vero test-automation language
//!
//! Handles tokenization including:
//! - Reserved keywords (case-insensitive: `click`, `Click` and `CLICK` are the same keyword)
//! - Identifiers, including every contextual word (selector types, states, units, ...)
//! - String literals in single or double quotes, numbers, `{{ENV}}` references
//! - Operators and punctuation
//! - `#` and `//` line comments, which are dropped
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String literal and environment reference scanning
//! - `numbers` - Numeric literal scanning

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::ParseError;
use vero_core::lang::operators::OperatorId;
use vero_core::lang::punctuation;

/// Lexer for Vero source code.
///
/// Converts source text into a stream of tokens. Lexical errors are collected and scanning
/// continues with the next character, so one bad character yields one diagnostic.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
}

/// Position of the first character of a token.
#[derive(Debug, Clone, Copy)]
struct Mark {
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns a vector of tokens on success, or a vector of errors on failure.
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(self) -> Result<Vec<Token>, Vec<ParseError>> {
        let (tokens, errors) = self.tokenize_lossy();
        if errors.is_empty() { Ok(tokens) } else { Err(errors) }
    }

    /// Tokenize the entire source, returning the tokens that could be scanned together with
    /// every lexical error.
    pub fn tokenize_lossy(mut self) -> (Vec<Token>, Vec<ParseError>) {
        while !self.is_at_end() {
            self.scan_token();
        }

        let end = self.mark();
        self.tokens.push(Token::eof(self.span_from(end)));

        (self.tokens, self.errors)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.current_pos = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn mark(&self) -> Mark {
        Mark {
            pos: self.current_pos,
            line: self.line,
            column: self.column,
        }
    }

    fn span_from(&self, mark: Mark) -> Span {
        Span::new(mark.pos, self.current_pos, mark.line, mark.column)
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.mark();

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            ' ' | '\t' | '\r' | '\n' => {}

            // Comments
            '#' => self.skip_line(),
            '/' if self.peek() == Some('/') => self.skip_line(),

            // `{{NAME}}` or a plain brace
            '{' if self.peek() == Some('{') => {
                self.advance();
                self.scan_env_var(start);
            }

            // Operators
            '=' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::EqEq, start);
                } else {
                    self.add_op(OperatorId::Assign, start);
                }
            }
            '!' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::NotEq, start);
                } else {
                    self.error("Unexpected character '!'", start);
                }
            }
            '<' => self.operator(start, OperatorId::Lt, OperatorId::LtEq),
            '>' => self.operator(start, OperatorId::Gt, OperatorId::GtEq),

            // Strings
            '"' | '\'' => self.scan_string(start, c),

            // Numbers (a leading minus binds only to a digit)
            '-' if self.peek().is_some_and(|n| n.is_ascii_digit()) => self.scan_number(start),
            '0'..='9' => self.scan_number(start),

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => match punctuation::from_char(c) {
                Some(id) => {
                    let span = self.span_from(start);
                    self.tokens
                        .push(Token::new(TokenKind::Punctuation(id), punctuation::as_str(id), span));
                }
                None => self.error(format!("Unexpected character '{c}'"), start),
            },
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: Mark) {
        let span = self.span_from(start);
        let value = &self.source[start.pos..self.current_pos];
        self.tokens.push(Token::new(kind, value, span));
    }

    fn add_op(&mut self, id: OperatorId, start: Mark) {
        self.add_token(TokenKind::Operator(id), start);
    }

    /// Match `<op>=` or fall back to the single-character operator.
    fn operator(&mut self, start: Mark, simple: OperatorId, with_eq: OperatorId) {
        if self.match_char('=') {
            self.add_op(with_eq, start);
        } else {
            self.add_op(simple, start);
        }
    }

    fn error(&mut self, message: impl Into<String>, start: Mark) {
        let span = self.span_from(start);
        self.errors.push(ParseError::lexical(message, span));
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: Mark) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start.pos..self.current_pos];

        // Reserved words are classified here; contextual words stay identifiers.
        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Identifier, start);
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<ParseError>> {
    Lexer::new(source).tokenize()
}

/// Lex a source string, keeping the tokens even when lexical errors occurred.
///
/// Useful for tooling that wants to report lexical and syntax errors in one pass.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex_lossy(source: &str) -> (Vec<Token>, Vec<ParseError>) {
    Lexer::new(source).tokenize_lossy()
}

// ============================================================================
// TESTS
// ============================================================================
