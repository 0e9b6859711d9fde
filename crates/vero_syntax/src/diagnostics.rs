//! Diagnostics produced by the lexer and parser.
//!
//! Errors are collected, never thrown: the parser keeps going after a mismatch and returns every
//! problem it found alongside the (possibly partial) AST. Each [`ParseError`] is a
//! [`miette::Diagnostic`] so the CLI can render it against the source text.

use std::fmt;

use miette::{Diagnostic, SourceSpan};
use serde::Serialize;
use thiserror::Error;

use crate::ast::{Program, Span};

/// Category of a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseErrorKind {
    /// A specific token was required; a placeholder was substituted and parsing continued.
    ExpectedToken,
    /// No production starts with this token.
    UnexpectedToken,
    /// A recognized keyword was followed by an invalid continuation.
    MalformedClause,
    /// A construct that was removed from the language.
    Migration,
    /// Invalid characters or literals in the source text.
    Lexical,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::ExpectedToken => write!(f, "expected token"),
            ParseErrorKind::UnexpectedToken => write!(f, "unexpected token"),
            ParseErrorKind::MalformedClause => write!(f, "malformed clause"),
            ParseErrorKind::Migration => write!(f, "removed syntax"),
            ParseErrorKind::Lexical => write!(f, "lexical error"),
        }
    }
}

/// A syntax error with location information
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(vero::syntax))]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub kind: ParseErrorKind,
    #[label("here")]
    pub span: SourceSpan,
    #[help]
    pub help: Option<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            line: span.line,
            column: span.column,
            kind,
            span: to_source_span(span),
            help: None,
        }
    }

    pub fn expected(message: impl Into<String>, span: Span) -> Self {
        Self::new(ParseErrorKind::ExpectedToken, message, span)
    }

    pub fn unexpected(message: impl Into<String>, span: Span) -> Self {
        Self::new(ParseErrorKind::UnexpectedToken, message, span)
    }

    pub fn malformed(message: impl Into<String>, span: Span) -> Self {
        Self::new(ParseErrorKind::MalformedClause, message, span)
    }

    pub fn migration(message: impl Into<String>, span: Span) -> Self {
        Self::new(ParseErrorKind::Migration, message, span)
    }

    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self::new(ParseErrorKind::Lexical, message, span)
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

fn to_source_span(span: Span) -> SourceSpan {
    (span.start, span.end.saturating_sub(span.start)).into()
}

/// Output of a parse: the AST (always present) plus every collected error.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub ast: Program,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Convert into a `Result`, discarding the partial AST when any error was recorded.
    pub fn into_result(self) -> Result<Program, Vec<ParseError>> {
        if self.errors.is_empty() {
            Ok(self.ast)
        } else {
            Err(self.errors)
        }
    }
}
