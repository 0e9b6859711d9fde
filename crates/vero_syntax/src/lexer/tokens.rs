//! Token types for the Vero lexer.
//!
//! The lexer uses **registry-backed IDs** for reserved vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for `=`, `==`, `!=`, `>`, `<`, `>=`, `<=`
//! - `Punctuation(PunctuationId)` for delimiters and separators
//!
//! ## Notes
//! - Every token also keeps its `value`: the source spelling for keywords and identifiers, the
//!   unescaped contents for strings, and the bare variable name for `{{NAME}}` references.
//! - Contextual words (selector types, states, units, ...) are plain `Identifier` tokens.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::ast::Span;
use vero_core::lang::keywords::{self, KeywordId};
use vero_core::lang::operators::{self, OperatorId};
use vero_core::lang::punctuation::{self, PunctuationId};

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Identifier,
    String,
    Number,
    /// `{{NAME}}`
    EnvVar,

    // ========== Special ==========
    Eof,
}

/// A token with its kind, value and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
        }
    }

    /// End-of-stream sentinel positioned at `span`.
    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", span)
    }

    pub fn line(&self) -> usize {
        self.span.line
    }

    pub fn column(&self) -> usize {
        self.span.column
    }

    /// Human-readable description for diagnostics (`'{'`, `keyword CLICK`, `end of input`).
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Keyword(id) => format!("keyword {}", keywords::as_str(id)),
            TokenKind::Operator(id) => format!("'{}'", operators::as_str(id)),
            TokenKind::Punctuation(id) => format!("'{}'", punctuation::as_str(id)),
            TokenKind::Identifier => format!("identifier '{}'", self.value),
            TokenKind::String => format!("string \"{}\"", self.value),
            TokenKind::Number => format!("number {}", self.value),
            TokenKind::EnvVar => format!("{{{{{}}}}}", self.value),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
