//! Punctuation vocabulary.
//!
//! This module defines the canonical set of punctuation tokens used by the lexer/parser:
//! block and list delimiters, separators, and the annotation marker.
//!
//! ## Examples
//! ```rust
//! use vero_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("{"), Some(PunctuationId::LBrace));
//! assert_eq!(punctuation::as_str(PunctuationId::At), "@");
//! ```

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    Comma,
    Dot,
    Colon,
    At,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Comma, ","),
    info(PunctuationId::Dot, "."),
    info(PunctuationId::Colon, ":"),
    info(PunctuationId::At, "@"),
    info(PunctuationId::LParen, "("),
    info(PunctuationId::RParen, ")"),
    info(PunctuationId::LBracket, "["),
    info(PunctuationId::RBracket, "]"),
    info(PunctuationId::LBrace, "{"),
    info(PunctuationId::RBrace, "}"),
];

/// Return the canonical spelling of a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.canonical)
        .expect("INVARIANT: every PunctuationId has a PUNCTUATION entry")
}

/// Resolve a spelling to a punctuation id.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

/// Resolve a single character to a punctuation id (lexer fast path).
pub fn from_char(c: char) -> Option<PunctuationId> {
    let mut buf = [0u8; 4];
    from_str(c.encode_utf8(&mut buf))
}

const fn info(id: PunctuationId, canonical: &'static str) -> PunctuationInfo {
    PunctuationInfo { id, canonical }
}
