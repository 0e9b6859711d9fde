//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to make it easy
//! to work with ID-based tokens and with contextual words, which are identifiers resolved by
//! value.

use crate::lexer::{Token, TokenKind};
use vero_core::lang::keywords::{self, KeywordCategory, KeywordId};
use vero_core::lang::operators::OperatorId;
use vero_core::lang::punctuation::PunctuationId;
use vero_core::lang::words::{self, WordId};

impl TokenKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return the keyword category, if this is a keyword token.
    pub fn keyword_category(&self) -> Option<KeywordCategory> {
        self.keyword_id().map(keywords::category)
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.keyword_id()`.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        self.kind.keyword_id()
    }

    /// Convenience wrapper for `self.kind.operator_id()`.
    pub fn operator_id(&self) -> Option<OperatorId> {
        self.kind.operator_id()
    }

    /// Convenience wrapper for `self.kind.punctuation_id()`.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        self.kind.punctuation_id()
    }

    /// Resolve an identifier token as a contextual word.
    ///
    /// Keywords and literals never resolve, even when their spelling would.
    pub fn word_id(&self) -> Option<WordId> {
        match self.kind {
            TokenKind::Identifier => words::from_str(&self.value),
            _ => None,
        }
    }

    /// Return `true` if this identifier token spells the given contextual word.
    pub fn is_word(&self, id: WordId) -> bool {
        self.word_id() == Some(id)
    }
}
