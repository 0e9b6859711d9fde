//! Canonical language vocabulary for the Vero test-automation language.
//!
//! This crate is intentionally small and dependency-light. It owns every spelling the
//! lexer and parser care about (reserved keywords, contextual words, selector types,
//! element states, ...) so that no other crate compares raw strings.
//!
//! ## Notes
//!
//! - This is a “vocabulary core” crate: **no IO**, no global state, and no AST types.
//! - Reserved keywords are classified by the lexer. Everything else in here is *contextual*:
//!   the lexer emits an identifier and the parser resolves its meaning by position.

pub mod lang;
