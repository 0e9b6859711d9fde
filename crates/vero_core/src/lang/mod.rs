//! Vero language vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: reserved keywords, operators,
//! punctuation, and the contextual word families (selector types, element states, annotations,
//! HTTP methods, units, utility functions).
//!
//! The design goal is to avoid stringly-typed checks scattered across the parser and tooling.
//! Callers work with **stable IDs** (e.g. `KeywordId`, `SelectorType`) and look up
//! spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - All lookups are ASCII case-insensitive; Vero source is conventionally written in upper case
//!   for keywords but lower case is accepted everywhere.
//!
//! ## Examples
//! ```rust
//! use vero_core::lang::keywords::{self, KeywordId};
//! use vero_core::lang::selectors::{self, SelectorType};
//!
//! assert_eq!(keywords::from_str("click"), Some(KeywordId::Click));
//! assert_eq!(selectors::from_str("BUTTON"), Some(SelectorType::Button));
//! ```

pub mod annotations;
pub mod functions;
pub mod http;
pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod registry;
pub mod selectors;
pub mod states;
pub mod units;
pub mod words;
