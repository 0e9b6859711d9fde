//! Syntax frontend for the Vero test-automation language: lexer, parser, AST, diagnostics.
//!
//! This crate is dependency-light and intended for reuse by the CLI, code generators and editor
//! tooling.
//!
//! ## Notes
//! - This crate is “syntax-only”: it does not resolve page references, check fixture
//!   dependencies, or generate test code.
//! - Vocabulary identity (keywords, contextual words, selector types) comes from
//!   `vero_core::lang` registries.
//! - Parsing never fails outright: [`parser::parse`] always returns an AST together with the
//!   collected diagnostics.
//!
//! ## Examples
//! ```rust
//! use vero_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("PAGE Login { FIELD email = \"Email\" }").unwrap();
//! let result = parser::parse(&tokens);
//! assert!(result.errors.is_empty());
//! assert_eq!(result.ast.pages.len(), 1);
//! ```

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
