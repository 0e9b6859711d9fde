#![forbid(unsafe_code)]
//! Vero test-automation language tooling
//!
//! Vero describes browser end-to-end tests as pages, reusable page actions, fixtures and
//! features. This crate provides the command-line frontend; the lexer, parser and AST live in
//! `vero_syntax` and are re-exported here.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a parser bug (logic error), use `.expect("INVARIANT: reason")` with a
//!   clear explanation.

pub mod cli;

pub use vero_syntax::ast;
pub use vero_syntax::config;
pub use vero_syntax::diagnostics;
pub use vero_syntax::lexer;
pub use vero_syntax::parser;

pub use cli::commands::{analyze_source, render_diagnostics};
