//! Parser for the Vero test-automation language
//!
//! Converts a token stream into a [`Program`]. Parsing is total: every call returns an AST plus
//! the list of diagnostics, and malformed declarations are kept in partial form.
//!
//! ## Error recovery
//!
//! - A missing required token (`{`, a name, `FROM`, ...) records an error and a placeholder is
//!   used so the production can finish.
//! - An unexpected token or a malformed clause aborts the current production with `?`. The
//!   declaration loop records the error, skips to the next `PAGE`, `PAGEACTIONS`, `FEATURE`,
//!   `FIXTURE`, `SCENARIO` or `}`, and resumes the interrupted declaration where possible.
//! - Until the next recognized declaration or member starts, further errors are suppressed so
//!   one mistake yields one diagnostic.
//!
//! ## Examples
//!
//! ```rust
//! use vero_syntax::{lexer, parser};
//!
//! let source = r#"
//! FEATURE Login {
//!     SCENARIO "valid credentials" {
//!         OPEN "/login"
//!         FILL "Email" WITH "user@example.com"
//!         CLICK BUTTON "Sign in"
//!         VERIFY url CONTAINS "/dashboard"
//!     }
//! }
//! "#;
//! let tokens = lexer::lex(source).unwrap();
//! let result = parser::parse(&tokens);
//! assert!(result.errors.is_empty());
//! assert_eq!(result.ast.features[0].scenarios[0].statements.len(), 4);
//! ```

use std::collections::BTreeSet;

use crate::ast::*;
use crate::config::ParserConfig;
use crate::diagnostics::ParseError;
pub use crate::diagnostics::ParseResult;
use crate::lexer::{Token, TokenKind};
use vero_core::lang::annotations;
use vero_core::lang::functions::{self, UtilityFunctionId};
use vero_core::lang::http;
use vero_core::lang::keywords::{KeywordCategory, KeywordId};
use vero_core::lang::operators::OperatorId;
use vero_core::lang::punctuation::PunctuationId;
use vero_core::lang::selectors;
use vero_core::lang::states;
use vero_core::lang::units;
use vero_core::lang::words::{self, WordId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/selectors.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/utility.rs");
include!("parser/conditions.rs");
include!("parser/http.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
