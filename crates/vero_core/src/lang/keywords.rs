//! Define the reserved keyword vocabulary for the Vero language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical spellings,
//! aliases, categories and lifecycle.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **ASCII case-insensitive** (`click` and `CLICK` are the same word).
//! - The reserved set is deliberately small. Selector types, element states, units, modifier
//!   words and utility function names are *not* keywords; see [`crate::lang::words`] and the
//!   other contextual registries.
//! - Statement verbs are reserved but remain usable as names (fields, variables, columns); the
//!   parser consults [`KeywordCategory`] to decide where a keyword may stand in for a name.
//!
//! ## Examples
//! ```rust
//! use vero_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("verify"), Some(KeywordId::Verify));
//! assert_eq!(keywords::as_str(KeywordId::PageActions), "PAGEACTIONS");
//! assert_eq!(keywords::from_str("button"), None);
//! ```

use super::registry::Stability;

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Declarations
    Page,
    PageActions,
    Feature,
    Scenario,
    Fixture,
    Field,
    Use,
    Before,
    After,

    // Statement verbs
    Open,
    Click,
    Double,
    Right,
    Fill,
    Check,
    Uncheck,
    Select,
    Hover,
    Press,
    Scroll,
    Upload,
    Drag,
    Clear,
    Focus,
    Refresh,
    Go,
    Switch,
    Close,
    Wait,
    Take,
    Log,
    Fail,
    Perform,
    Set,
    Get,
    Verify,
    Accept,
    Dismiss,
    Row,
    Rows,
    Count,
    Api,
    Mock,

    // Control flow
    If,
    Else,
    Try,
    Catch,
    Repeat,
    For,

    // Clause connectives
    With,
    From,
    To,
    As,
    Then,
    Where,
    Order,
    By,
    Limit,
    Offset,
    Of,

    // Word operators
    And,
    Or,
    Not,
    In,
    Is,
    Contains,
    Equals,
    Matches,
    Starts,
    Ends,

    // Literals
    True,
    False,
}

/// High-level grouping used by the parser and tooling.
///
/// ## Notes
/// - `Statement` keywords may be reused as plain names (a field called `select`, a column
///   called `count`).
/// - `Clause`, `Operator` and `Literal` keywords are never accepted as data-column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Declaration,
    Statement,
    ControlFlow,
    Clause,
    Operator,
    Literal,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub category: KeywordCategory,
    pub stability: Stability,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Declarations
    info(KeywordId::Page, "PAGE", KeywordCategory::Declaration),
    info(KeywordId::PageActions, "PAGEACTIONS", KeywordCategory::Declaration),
    info(KeywordId::Feature, "FEATURE", KeywordCategory::Declaration),
    info(KeywordId::Scenario, "SCENARIO", KeywordCategory::Declaration),
    info(KeywordId::Fixture, "FIXTURE", KeywordCategory::Declaration),
    info(KeywordId::Field, "FIELD", KeywordCategory::Declaration),
    // `USE <Page>` was replaced by automatic page resolution; only `USE FIXTURE` survives.
    KeywordInfo {
        id: KeywordId::Use,
        canonical: "USE",
        aliases: &[],
        category: KeywordCategory::Declaration,
        stability: Stability::Deprecated,
    },
    info(KeywordId::Before, "BEFORE", KeywordCategory::Declaration),
    info(KeywordId::After, "AFTER", KeywordCategory::Declaration),
    // Statement verbs
    info(KeywordId::Open, "OPEN", KeywordCategory::Statement),
    info(KeywordId::Click, "CLICK", KeywordCategory::Statement),
    info(KeywordId::Double, "DOUBLE", KeywordCategory::Statement),
    info(KeywordId::Right, "RIGHT", KeywordCategory::Statement),
    info(KeywordId::Fill, "FILL", KeywordCategory::Statement),
    info(KeywordId::Check, "CHECK", KeywordCategory::Statement),
    info(KeywordId::Uncheck, "UNCHECK", KeywordCategory::Statement),
    info(KeywordId::Select, "SELECT", KeywordCategory::Statement),
    info(KeywordId::Hover, "HOVER", KeywordCategory::Statement),
    info(KeywordId::Press, "PRESS", KeywordCategory::Statement),
    info(KeywordId::Scroll, "SCROLL", KeywordCategory::Statement),
    info(KeywordId::Upload, "UPLOAD", KeywordCategory::Statement),
    info(KeywordId::Drag, "DRAG", KeywordCategory::Statement),
    info(KeywordId::Clear, "CLEAR", KeywordCategory::Statement),
    info(KeywordId::Focus, "FOCUS", KeywordCategory::Statement),
    info(KeywordId::Refresh, "REFRESH", KeywordCategory::Statement),
    info(KeywordId::Go, "GO", KeywordCategory::Statement),
    info(KeywordId::Switch, "SWITCH", KeywordCategory::Statement),
    info(KeywordId::Close, "CLOSE", KeywordCategory::Statement),
    info(KeywordId::Wait, "WAIT", KeywordCategory::Statement),
    info(KeywordId::Take, "TAKE", KeywordCategory::Statement),
    info(KeywordId::Log, "LOG", KeywordCategory::Statement),
    info(KeywordId::Fail, "FAIL", KeywordCategory::Statement),
    info(KeywordId::Perform, "PERFORM", KeywordCategory::Statement),
    info(KeywordId::Set, "SET", KeywordCategory::Statement),
    info(KeywordId::Get, "GET", KeywordCategory::Statement),
    info(KeywordId::Verify, "VERIFY", KeywordCategory::Statement),
    info(KeywordId::Accept, "ACCEPT", KeywordCategory::Statement),
    info(KeywordId::Dismiss, "DISMISS", KeywordCategory::Statement),
    info(KeywordId::Row, "ROW", KeywordCategory::Statement),
    info(KeywordId::Rows, "ROWS", KeywordCategory::Statement),
    info(KeywordId::Count, "COUNT", KeywordCategory::Statement),
    info(KeywordId::Api, "API", KeywordCategory::Statement),
    info(KeywordId::Mock, "MOCK", KeywordCategory::Statement),
    // Control flow
    info(KeywordId::If, "IF", KeywordCategory::ControlFlow),
    info(KeywordId::Else, "ELSE", KeywordCategory::ControlFlow),
    info(KeywordId::Try, "TRY", KeywordCategory::ControlFlow),
    info(KeywordId::Catch, "CATCH", KeywordCategory::ControlFlow),
    info(KeywordId::Repeat, "REPEAT", KeywordCategory::ControlFlow),
    info(KeywordId::For, "FOR", KeywordCategory::ControlFlow),
    // Clause connectives
    info(KeywordId::With, "WITH", KeywordCategory::Clause),
    info(KeywordId::From, "FROM", KeywordCategory::Clause),
    info(KeywordId::To, "TO", KeywordCategory::Clause),
    info(KeywordId::As, "AS", KeywordCategory::Clause),
    info(KeywordId::Then, "THEN", KeywordCategory::Clause),
    info(KeywordId::Where, "WHERE", KeywordCategory::Clause),
    info(KeywordId::Order, "ORDER", KeywordCategory::Clause),
    info(KeywordId::By, "BY", KeywordCategory::Clause),
    info(KeywordId::Limit, "LIMIT", KeywordCategory::Clause),
    info(KeywordId::Offset, "OFFSET", KeywordCategory::Clause),
    info(KeywordId::Of, "OF", KeywordCategory::Clause),
    // Word operators
    info(KeywordId::And, "AND", KeywordCategory::Operator),
    info(KeywordId::Or, "OR", KeywordCategory::Operator),
    info(KeywordId::Not, "NOT", KeywordCategory::Operator),
    info(KeywordId::In, "IN", KeywordCategory::Operator),
    info(KeywordId::Is, "IS", KeywordCategory::Operator),
    info(KeywordId::Contains, "CONTAINS", KeywordCategory::Operator),
    KeywordInfo {
        id: KeywordId::Equals,
        canonical: "EQUALS",
        aliases: &["EQUAL"],
        category: KeywordCategory::Operator,
        stability: Stability::Stable,
    },
    info(KeywordId::Matches, "MATCHES", KeywordCategory::Operator),
    info(KeywordId::Starts, "STARTS", KeywordCategory::Operator),
    info(KeywordId::Ends, "ENDS", KeywordCategory::Operator),
    // Literals
    info(KeywordId::True, "TRUE", KeywordCategory::Literal),
    info(KeywordId::False, "FALSE", KeywordCategory::Literal),
];

/// Return the canonical spelling of a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Return the category of a keyword.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return `true` if the keyword is kept only to report a migration diagnostic.
pub fn is_deprecated(id: KeywordId) -> bool {
    info_for(id).stability == Stability::Deprecated
}

/// Return the metadata entry for a keyword.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (a registry bug caught by the guardrail tests).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS
        .iter()
        .find(|k| k.id == id)
        .expect("INVARIANT: every KeywordId has a KEYWORDS entry")
}

/// Resolve a spelling to a keyword id (ASCII case-insensitive).
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS
        .iter()
        .find(|k| k.canonical.eq_ignore_ascii_case(s) || k.aliases.iter().any(|a| a.eq_ignore_ascii_case(s)))
        .map(|k| k.id)
}

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        aliases: &[],
        category,
        stability: Stability::Stable,
    }
}
