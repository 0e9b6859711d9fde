//! Contextual glue words.
//!
//! These words carry meaning only in specific grammar positions (`WAIT FOR NETWORK IDLE`,
//! `BEFORE EACH`, `ORDER BY name DESC`, `NTH 2`). The lexer emits them as identifiers and the
//! parser resolves them by value through [`from_str`], so none of them is reserved.
//!
//! ## Notes
//! - A word may also appear in another registry (`TEXT` is both a selector type and a glue word
//!   in `WITH TEXT`). Each registry is consulted only in its own grammar positions.
//!
//! ## Examples
//! ```rust
//! use vero_core::lang::words::{self, ScrollDirection, WordId};
//!
//! assert_eq!(words::from_str("idle"), Some(WordId::Idle));
//! assert_eq!(words::as_str(WordId::Desc), "DESC");
//! assert_eq!(words::scroll_direction("right"), Some(ScrollDirection::Right));
//! ```

use serde::Serialize;

use super::registry::{LangItemInfo, entry, item, lookup};

/// Stable identifier for contextual words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordId {
    // Selectors and modifiers
    Exact,
    Name,
    First,
    Last,
    Nth,
    Without,
    Has,

    // Element properties
    Text,
    Value,
    Attribute,
    Class,

    // Page / browser
    Url,
    Title,
    Screenshot,
    Navigation,
    Network,
    Idle,
    Back,
    Forward,
    Tab,
    New,
    Dialog,

    // HTTP
    Response,
    Status,
    Body,
    Headers,

    // Variable types
    Number,
    Flag,

    // Loops and hooks
    Each,
    All,
    Times,

    // Data queries
    Empty,
    Null,
    Asc,
    Desc,

    // Fixtures
    Scope,
    Test,
    Worker,
    Depends,
    On,
    Auto,
    Option,
    Default,
    Setup,
    Teardown,

    // Utility arguments
    Uppercase,
    Lowercase,
    Decimals,
    Uuid,
    Currency,
    Percent,
    Up,
    Down,
}

/// Metadata entry for a contextual word.
pub type WordInfo = LangItemInfo<WordId>;

/// Registry of contextual words.
pub const WORDS: &[WordInfo] = &[
    item(WordId::Exact, "EXACT", "`TEXT EXACT` selector."),
    item(WordId::Name, "NAME", "Accessible name parameter of `ROLE`."),
    item(WordId::First, "FIRST", "First matching element."),
    item(WordId::Last, "LAST", "Last matching element."),
    item(WordId::Nth, "NTH", "Element at a zero-based index."),
    item(WordId::Without, "WITHOUT", "Exclude elements containing text."),
    item(WordId::Has, "HAS", "Nested selector filter or content assertion."),
    item(WordId::Text, "TEXT", "Text content; also the text variable type."),
    item(WordId::Value, "VALUE", "Input value."),
    item(WordId::Attribute, "ATTRIBUTE", "Element attribute."),
    item(WordId::Class, "CLASS", "CSS class list."),
    item(WordId::Url, "URL", "Current page URL."),
    item(WordId::Title, "TITLE", "Current page title."),
    item(WordId::Screenshot, "SCREENSHOT", "Page or element screenshot."),
    item(WordId::Navigation, "NAVIGATION", "Pending navigation."),
    item(WordId::Network, "NETWORK", "Network activity."),
    item(WordId::Idle, "IDLE", "No in-flight requests."),
    item(WordId::Back, "BACK", "History back."),
    item(WordId::Forward, "FORWARD", "History forward."),
    item(WordId::Tab, "TAB", "Browser tab."),
    item(WordId::New, "NEW", "Newly opened tab."),
    item(WordId::Dialog, "DIALOG", "Browser dialog."),
    item(WordId::Response, "RESPONSE", "Last API response."),
    item(WordId::Status, "STATUS", "HTTP status code."),
    item(WordId::Body, "BODY", "HTTP body."),
    item(WordId::Headers, "HEADERS", "HTTP headers."),
    item(WordId::Number, "NUMBER", "Number variable type or conversion target."),
    item(WordId::Flag, "FLAG", "Boolean variable type."),
    item(WordId::Each, "EACH", "Per-scenario hook or loop item."),
    item(WordId::All, "ALL", "Once-per-feature hook."),
    item(WordId::Times, "TIMES", "Repeat count suffix."),
    item(WordId::Empty, "EMPTY", "Empty column value."),
    item(WordId::Null, "NULL", "Missing column value."),
    item(WordId::Asc, "ASC", "Ascending order."),
    item(WordId::Desc, "DESC", "Descending order."),
    item(WordId::Scope, "SCOPE", "Fixture lifetime."),
    item(WordId::Test, "TEST", "Per-test fixture scope."),
    item(WordId::Worker, "WORKER", "Per-worker fixture scope."),
    item(WordId::Depends, "DEPENDS", "Fixture dependency list."),
    item(WordId::On, "ON", "Fixture dependency list."),
    item(WordId::Auto, "AUTO", "Fixture used without an explicit USE."),
    item(WordId::Option, "OPTION", "Fixture option declaration."),
    item(WordId::Default, "DEFAULT", "Fixture option default."),
    item(WordId::Setup, "SETUP", "Fixture setup block."),
    item(WordId::Teardown, "TEARDOWN", "Fixture teardown block."),
    item(WordId::Uppercase, "UPPERCASE", "Upper-case conversion."),
    item(WordId::Lowercase, "LOWERCASE", "Lower-case conversion."),
    item(WordId::Decimals, "DECIMALS", "Rounding precision suffix."),
    item(WordId::Uuid, "UUID", "Random UUID generator."),
    item(WordId::Currency, "CURRENCY", "Currency number format."),
    item(WordId::Percent, "PERCENT", "Percentage number format."),
    item(WordId::Up, "UP", "Round up or scroll up."),
    item(WordId::Down, "DOWN", "Round down or scroll down."),
];

/// Resolve a contextual word (ASCII case-insensitive).
pub fn from_str(spelling: &str) -> Option<WordId> {
    lookup(WORDS, spelling)
}

/// Return the canonical spelling of a contextual word.
pub fn as_str(id: WordId) -> &'static str {
    entry(WORDS, id)
        .map(|info| info.canonical)
        .expect("INVARIANT: every WordId has a WORDS entry")
}

/// Direction for `SCROLL UP|DOWN|LEFT|RIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Registry of scroll directions.
///
/// `RIGHT` is also a reserved keyword (`RIGHT CLICK`); the parser resolves directions by token
/// value so both spellings reach this table.
pub const SCROLL_DIRECTIONS: &[LangItemInfo<ScrollDirection>] = &[
    item(ScrollDirection::Up, "UP", "Scroll up one viewport."),
    item(ScrollDirection::Down, "DOWN", "Scroll down one viewport."),
    item(ScrollDirection::Left, "LEFT", "Scroll left one viewport."),
    item(ScrollDirection::Right, "RIGHT", "Scroll right one viewport."),
];

/// Resolve a scroll direction.
pub fn scroll_direction(spelling: &str) -> Option<ScrollDirection> {
    lookup(SCROLL_DIRECTIONS, spelling)
}
