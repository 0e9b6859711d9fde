//! Selector type vocabulary.
//!
//! Selector type words (`BUTTON`, `CSS`, `ROLE`, ...) are **not** reserved: the lexer emits them
//! as identifiers and the parser resolves them through [`from_str`] only where a selector may
//! start. This keeps words like `title`, `label` or `link` usable as field and variable names.
//!
//! ## Notes
//! - [`SelectorType::Auto`] and [`SelectorType::TextExact`] have no keyword of their own: `auto`
//!   comes from a bare string selector and `text-exact` from `TEXT EXACT "..."`.
//!
//! ## Examples
//! ```rust
//! use vero_core::lang::selectors::{self, SelectorType};
//!
//! assert_eq!(selectors::from_str("testid"), Some(SelectorType::TestId));
//! assert_eq!(selectors::name(SelectorType::TextExact), "text-exact");
//! assert_eq!(selectors::from_str("auto"), None);
//! ```

use serde::Serialize;

use super::registry::{LangItemInfo, item, item_with_aliases, lookup};

/// How a selector value should be interpreted by the code generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectorType {
    Css,
    #[serde(rename = "xpath")]
    XPath,
    Text,
    TextExact,
    Role,
    Label,
    Placeholder,
    #[serde(rename = "testid")]
    TestId,
    Alt,
    Title,
    Auto,
    Button,
    Textbox,
    Link,
    Checkbox,
    Heading,
    Combobox,
    Radio,
}

/// Metadata entry for a selector keyword.
pub type SelectorInfo = LangItemInfo<SelectorType>;

/// Registry of selector type keywords.
pub const SELECTOR_KEYWORDS: &[SelectorInfo] = &[
    item(SelectorType::Css, "CSS", "Raw CSS selector."),
    item(SelectorType::XPath, "XPATH", "Raw XPath expression."),
    item(SelectorType::Text, "TEXT", "Element containing the given text."),
    item(SelectorType::Role, "ROLE", "ARIA role, optionally narrowed with NAME."),
    item(SelectorType::Label, "LABEL", "Form control by its label text."),
    item(SelectorType::Placeholder, "PLACEHOLDER", "Input by placeholder text."),
    item_with_aliases(SelectorType::TestId, "TESTID", &["TEST_ID"], "Element by test id attribute."),
    item(SelectorType::Alt, "ALT", "Image by alt text."),
    item(SelectorType::Title, "TITLE", "Element by title attribute."),
    item(SelectorType::Button, "BUTTON", "Button role with accessible name."),
    item(SelectorType::Textbox, "TEXTBOX", "Textbox role with accessible name."),
    item(SelectorType::Link, "LINK", "Link role with accessible name."),
    item(SelectorType::Checkbox, "CHECKBOX", "Checkbox role with accessible name."),
    item(SelectorType::Heading, "HEADING", "Heading role with accessible name."),
    item(SelectorType::Combobox, "COMBOBOX", "Combobox role with accessible name."),
    item(SelectorType::Radio, "RADIO", "Radio role with accessible name."),
];

/// Resolve a selector keyword (ASCII case-insensitive).
pub fn from_str(spelling: &str) -> Option<SelectorType> {
    lookup(SELECTOR_KEYWORDS, spelling)
}

/// Return the serialized, lower-case name of a selector type.
pub fn name(ty: SelectorType) -> &'static str {
    match ty {
        SelectorType::Css => "css",
        SelectorType::XPath => "xpath",
        SelectorType::Text => "text",
        SelectorType::TextExact => "text-exact",
        SelectorType::Role => "role",
        SelectorType::Label => "label",
        SelectorType::Placeholder => "placeholder",
        SelectorType::TestId => "testid",
        SelectorType::Alt => "alt",
        SelectorType::Title => "title",
        SelectorType::Auto => "auto",
        SelectorType::Button => "button",
        SelectorType::Textbox => "textbox",
        SelectorType::Link => "link",
        SelectorType::Checkbox => "checkbox",
        SelectorType::Heading => "heading",
        SelectorType::Combobox => "combobox",
        SelectorType::Radio => "radio",
    }
}
