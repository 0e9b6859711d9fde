//! Shareable metadata for `vero_core::lang` registries.
//!
//! The `vero_core::lang` module is a set of **registry-first** vocabularies: keywords,
//! contextual words, selector types, states, etc. This submodule provides the small,
//! dependency-free metadata types reused across all registries.
//!
//! ## Notes
//! - These types are lightweight and `Copy`-friendly so registries can live in `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; enforcement of syntax rules still lives
//!   in the lexer/parser.

/// Describe the lifecycle status of a language vocabulary item.
///
/// ## Notes
/// - `Deprecated` items are still recognized so the parser can emit a targeted migration
///   diagnostic instead of a generic “unexpected token”.
///
/// ## Examples
/// ```rust
/// use vero_core::lang::registry::Stability;
///
/// let s = Stability::Stable;
/// assert_eq!(format!("{s:?}"), "Stable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Deprecated,
}

/// Shared metadata shape for “registry-first” vocabulary items.
///
/// Registries that need extra per-item data (e.g. keyword category) wrap this struct or
/// define their own info type with the same core fields.
#[derive(Debug, Clone, Copy)]
pub struct LangItemInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub stability: Stability,
}

impl<Id> LangItemInfo<Id> {
    /// Return `true` if `spelling` is the canonical spelling or one of the aliases
    /// (ASCII case-insensitive).
    pub fn matches(&self, spelling: &str) -> bool {
        self.canonical.eq_ignore_ascii_case(spelling) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(spelling))
    }
}

/// Build a stable registry entry with no aliases.
pub const fn item<Id>(id: Id, canonical: &'static str, description: &'static str) -> LangItemInfo<Id> {
    LangItemInfo {
        id,
        canonical,
        aliases: &[],
        description,
        stability: Stability::Stable,
    }
}

/// Build a stable registry entry with alternative spellings.
pub const fn item_with_aliases<Id>(
    id: Id,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
) -> LangItemInfo<Id> {
    LangItemInfo {
        id,
        canonical,
        aliases,
        description,
        stability: Stability::Stable,
    }
}

/// Resolve a spelling against a registry table.
pub fn lookup<Id: Copy>(table: &[LangItemInfo<Id>], spelling: &str) -> Option<Id> {
    table.iter().find(|item| item.matches(spelling)).map(|item| item.id)
}

/// Find the registry entry for an id.
///
/// ## Notes
/// - Every registry is exhaustive over its id enum (enforced by the guardrail tests), so the
///   `None` branch is unreachable for well-formed tables.
pub fn entry<Id: Copy + PartialEq>(table: &'static [LangItemInfo<Id>], id: Id) -> Option<&'static LangItemInfo<Id>> {
    table.iter().find(|item| item.id == id)
}
