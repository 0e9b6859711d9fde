//! Utility function vocabulary (`TRIM`, `CONVERT`, `FORMAT`, `ADD`, ...).
//!
//! Utility words are contextual: `SET total = ROUND price UP` uses `ROUND` as a function while
//! `round` stays usable as a field name elsewhere. The parser dispatches on [`from_str`] only
//! at the start of a `SET` value.
//!
//! ## Notes
//! - `YEAR`, `MONTH` and `DAY` share a production (date part extraction); they are separate ids
//!   so diagnostics can name the exact word.
//!
//! ## Examples
//! ```rust
//! use vero_core::lang::functions::{self, UtilityFunctionId};
//!
//! assert_eq!(functions::from_str("trim"), Some(UtilityFunctionId::Trim));
//! assert_eq!(functions::as_str(UtilityFunctionId::Random), "RANDOM");
//! ```

use super::registry::{LangItemInfo, entry, item, item_with_aliases, lookup};

/// Stable identifier for utility functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UtilityFunctionId {
    Trim,
    Convert,
    Extract,
    Replace,
    Split,
    Join,
    Length,
    Pad,
    Today,
    Now,
    Add,
    Subtract,
    Format,
    Year,
    Month,
    Day,
    Round,
    Absolute,
    Generate,
    Random,
}

/// Metadata entry for a utility function.
pub type UtilityFunctionInfo = LangItemInfo<UtilityFunctionId>;

/// Registry of utility functions.
pub const UTILITY_FUNCTIONS: &[UtilityFunctionInfo] = &[
    // Strings
    item(UtilityFunctionId::Trim, "TRIM", "Strip surrounding whitespace."),
    item(UtilityFunctionId::Convert, "CONVERT", "Convert case or type."),
    item(UtilityFunctionId::Extract, "EXTRACT", "Substring between two positions."),
    item(UtilityFunctionId::Replace, "REPLACE", "Replace occurrences of a substring."),
    item(UtilityFunctionId::Split, "SPLIT", "Split on a delimiter."),
    item(UtilityFunctionId::Join, "JOIN", "Join a list with a delimiter."),
    item(UtilityFunctionId::Length, "LENGTH", "Length of a string or list."),
    item(UtilityFunctionId::Pad, "PAD", "Left-pad to a fixed width."),
    // Dates
    item(UtilityFunctionId::Today, "TODAY", "Current date."),
    item(UtilityFunctionId::Now, "NOW", "Current date and time."),
    item(UtilityFunctionId::Add, "ADD", "Add a duration to a date."),
    item(UtilityFunctionId::Subtract, "SUBTRACT", "Subtract a duration from a date."),
    item(UtilityFunctionId::Format, "FORMAT", "Format a date or number."),
    item(UtilityFunctionId::Year, "YEAR", "Year component of a date."),
    item(UtilityFunctionId::Month, "MONTH", "Month component of a date."),
    item(UtilityFunctionId::Day, "DAY", "Day component of a date."),
    // Numbers
    item(UtilityFunctionId::Round, "ROUND", "Round a number."),
    item_with_aliases(UtilityFunctionId::Absolute, "ABSOLUTE", &["ABS"], "Absolute value."),
    // Generators
    item(UtilityFunctionId::Generate, "GENERATE", "Random string from a pattern, or a UUID."),
    item(UtilityFunctionId::Random, "RANDOM", "Random number in a range."),
];

/// Resolve a utility function name (ASCII case-insensitive).
pub fn from_str(spelling: &str) -> Option<UtilityFunctionId> {
    lookup(UTILITY_FUNCTIONS, spelling)
}

/// Return the canonical spelling of a utility function.
pub fn as_str(id: UtilityFunctionId) -> &'static str {
    entry(UTILITY_FUNCTIONS, id)
        .map(|info| info.canonical)
        .expect("INVARIANT: every UtilityFunctionId has a UTILITY_FUNCTIONS entry")
}
