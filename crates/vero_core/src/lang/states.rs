//! Element state vocabulary for `IS <state>` assertions, waits and conditions.
//!
//! ## Examples
//! ```rust
//! use vero_core::lang::states::{self, ElementState};
//!
//! assert_eq!(states::from_str("visible"), Some(ElementState::Visible));
//! assert_eq!(states::from_str("SHOWN"), Some(ElementState::Visible));
//! ```

use serde::Serialize;

use super::registry::{LangItemInfo, item, item_with_aliases, lookup};

/// Observable state of a UI element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementState {
    Visible,
    Hidden,
    Enabled,
    Disabled,
    Checked,
    Focused,
    Empty,
    Editable,
}

/// Metadata entry for an element state.
pub type StateInfo = LangItemInfo<ElementState>;

/// Registry of element states.
pub const STATES: &[StateInfo] = &[
    item_with_aliases(ElementState::Visible, "VISIBLE", &["SHOWN"], "Element is rendered and visible."),
    item(ElementState::Hidden, "HIDDEN", "Element is absent or not visible."),
    item(ElementState::Enabled, "ENABLED", "Element accepts interaction."),
    item(ElementState::Disabled, "DISABLED", "Element rejects interaction."),
    item(ElementState::Checked, "CHECKED", "Checkbox or radio is selected."),
    item(ElementState::Focused, "FOCUSED", "Element has keyboard focus."),
    item(ElementState::Empty, "EMPTY", "Input has no value or element has no text."),
    item(ElementState::Editable, "EDITABLE", "Element accepts text input."),
];

/// Resolve a state word (ASCII case-insensitive).
pub fn from_str(spelling: &str) -> Option<ElementState> {
    lookup(STATES, spelling)
}
