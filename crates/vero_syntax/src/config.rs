//! Parser configuration.
//!
//! Both limits exist so that adversarial input (thousands of `FIRST FIRST FIRST ...` modifiers,
//! deeply nested `IF` blocks) terminates quickly with a diagnostic instead of exhausting the
//! stack.

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of modifiers read after one selector
    pub max_selector_modifiers: usize,
    /// Maximum depth of nested blocks and nested `HAS` selectors
    pub max_nesting_depth: usize,
}

impl ParserConfig {
    pub const DEFAULT_MAX_SELECTOR_MODIFIERS: usize = 20;
    pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the modifier cap
    pub fn with_max_selector_modifiers(mut self, max: usize) -> Self {
        self.max_selector_modifiers = max;
        self
    }

    /// Set the nesting cap
    pub fn with_max_nesting_depth(mut self, max: usize) -> Self {
        self.max_nesting_depth = max;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_selector_modifiers: Self::DEFAULT_MAX_SELECTOR_MODIFIERS,
            max_nesting_depth: Self::DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}
