//! Symbolic operator vocabulary.
//!
//! Vero only has assignment and comparison operators; the word operators (`AND`, `OR`, `NOT`,
//! `IN`, `IS`, `CONTAINS`, ...) are reserved keywords and live in [`crate::lang::keywords`].
//!
//! ## Examples
//! ```rust
//! use vero_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str(">="), Some(OperatorId::GtEq));
//! assert!(operators::is_comparison(OperatorId::NotEq));
//! assert!(!operators::is_comparison(OperatorId::Assign));
//! ```

/// Stable identifier for symbolic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    /// `=`: assignment in declarations, equality inside data conditions.
    Assign,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    GtEq,
    /// `<=`
    LtEq,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub is_comparison: bool,
}

/// Registry of all symbolic operators.
pub const OPERATORS: &[OperatorInfo] = &[
    op(OperatorId::Assign, "=", false),
    op(OperatorId::EqEq, "==", true),
    op(OperatorId::NotEq, "!=", true),
    op(OperatorId::Gt, ">", true),
    op(OperatorId::Lt, "<", true),
    op(OperatorId::GtEq, ">=", true),
    op(OperatorId::LtEq, "<=", true),
];

/// Return the metadata entry for an operator.
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS
        .iter()
        .find(|o| o.id == id)
        .expect("INVARIANT: every OperatorId has an OPERATORS entry")
}

/// Return the spelling of an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Return `true` for the relational operators (`==`, `!=`, `>`, `<`, `>=`, `<=`).
pub fn is_comparison(id: OperatorId) -> bool {
    info_for(id).is_comparison
}

/// Resolve a spelling to an operator id.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

const fn op(id: OperatorId, spelling: &'static str, is_comparison: bool) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        is_comparison,
    }
}
