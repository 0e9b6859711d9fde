//! Annotation vocabulary (`@serial`, `@skip`, `@only`, `@slow`, `@fixme`).
//!
//! Any `@word` that is not registered here is a free-form tag.
//!
//! ## Examples
//! ```rust
//! use vero_core::lang::annotations::{self, Annotation};
//!
//! assert_eq!(annotations::from_str("skip"), Some(Annotation::Skip));
//! assert!(annotations::applies_to_feature(Annotation::Serial));
//! assert!(!annotations::applies_to_feature(Annotation::Slow));
//! assert_eq!(annotations::from_str("smoke"), None);
//! ```

use serde::Serialize;

use super::registry::{LangItemInfo, item, lookup};

/// Closed set of execution annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Annotation {
    Serial,
    Skip,
    Only,
    Slow,
    Fixme,
}

/// Metadata entry for an annotation.
pub type AnnotationInfo = LangItemInfo<Annotation>;

/// Registry of annotations.
pub const ANNOTATIONS: &[AnnotationInfo] = &[
    item(Annotation::Serial, "serial", "Run the feature's scenarios one after another."),
    item(Annotation::Skip, "skip", "Do not run."),
    item(Annotation::Only, "only", "Run only annotated items."),
    item(Annotation::Slow, "slow", "Triple the default timeout."),
    item(Annotation::Fixme, "fixme", "Known broken; skipped and reported."),
];

/// Resolve an annotation name (without the `@`).
pub fn from_str(spelling: &str) -> Option<Annotation> {
    lookup(ANNOTATIONS, spelling)
}

/// Return `true` if the annotation may prefix a `FEATURE` declaration.
pub fn applies_to_feature(annotation: Annotation) -> bool {
    matches!(annotation, Annotation::Serial | Annotation::Skip | Annotation::Only)
}
