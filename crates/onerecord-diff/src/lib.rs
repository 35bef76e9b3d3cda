//! Diff engine for ONE Record.
//!
//! Compares two versions of an entity through their literal projections and
//! produces the ordered delete/add drafts a patch request is built from.
//!
//! # Key Types
//!
//! - [`EntityDiff`] / [`PatchDraft`]: Ordered list of pending operations
//! - [`OperationKind`]: Delete or add; deletes sort first

pub mod entity_diff;

pub use entity_diff::{diff_entities, EntityDiff, OperationKind, PatchDraft};
