//! Entity-level diff: compare two versions of an entity.
//!
//! Both versions are projected to literal maps first. The diff detects
//! predicate additions, removals, and value replacements; a replacement is
//! emitted as a delete of the old value followed by an add of the new one.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use onerecord_codec::{project_properties, PropertyMap};
use onerecord_types::{Entity, Value};

/// Kind of a pending operation. Deletes order before adds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperationKind {
    Delete,
    Add,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delete => write!(f, "del"),
            Self::Add => write!(f, "add"),
        }
    }
}

/// A pending operation on one predicate, carrying the typed value.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchDraft {
    pub kind: OperationKind,
    pub predicate: String,
    pub value: Value,
}

impl PatchDraft {
    pub fn delete(predicate: impl Into<String>, value: Value) -> Self {
        Self {
            kind: OperationKind::Delete,
            predicate: predicate.into(),
            value,
        }
    }

    pub fn add(predicate: impl Into<String>, value: Value) -> Self {
        Self {
            kind: OperationKind::Add,
            predicate: predicate.into(),
            value,
        }
    }
}

/// The result of comparing two entity versions.
///
/// Drafts are ordered by predicate, then by kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityDiff {
    pub drafts: Vec<PatchDraft>,
}

impl EntityDiff {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no drafts.
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    /// Number of add drafts.
    pub fn additions(&self) -> usize {
        self.count(OperationKind::Add)
    }

    /// Number of delete drafts.
    pub fn deletions(&self) -> usize {
        self.count(OperationKind::Delete)
    }

    /// Number of predicates that are both deleted and added.
    pub fn replacements(&self) -> usize {
        self.drafts
            .windows(2)
            .filter(|pair| {
                pair[0].predicate == pair[1].predicate
                    && pair[0].kind == OperationKind::Delete
                    && pair[1].kind == OperationKind::Add
            })
            .count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatchDraft> {
        self.drafts.iter()
    }

    pub fn into_drafts(self) -> Vec<PatchDraft> {
        self.drafts
    }

    fn count(&self, kind: OperationKind) -> usize {
        self.drafts.iter().filter(|d| d.kind == kind).count()
    }
}

impl IntoIterator for EntityDiff {
    type Item = PatchDraft;
    type IntoIter = std::vec::IntoIter<PatchDraft>;

    fn into_iter(self) -> Self::IntoIter {
        self.drafts.into_iter()
    }
}

impl<'a> IntoIterator for &'a EntityDiff {
    type Item = &'a PatchDraft;
    type IntoIter = std::slice::Iter<'a, PatchDraft>;

    fn into_iter(self) -> Self::IntoIter {
        self.drafts.iter()
    }
}

/// Compute the drafts that turn `before` into `after`.
///
/// Predicates present only in `before` are deleted, predicates present only
/// in `after` are added, and predicates whose projections differ are deleted
/// and re-added. If either version projects to nothing the diff is empty.
/// Identities are not compared.
pub fn diff_entities(before: &Entity, after: &Entity) -> EntityDiff {
    let old = project_properties(before);
    let new = project_properties(after);
    if old.is_empty() || new.is_empty() {
        debug!(
            before = old.len(),
            after = new.len(),
            "empty projection, nothing to diff"
        );
        return EntityDiff::new();
    }

    let mut drafts = Vec::new();

    // Removed predicates.
    for predicate in keys_missing_from(&old, &new) {
        if let Some(value) = before.get(predicate) {
            drafts.push(PatchDraft::delete(predicate, value.clone()));
        }
    }

    // Added predicates.
    for predicate in keys_missing_from(&new, &old) {
        if let Some(value) = after.get(predicate) {
            drafts.push(PatchDraft::add(predicate, value.clone()));
        }
    }

    // Replaced predicates.
    for (predicate, old_val) in &old {
        if new.get(predicate).is_some_and(|new_val| new_val != old_val) {
            if let (Some(was), Some(is)) = (before.get(predicate), after.get(predicate)) {
                drafts.push(PatchDraft::delete(predicate, was.clone()));
                drafts.push(PatchDraft::add(predicate, is.clone()));
            }
        }
    }

    drafts.sort_by(|a, b| (&a.predicate, a.kind).cmp(&(&b.predicate, b.kind)));
    EntityDiff { drafts }
}

fn keys_missing_from<'a>(
    from: &'a PropertyMap,
    other: &'a PropertyMap,
) -> impl Iterator<Item = &'a str> + 'a {
    from.keys()
        .filter(|key| !other.contains_key(*key))
        .map(String::as_str)
}
