use tracing::debug;

use onerecord_codec::value_literal;
use onerecord_diff::{diff_entities, PatchDraft};
use onerecord_ontology::OntologyRegistry;
use onerecord_types::vocab::cargo_property;
use onerecord_types::{Entity, EntityRef};

use crate::error::{PatchError, PatchResult};
use crate::request::{Operation, OperationObject, PatchRequest};

/// Revision reported when the target carries none.
pub const DEFAULT_REVISION: &str = "1";

/// Serializes diff drafts into patch operations, typing each value through
/// the ontology registry.
#[derive(Clone, Copy, Debug)]
pub struct PatchSerializer<'r> {
    registry: &'r OntologyRegistry,
}

impl<'r> PatchSerializer<'r> {
    pub fn new(registry: &'r OntologyRegistry) -> Self {
        Self { registry }
    }

    /// Build a patch request from drafts, preserving their order.
    ///
    /// Drafts whose value has no wire datatype are dropped; if nothing is
    /// left the request is refused with [`PatchError::NoOperations`].
    pub fn serialize(
        &self,
        target: EntityRef,
        requestor: impl Into<String>,
        revision: impl Into<String>,
        drafts: &[PatchDraft],
    ) -> PatchResult<PatchRequest> {
        let operations: Vec<Operation> = drafts.iter().filter_map(|d| self.operation(d)).collect();
        if operations.is_empty() {
            return Err(PatchError::NoOperations);
        }
        debug!(
            target = %target,
            operations = operations.len(),
            dropped = drafts.len() - operations.len(),
            "serialized patch request"
        );
        Ok(PatchRequest {
            target,
            requestor: requestor.into(),
            revision: revision.into(),
            description: None,
            operations,
        })
    }

    fn operation(&self, draft: &PatchDraft) -> Option<Operation> {
        let Some(datatype) = self.registry.wire_datatype_of(&draft.value) else {
            debug!(
                predicate = %draft.predicate,
                category = draft.value.category(),
                "dropping draft without wire datatype"
            );
            return None;
        };
        Some(Operation {
            op: draft.kind.into(),
            predicate: draft.predicate.clone(),
            value: OperationObject {
                datatype: datatype.to_string(),
                value: value_literal(&draft.value),
            },
        })
    }
}

/// Diff two versions of a logistics object and serialize the result.
///
/// The target is `before`'s identity and resolved type (its first listed
/// type when none resolves). The revision is read from `before`'s
/// `LogisticsObject#revision`, defaulting to [`DEFAULT_REVISION`].
pub fn generate_patch_request(
    registry: &OntologyRegistry,
    before: &Entity,
    after: &Entity,
    requestor: impl Into<String>,
) -> PatchResult<PatchRequest> {
    let identity = before.identity().ok_or(PatchError::MissingIdentity)?;
    let type_id = registry
        .resolve_variant(before.types())
        .map(|v| v.type_id())
        .or_else(|| before.types().first().map(String::as_str))
        .ok_or(PatchError::MissingType)?;
    let revision = before
        .get(&cargo_property("LogisticsObject", "revision"))
        .and_then(|v| v.as_primitive())
        .map(|p| p.canonical())
        .unwrap_or_else(|| DEFAULT_REVISION.to_string());

    let diff = diff_entities(before, after);
    PatchSerializer::new(registry).serialize(
        EntityRef::new(identity, type_id),
        requestor,
        revision,
        &diff.drafts,
    )
}
