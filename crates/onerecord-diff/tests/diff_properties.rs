//! Property-based tests for the entity diff engine.
//!
//! - Ordering: drafts are sorted by (predicate, kind)
//! - Empty diff: an entity compared with itself yields nothing
//! - Replacement decomposition: a changed predicate is exactly one delete then one add
//! - Applying the drafts to `before` reproduces the projection of `after`

use std::collections::BTreeMap;

use onerecord_codec::project_properties;
use onerecord_diff::{diff_entities, OperationKind};
use onerecord_types::{Entity, Value};
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

const PREDICATES: [&str; 6] = [
    "https://onerecord.iata.org/Piece#coload",
    "https://onerecord.iata.org/Piece#goodsDescription",
    "https://onerecord.iata.org/Piece#loadType",
    "https://onerecord.iata.org/Piece#slac",
    "https://onerecord.iata.org/Piece#upid",
    "https://onerecord.iata.org/Piece#shippingMarks",
];

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-c]{0,2}".prop_map(Value::from),
        (0i64..4).prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        prop::collection::vec("[a-b]{1}".prop_map(Value::from), 0..3).prop_map(Value::List),
    ]
}

fn entity_strategy() -> impl Strategy<Value = Entity> {
    prop::collection::btree_map(0usize..PREDICATES.len(), value_strategy(), 1..PREDICATES.len()).prop_map(
        |props| {
            let mut entity = Entity::new(["https://onerecord.iata.org/Piece"]);
            for (idx, value) in props {
                entity.set(PREDICATES[idx], value).unwrap();
            }
            entity
        },
    )
}

fn apply(before: &Entity, after: &Entity) -> Entity {
    let mut patched = before.clone();
    for draft in diff_entities(before, after) {
        match draft.kind {
            OperationKind::Delete => {
                patched.remove(&draft.predicate);
            }
            OperationKind::Add => {
                patched.set(draft.predicate, draft.value).unwrap();
            }
        }
    }
    patched
}

// =============================================================================
// DIFF PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn drafts_are_sorted(before in entity_strategy(), after in entity_strategy()) {
        let diff = diff_entities(&before, &after);
        let keys: Vec<_> = diff.iter().map(|d| (d.predicate.clone(), d.kind)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(keys, sorted);
    }

    #[test]
    fn self_diff_is_empty(entity in entity_strategy()) {
        prop_assert!(diff_entities(&entity, &entity).is_empty());
    }

    #[test]
    fn replacements_decompose(before in entity_strategy(), after in entity_strategy()) {
        let diff = diff_entities(&before, &after);
        let mut per_predicate: BTreeMap<&str, Vec<OperationKind>> = BTreeMap::new();
        for draft in &diff {
            per_predicate.entry(draft.predicate.as_str()).or_default().push(draft.kind);
        }
        for (predicate, kinds) in per_predicate {
            match (before.get(predicate), after.get(predicate)) {
                (Some(_), Some(_)) => prop_assert_eq!(kinds, vec![OperationKind::Delete, OperationKind::Add]),
                (Some(_), None) => prop_assert_eq!(kinds, vec![OperationKind::Delete]),
                (None, Some(_)) => prop_assert_eq!(kinds, vec![OperationKind::Add]),
                (None, None) => prop_assert!(false, "draft for absent predicate {}", predicate),
            }
        }
        prop_assert_eq!(diff.len(), diff.additions() + diff.deletions());
    }

    #[test]
    fn applying_drafts_reaches_after(before in entity_strategy(), after in entity_strategy()) {
        let patched = apply(&before, &after);
        prop_assert_eq!(project_properties(&patched), project_properties(&after));
    }
}
