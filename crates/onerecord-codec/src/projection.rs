//! Literal projection of entity properties.
//!
//! The diff engine never compares typed values directly. It compares their
//! projections, where every primitive is reduced to its canonical literal,
//! so that e.g. two timestamps in different offsets compare equal.

use std::collections::BTreeMap;

use serde_json::{Map, Value as Json};

use onerecord_types::vocab::ID_KEY;
use onerecord_types::{Entity, Value};

/// Predicate → projected value. Identity and types are never included.
pub type PropertyMap = BTreeMap<String, SerializedValue>;

/// A value reduced to comparable literals.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SerializedValue {
    /// Canonical form of a primitive.
    Scalar(String),
    /// Identity of a linked entity.
    Link(String),
    /// Projection of an embedded entity.
    Object(PropertyMap),
    List(Vec<SerializedValue>),
}

impl SerializedValue {
    /// JSON rendering: scalars as strings, links as `{"@id": …}`.
    pub fn to_json(&self) -> Json {
        match self {
            Self::Scalar(s) => Json::String(s.clone()),
            Self::Link(id) => Json::Object(Map::from_iter([(ID_KEY.to_string(), Json::String(id.clone()))])),
            Self::Object(map) => map_to_json(map),
            Self::List(items) => Json::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

/// Project every property of an entity.
pub fn project_properties(entity: &Entity) -> PropertyMap {
    entity
        .properties()
        .iter()
        .map(|(predicate, value)| (predicate.clone(), project_value(value)))
        .collect()
}

pub fn project_value(value: &Value) -> SerializedValue {
    match value {
        Value::Primitive(p) => SerializedValue::Scalar(p.canonical()),
        Value::Entity(e) => SerializedValue::Object(project_properties(e)),
        Value::Link(link) => SerializedValue::Link(link.identity.clone()),
        Value::List(items) => SerializedValue::List(items.iter().map(project_value).collect()),
    }
}

/// JSON rendering of a whole projection.
pub fn map_to_json(map: &PropertyMap) -> Json {
    Json::Object(
        map.iter()
            .map(|(predicate, value)| (predicate.clone(), value.to_json()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Utc};
    use onerecord_types::EntityLink;
    use serde_json::json;

    fn weight(value: f64) -> Entity {
        Entity::new(["https://onerecord.iata.org/Value"])
            .with_identity("_:1957521880")
            .with_property("https://onerecord.iata.org/Value#unit", "KGM")
            .unwrap()
            .with_property("https://onerecord.iata.org/Value#value", value)
            .unwrap()
    }

    #[test]
    fn excludes_identity_and_types_at_every_level() {
        let piece = Entity::new(["https://onerecord.iata.org/Piece"])
            .with_identity("piece-1")
            .with_property("https://onerecord.iata.org/Piece#grossWeight", weight(3.922))
            .unwrap();

        let projected = project_properties(&piece);
        assert_eq!(projected.len(), 1);
        let SerializedValue::Object(inner) = &projected["https://onerecord.iata.org/Piece#grossWeight"] else {
            panic!("embedded entity should project to an object");
        };
        assert_eq!(inner.len(), 2);
        assert_eq!(
            inner["https://onerecord.iata.org/Value#value"],
            SerializedValue::Scalar("3.922".into())
        );
    }

    #[test]
    fn identity_of_embedded_entity_does_not_matter() {
        let a = weight(4.0);
        let b = weight(4.0).with_identity("_:other");
        assert_eq!(project_properties(&a), project_properties(&b));
        assert_ne!(project_properties(&a), project_properties(&weight(3.922)));
    }

    #[test]
    fn equal_instants_project_equally() {
        let utc = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let cest = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(project_value(&Value::from(utc)), project_value(&Value::from(cest)));
        assert_eq!(
            project_value(&Value::from(utc)),
            SerializedValue::Scalar("2024-05-01T10:00:00Z".into())
        );
    }

    #[test]
    fn links_and_lists() {
        let value = Value::List(vec![
            EntityLink::new("http://x/shipment-1", "https://onerecord.iata.org/Shipment").into(),
            Value::from(4.0),
        ]);
        let projected = project_value(&value);
        assert_eq!(
            projected,
            SerializedValue::List(vec![
                SerializedValue::Link("http://x/shipment-1".into()),
                SerializedValue::Scalar("4.0".into()),
            ])
        );
        assert_eq!(projected.to_json(), json!([{"@id": "http://x/shipment-1"}, "4.0"]));
    }
}
