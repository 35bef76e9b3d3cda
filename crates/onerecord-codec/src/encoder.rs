use serde_json::{Map, Number, Value as Json};

use onerecord_types::vocab::{ID_KEY, TYPE_KEY};
use onerecord_types::{Entity, Primitive, Value};

/// Render an entity as a JSON-LD document: `@id` when known, `@type` as an
/// array, then one key per property.
pub fn encode(entity: &Entity) -> Json {
    let mut object = Map::new();
    if let Some(id) = entity.identity() {
        object.insert(ID_KEY.to_string(), Json::String(id.to_string()));
    }
    object.insert(
        TYPE_KEY.to_string(),
        Json::Array(entity.types().iter().cloned().map(Json::String).collect()),
    );
    for (predicate, value) in entity.properties() {
        object.insert(predicate.clone(), encode_value(value));
    }
    Json::Object(object)
}

pub fn encode_value(value: &Value) -> Json {
    match value {
        Value::Primitive(p) => encode_primitive(p),
        Value::Entity(e) => encode(e),
        Value::Link(link) => {
            let mut object = Map::new();
            object.insert(ID_KEY.to_string(), Json::String(link.identity.clone()));
            Json::Object(object)
        }
        Value::List(items) => Json::Array(items.iter().map(encode_value).collect()),
    }
}

fn encode_primitive(p: &Primitive) -> Json {
    match p {
        Primitive::String(s) => Json::String(s.clone()),
        Primitive::Boolean(b) => Json::Bool(*b),
        // Non-finite doubles have no JSON number form.
        Primitive::Double(d) => Number::from_f64(*d)
            .map(Json::Number)
            .unwrap_or_else(|| Json::String(p.canonical())),
        Primitive::Integer(i) => Json::Number((*i).into()),
        Primitive::NonNegativeInteger(u) => Json::Number((*u).into()),
        Primitive::Duration(_) | Primitive::DateTime(_) => Json::String(p.canonical()),
    }
}

/// The literal carried by a patch operation: canonical form for primitives,
/// the identity for links, compact JSON-LD for embedded entities and lists.
pub fn value_literal(value: &Value) -> String {
    match value {
        Value::Primitive(p) => p.canonical(),
        Value::Link(link) => link.identity.clone(),
        Value::Entity(_) | Value::List(_) => encode_value(value).to_string(),
    }
}
