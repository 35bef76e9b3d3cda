use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use tracing::{debug, trace, warn};

use onerecord_ontology::{FieldKind, FieldSpec, OntologyRegistry, VariantDescriptor};
use onerecord_types::temporal::{parse_datetime, parse_duration};
use onerecord_types::vocab::{is_reserved_key, ID_KEY, TYPE_KEY, VALUE_KEY};
use onerecord_types::{Entity, EntityLink, Primitive, PrimitiveKind, Value};

use crate::error::{DecodeError, DecodeResult};

/// Default bound on embedded-entity nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Decoder limits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Decodes JSON-LD documents into entities of their most specific
/// registered variant.
///
/// A document whose `@type` set resolves to nothing is not an error:
/// [`Decoder::decode`] returns `Ok(None)` so callers can skip types they
/// do not understand. Use [`Decoder::decode_strict`] to treat it as one.
#[derive(Clone, Debug)]
pub struct Decoder<'r> {
    registry: &'r OntologyRegistry,
    config: DecoderConfig,
}

impl<'r> Decoder<'r> {
    pub fn new(registry: &'r OntologyRegistry) -> Self {
        Self::with_config(registry, DecoderConfig::default())
    }

    pub fn with_config(registry: &'r OntologyRegistry, config: DecoderConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &'r OntologyRegistry {
        self.registry
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode one document. `Ok(None)` when its types are not registered.
    pub fn decode(&self, document: &Json) -> DecodeResult<Option<Entity>> {
        self.decode_document(document, 0)
    }

    /// Decode one document, failing on unregistered types.
    pub fn decode_strict(&self, document: &Json) -> DecodeResult<Entity> {
        match self.decode(document)? {
            Some(entity) => Ok(entity),
            None => Err(DecodeError::UnknownType {
                types: read_types(as_object(document)?)?,
            }),
        }
    }

    /// Decode a batch, skipping documents that are of unknown type or fail
    /// to decode. Survivors keep their relative order.
    pub fn decode_many(&self, documents: &[Json]) -> Vec<Entity> {
        let mut entities = Vec::with_capacity(documents.len());
        for (index, document) in documents.iter().enumerate() {
            match self.decode(document) {
                Ok(Some(entity)) => entities.push(entity),
                Ok(None) => debug!(index, "skipping document of unknown type"),
                Err(e) => warn!(index, error = %e, "skipping undecodable document"),
            }
        }
        entities
    }

    /// Parse and decode one document.
    pub fn decode_str(&self, input: &str) -> DecodeResult<Option<Entity>> {
        let document: Json = serde_json::from_str(input)?;
        self.decode(&document)
    }

    /// Parse and decode a JSON array of documents (a single object is
    /// accepted as a batch of one).
    pub fn decode_many_str(&self, input: &str) -> DecodeResult<Vec<Entity>> {
        let document: Json = serde_json::from_str(input)?;
        Ok(match document {
            Json::Array(documents) => self.decode_many(&documents),
            other => self.decode_many(std::slice::from_ref(&other)),
        })
    }

    fn decode_document(&self, document: &Json, depth: usize) -> DecodeResult<Option<Entity>> {
        let object = as_object(document)?;
        let types = read_types(object)?;
        match self.registry.resolve_variant(&types) {
            Some(variant) => self.decode_as(object, types, variant, depth).map(Some),
            None => {
                debug!(types = ?types, "no registered variant");
                Ok(None)
            }
        }
    }

    fn decode_as(
        &self,
        object: &Map<String, Json>,
        types: Vec<String>,
        variant: &VariantDescriptor,
        depth: usize,
    ) -> DecodeResult<Entity> {
        if depth > self.config.max_depth {
            return Err(DecodeError::DepthExceeded(self.config.max_depth));
        }

        let mut entity = Entity::new(types);
        match object.get(ID_KEY) {
            None | Some(Json::Null) => {}
            Some(Json::String(id)) => entity.set_identity(Some(id.clone())),
            Some(_) => return Err(DecodeError::mismatch(ID_KEY, "string")),
        }

        for key in object.keys() {
            if !is_reserved_key(key) && !variant.knows(key) {
                trace!(variant = variant.name(), predicate = %key, "ignoring unknown predicate");
            }
        }

        for field in variant.fields() {
            let decoded = match object.get(&field.predicate) {
                None | Some(Json::Null) => None,
                Some(raw) => self.decode_field(field, raw, depth)?,
            };
            let missing = match &decoded {
                None => true,
                Some(Value::List(items)) => items.is_empty(),
                Some(_) => false,
            };
            if missing && field.required {
                return Err(DecodeError::MissingRequiredField(field.predicate.clone()));
            }
            if let Some(value) = decoded {
                entity.set(field.predicate.as_str(), value)?;
            }
        }
        Ok(entity)
    }

    fn decode_field(&self, field: &FieldSpec, raw: &Json, depth: usize) -> DecodeResult<Option<Value>> {
        if !field.many {
            if raw.is_array() {
                return Err(DecodeError::mismatch(&field.predicate, "single value"));
            }
            return self.decode_single(field, raw, depth);
        }

        let items = match raw {
            Json::Array(items) => items.as_slice(),
            single => std::slice::from_ref(single),
        };
        let mut values = Vec::with_capacity(items.len());
        for item in items.iter().filter(|item| !item.is_null()) {
            match self.decode_single(field, item, depth)? {
                Some(value) => values.push(value),
                None => debug!(predicate = %field.predicate, "dropping unresolved list element"),
            }
        }
        if values.is_empty() && !items.is_empty() {
            return Ok(None);
        }
        Ok(Some(Value::List(values)))
    }

    fn decode_single(&self, field: &FieldSpec, raw: &Json, depth: usize) -> DecodeResult<Option<Value>> {
        match &field.kind {
            FieldKind::Primitive(kind) => coerce_primitive(*kind, raw)
                .map(|p| Some(Value::Primitive(p)))
                .ok_or_else(|| DecodeError::mismatch(&field.predicate, kind.name())),
            FieldKind::Entity(range) => self.decode_nested(&field.predicate, range, raw, depth),
        }
    }

    fn decode_nested(
        &self,
        predicate: &str,
        range: &str,
        raw: &Json,
        depth: usize,
    ) -> DecodeResult<Option<Value>> {
        let object = match raw {
            Json::String(id) => return Ok(Some(EntityLink::new(id.as_str(), range).into())),
            Json::Object(object) => object,
            _ => return Err(DecodeError::mismatch(predicate, "entity")),
        };

        if object.contains_key(TYPE_KEY) {
            let nested = self.decode_document(raw, depth + 1)?;
            if nested.is_none() {
                debug!(predicate, "dropping embedded entity of unknown type");
            }
            return Ok(nested.map(Value::from));
        }

        if object.len() == 1 {
            if let Some(id) = object.get(ID_KEY) {
                let id = id
                    .as_str()
                    .ok_or_else(|| DecodeError::mismatch(ID_KEY, "string"))?;
                return Ok(Some(EntityLink::new(id, range).into()));
            }
        }

        // Untyped embedded object: read it as the declared range.
        match self.registry.variant(range).filter(|v| !v.is_abstract()) {
            Some(variant) => {
                let entity = self.decode_as(object, vec![range.to_string()], variant, depth + 1)?;
                Ok(Some(entity.into()))
            }
            None => {
                debug!(predicate, range, "dropping untyped object of abstract range");
                Ok(None)
            }
        }
    }
}

fn as_object(document: &Json) -> DecodeResult<&Map<String, Json>> {
    document
        .as_object()
        .ok_or_else(|| DecodeError::mismatch("@document", "object"))
}

fn read_types(object: &Map<String, Json>) -> DecodeResult<Vec<String>> {
    let types = match object.get(TYPE_KEY) {
        None | Some(Json::Null) => return Err(DecodeError::MissingType),
        Some(Json::String(t)) => vec![t.clone()],
        Some(Json::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| DecodeError::mismatch(TYPE_KEY, "string"))
            })
            .collect::<DecodeResult<Vec<_>>>()?,
        Some(_) => return Err(DecodeError::mismatch(TYPE_KEY, "string or array of strings")),
    };
    if types.is_empty() {
        return Err(DecodeError::MissingType);
    }
    Ok(types)
}

fn coerce_primitive(kind: PrimitiveKind, raw: &Json) -> Option<Primitive> {
    if let Some(inner) = raw.as_object().and_then(|o| o.get(VALUE_KEY)) {
        return coerce_primitive(kind, inner);
    }
    match (kind, raw) {
        (PrimitiveKind::String, Json::String(s)) => Some(Primitive::String(s.clone())),
        (PrimitiveKind::String, Json::Number(n)) => Some(Primitive::String(n.to_string())),
        (PrimitiveKind::String, Json::Bool(b)) => Some(Primitive::String(b.to_string())),

        (PrimitiveKind::Boolean, Json::Bool(b)) => Some(Primitive::Boolean(*b)),
        (PrimitiveKind::Boolean, Json::String(s)) => s.trim().parse().ok().map(Primitive::Boolean),

        (PrimitiveKind::Double, Json::Number(n)) => n.as_f64().map(Primitive::Double),
        (PrimitiveKind::Double, Json::String(s)) => s.trim().parse().ok().map(Primitive::Double),

        (PrimitiveKind::Integer, Json::Number(n)) => n.as_i64().map(Primitive::Integer),
        (PrimitiveKind::Integer, Json::String(s)) => s.trim().parse().ok().map(Primitive::Integer),

        (PrimitiveKind::NonNegativeInteger, Json::Number(n)) => {
            n.as_u64().map(Primitive::NonNegativeInteger)
        }
        (PrimitiveKind::NonNegativeInteger, Json::String(s)) => {
            s.trim().parse().ok().map(Primitive::NonNegativeInteger)
        }

        (PrimitiveKind::Duration, Json::String(s)) => parse_duration(s).ok().map(Primitive::Duration),
        (PrimitiveKind::DateTime, Json::String(s)) => parse_datetime(s).ok().map(Primitive::DateTime),
        _ => None,
    }
}
