use std::collections::BTreeMap;

use crate::error::TypeError;
use crate::value::Value;
use crate::vocab::{is_reserved_key, BLANK_NODE_PREFIX};

/// A node of the ontology graph.
///
/// Identity and types are first-class attributes; `properties` only ever
/// holds diffable predicates. The `@id`/`@type` keys are rejected by
/// [`Entity::set`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entity {
    identity: Option<String>,
    types: Vec<String>,
    properties: BTreeMap<String, Value>,
}

impl Entity {
    /// Create an entity carrying the given type identifiers.
    ///
    /// Order is preserved and duplicates are dropped.
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entity = Self::default();
        for t in types {
            entity.add_type(t);
        }
        entity
    }

    /// Builder-style identity setter.
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Builder-style property setter.
    pub fn with_property(
        mut self,
        predicate: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, TypeError> {
        self.set(predicate, value)?;
        Ok(self)
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn set_identity(&mut self, identity: Option<String>) {
        self.identity = identity;
    }

    /// Returns `true` if the identity is a server-assigned blank node (`_:…`).
    pub fn is_blank_node(&self) -> bool {
        self.identity
            .as_deref()
            .is_some_and(|id| id.starts_with(BLANK_NODE_PREFIX))
    }

    /// Type identifiers in insertion order.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn has_type(&self, type_id: &str) -> bool {
        self.types.iter().any(|t| t == type_id)
    }

    /// Add a type identifier if not already present.
    pub fn add_type(&mut self, type_id: impl Into<String>) {
        let type_id = type_id.into();
        if !self.has_type(&type_id) {
            self.types.push(type_id);
        }
    }

    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }

    pub fn get(&self, predicate: &str) -> Option<&Value> {
        self.properties.get(predicate)
    }

    pub fn get_mut(&mut self, predicate: &str) -> Option<&mut Value> {
        self.properties.get_mut(predicate)
    }

    pub fn contains(&self, predicate: &str) -> bool {
        self.properties.contains_key(predicate)
    }

    /// Set a property, returning the previous value.
    pub fn set(
        &mut self,
        predicate: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, TypeError> {
        let predicate = predicate.into();
        if is_reserved_key(&predicate) {
            return Err(TypeError::ReservedPredicate(predicate));
        }
        Ok(self.properties.insert(predicate, value.into()))
    }

    /// Remove a property, returning its value.
    pub fn remove(&mut self, predicate: &str) -> Option<Value> {
        self.properties.remove(predicate)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` if the entity has no properties.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Primitive;

    const PIECE: &str = "https://onerecord.iata.org/Piece";
    const LO: &str = "https://onerecord.iata.org/LogisticsObject";
    const UPID: &str = "https://onerecord.iata.org/Piece#upid";

    #[test]
    fn types_are_an_ordered_set() {
        let e = Entity::new([PIECE, LO, PIECE]);
        assert_eq!(e.types(), &[PIECE.to_string(), LO.to_string()]);
        assert!(e.has_type(LO));
        assert!(!e.has_type("https://onerecord.iata.org/Shipment"));
    }

    #[test]
    fn reserved_keys_rejected() {
        let mut e = Entity::new([PIECE]);
        assert_eq!(
            e.set("@id", "x"),
            Err(TypeError::ReservedPredicate("@id".into()))
        );
        assert_eq!(
            e.set("@type", "x"),
            Err(TypeError::ReservedPredicate("@type".into()))
        );
        assert!(e.is_empty());
    }

    #[test]
    fn property_proxies() {
        let mut e = Entity::new([PIECE])
            .with_identity("http://localhost:8080/companies/c/los/piece-1")
            .with_property(UPID, "4711-1337-1")
            .unwrap();
        assert_eq!(e.len(), 1);
        assert!(e.contains(UPID));

        let previous = e.set(UPID, "4711-1337-2").unwrap();
        assert_eq!(previous, Some(Value::from("4711-1337-1")));

        if let Some(Value::Primitive(Primitive::String(s))) = e.get_mut(UPID) {
            s.push('b');
        }
        assert_eq!(e.get(UPID), Some(&Value::from("4711-1337-2b")));

        assert!(e.remove(UPID).is_some());
        assert!(e.is_empty());
    }

    #[test]
    fn blank_node_detection() {
        assert!(Entity::new([PIECE]).with_identity("_:1957521880").is_blank_node());
        assert!(!Entity::new([PIECE]).with_identity("http://x/1").is_blank_node());
        assert!(!Entity::new([PIECE]).is_blank_node());
    }
}
