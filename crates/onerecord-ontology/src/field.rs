use serde::{Deserialize, Serialize};

use onerecord_types::PrimitiveKind;

/// What a predicate holds.
///
/// In TOML this is written as `kind = { primitive = "double" }` or
/// `kind = { entity = "https://onerecord.iata.org/Value" }`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A scalar literal of the given kind.
    Primitive(PrimitiveKind),
    /// An embedded or linked entity whose declared range is the given type.
    Entity(String),
}

impl FieldKind {
    /// The declared range type, for entity-valued fields.
    pub fn range(&self) -> Option<&str> {
        match self {
            Self::Entity(range) => Some(range),
            Self::Primitive(_) => None,
        }
    }
}

/// One predicate of a variant shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub predicate: String,
    pub kind: FieldKind,
    /// The predicate holds an ordered list rather than a single value.
    #[serde(default)]
    pub many: bool,
    /// Decoding fails when the predicate is absent.
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    /// An optional single-valued field.
    pub fn new(predicate: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            predicate: predicate.into(),
            kind,
            many: false,
            required: false,
        }
    }

    pub fn primitive(predicate: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self::new(predicate, FieldKind::Primitive(kind))
    }

    pub fn entity(predicate: impl Into<String>, range: impl Into<String>) -> Self {
        Self::new(predicate, FieldKind::Entity(range.into()))
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as list-valued.
    pub fn many(mut self) -> Self {
        self.many = true;
        self
    }
}
