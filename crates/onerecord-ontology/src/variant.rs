use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldSpec;

/// A variant as declared: its own fields plus an optional parent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDef {
    pub type_id: String,
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    /// Abstract variants lend their fields to descendants but never resolve.
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl VariantDef {
    pub fn new(type_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            name: name.into(),
            parent: None,
            is_abstract: false,
            fields: Vec::new(),
        }
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn abstract_variant(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }
}

/// A variant after composition: the full, flattened predicate set of the
/// variant and all of its ancestors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantDescriptor {
    pub(crate) type_id: String,
    pub(crate) name: String,
    pub(crate) is_abstract: bool,
    /// Nearest ancestor first.
    pub(crate) ancestors: Vec<String>,
    pub(crate) fields: BTreeMap<String, FieldSpec>,
}

impl VariantDescriptor {
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Ancestor type identifiers, nearest first.
    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    /// Number of ancestors; 0 for a root variant.
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Returns `true` if this variant is `type_id` or specialises it.
    pub fn specializes(&self, type_id: &str) -> bool {
        self.type_id == type_id || self.ancestors.iter().any(|a| a == type_id)
    }

    /// All fields, ordered by predicate.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values()
    }

    pub fn field(&self, predicate: &str) -> Option<&FieldSpec> {
        self.fields.get(predicate)
    }

    /// Returns `true` if the predicate belongs to this shape.
    pub fn knows(&self, predicate: &str) -> bool {
        self.fields.contains_key(predicate)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values().filter(|f| f.required)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
