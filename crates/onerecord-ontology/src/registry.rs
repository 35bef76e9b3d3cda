//! The immutable ontology registry and its builder.
//!
//! Resolution walks variants most-specialised first (deepest ancestor chain),
//! ties broken by registration order, and returns the first non-abstract
//! variant whose type identifier appears in the input set. The input order
//! of the type set never matters.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use onerecord_types::Value;

use crate::datatype::DatatypeTable;
use crate::error::{OntologyError, OntologyResult};
use crate::field::FieldKind;
use crate::variant::{VariantDef, VariantDescriptor};

/// Read-only mapping from type identifiers to composed variants, and from
/// values to wire datatypes.
#[derive(Clone, Debug)]
pub struct OntologyRegistry {
    variants: Vec<VariantDescriptor>,
    by_type: HashMap<String, usize>,
    resolution_order: Vec<usize>,
    datatypes: DatatypeTable,
}

impl OntologyRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Resolve a type set to its most specific registered variant.
    pub fn resolve_variant<S: AsRef<str>>(&self, types: &[S]) -> Option<&VariantDescriptor> {
        self.resolution_order
            .iter()
            .map(|&idx| &self.variants[idx])
            .find(|v| types.iter().any(|t| t.as_ref() == v.type_id))
    }

    /// Look up a variant by exact type identifier, abstract ones included.
    pub fn variant(&self, type_id: &str) -> Option<&VariantDescriptor> {
        self.by_type.get(type_id).map(|&idx| &self.variants[idx])
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.by_type.contains_key(type_id)
    }

    /// Variants in registration order.
    pub fn variants(&self) -> impl Iterator<Item = &VariantDescriptor> {
        self.variants.iter()
    }

    /// Resolvable variants in the order resolution tries them.
    pub fn resolution_order(&self) -> impl Iterator<Item = &VariantDescriptor> {
        self.resolution_order.iter().map(|&idx| &self.variants[idx])
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn datatypes(&self) -> &DatatypeTable {
        &self.datatypes
    }

    /// Wire datatype identifier for a value.
    ///
    /// Primitives map through the datatype table, embedded entities to their
    /// resolved variant, links to their (registered) declared range, and
    /// lists to the datatype shared by every element. Empty or mixed lists,
    /// unresolvable entities and unregistered link ranges yield `None`.
    pub fn wire_datatype_of(&self, value: &Value) -> Option<&str> {
        match value {
            Value::Primitive(p) => self.datatypes.iri(p.kind()),
            Value::Entity(e) => self.resolve_variant(e.types()).map(|v| v.type_id()),
            Value::Link(link) => self.variant(&link.type_id).map(|v| v.type_id()),
            Value::List(items) => {
                let (first, rest) = items.split_first()?;
                let datatype = self.wire_datatype_of(first)?;
                rest.iter()
                    .all(|item| self.wire_datatype_of(item) == Some(datatype))
                    .then_some(datatype)
            }
        }
    }
}

/// Collects variant definitions and composes them into a registry.
#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
    defs: Vec<VariantDef>,
    datatypes: DatatypeTable,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variant definition.
    pub fn variant(mut self, def: VariantDef) -> Self {
        self.defs.push(def);
        self
    }

    pub fn variants(mut self, defs: impl IntoIterator<Item = VariantDef>) -> Self {
        self.defs.extend(defs);
        self
    }

    /// Replace the datatype table (XSD by default).
    pub fn datatypes(mut self, table: DatatypeTable) -> Self {
        self.datatypes = table;
        self
    }

    pub fn datatypes_mut(&mut self) -> &mut DatatypeTable {
        &mut self.datatypes
    }

    /// Compose all definitions into flattened descriptors.
    pub fn build(self) -> OntologyResult<OntologyRegistry> {
        let mut by_type = HashMap::with_capacity(self.defs.len());
        for (idx, def) in self.defs.iter().enumerate() {
            if by_type.insert(def.type_id.clone(), idx).is_some() {
                return Err(OntologyError::DuplicateType(def.type_id.clone()));
            }
            let mut seen = HashSet::new();
            for field in &def.fields {
                if !seen.insert(field.predicate.as_str()) {
                    return Err(OntologyError::DuplicatePredicate {
                        type_id: def.type_id.clone(),
                        predicate: field.predicate.clone(),
                    });
                }
            }
        }

        let mut variants = Vec::with_capacity(self.defs.len());
        for def in &self.defs {
            let ancestors = ancestor_chain(def, &self.defs, &by_type)?;

            // Root ancestor first so nearer definitions override.
            let mut fields = BTreeMap::new();
            for ancestor in ancestors.iter().rev() {
                let ancestor_def = &self.defs[by_type[ancestor.as_str()]];
                for field in &ancestor_def.fields {
                    fields.insert(field.predicate.clone(), field.clone());
                }
            }
            for field in &def.fields {
                fields.insert(field.predicate.clone(), field.clone());
            }

            variants.push(VariantDescriptor {
                type_id: def.type_id.clone(),
                name: def.name.clone(),
                is_abstract: def.is_abstract,
                ancestors,
                fields,
            });
        }

        for variant in &variants {
            for field in variant.fields() {
                if let FieldKind::Entity(range) = &field.kind {
                    if !by_type.contains_key(range) {
                        return Err(OntologyError::UnknownRange {
                            type_id: variant.type_id.clone(),
                            predicate: field.predicate.clone(),
                            range: range.clone(),
                        });
                    }
                }
            }
        }

        let mut resolution_order: Vec<usize> = (0..variants.len())
            .filter(|&idx| !variants[idx].is_abstract)
            .collect();
        // Stable sort keeps registration order among equal depths.
        resolution_order.sort_by(|&a, &b| variants[b].depth().cmp(&variants[a].depth()));

        debug!(
            variants = variants.len(),
            resolvable = resolution_order.len(),
            "ontology registry built"
        );

        Ok(OntologyRegistry {
            variants,
            by_type,
            resolution_order,
            datatypes: self.datatypes,
        })
    }
}

fn ancestor_chain(
    def: &VariantDef,
    defs: &[VariantDef],
    by_type: &HashMap<String, usize>,
) -> OntologyResult<Vec<String>> {
    let mut chain = Vec::new();
    let mut current = def;
    while let Some(parent) = &current.parent {
        let idx = *by_type
            .get(parent)
            .ok_or_else(|| OntologyError::UnknownParent {
                type_id: current.type_id.clone(),
                parent: parent.clone(),
            })?;
        if parent == &def.type_id || chain.len() >= defs.len() {
            return Err(OntologyError::InheritanceCycle(def.type_id.clone()));
        }
        chain.push(parent.clone());
        current = &defs[idx];
    }
    Ok(chain)
}
