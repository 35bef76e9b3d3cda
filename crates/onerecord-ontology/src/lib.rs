//! Ontology registry for ONE Record.
//!
//! The registry maps type identifiers to composed variant descriptors and
//! primitive kinds to wire datatype IRIs. It is built once, never mutated,
//! and shared read-only by the decoder and the patch serializer.
//!
//! # Key Types
//!
//! - [`OntologyRegistry`]: Immutable type-id → variant lookup and datatype typing
//! - [`RegistryBuilder`]: Composes variant definitions into flattened shapes
//! - [`VariantDef`] / [`VariantDescriptor`]: Variant as declared / as composed
//! - [`FieldSpec`] / [`FieldKind`]: One predicate of a variant shape
//! - [`DatatypeTable`]: Primitive kind → datatype IRI
//! - [`OntologyConfig`]: TOML-loadable ontology tables

pub mod catalogue;
pub mod config;
pub mod datatype;
pub mod error;
pub mod field;
pub mod registry;
pub mod variant;

pub use catalogue::{cargo_ontology, cargo_variants};
pub use config::OntologyConfig;
pub use datatype::DatatypeTable;
pub use error::{OntologyError, OntologyResult};
pub use field::{FieldKind, FieldSpec};
pub use registry::{OntologyRegistry, RegistryBuilder};
pub use variant::{VariantDef, VariantDescriptor};
