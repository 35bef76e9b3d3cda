//! Foundation types for ONE Record.
//!
//! This crate provides the in-memory data model shared by the ontology
//! registry, the document codec, the diff engine and the patch serializer.
//!
//! # Key Types
//!
//! - [`Entity`]: Ontology graph node with identity, type set and properties
//! - [`Value`]: Closed set of property values (primitive, embedded, link, list)
//! - [`Primitive`] / [`PrimitiveKind`]: Scalar literals and their kinds
//! - [`EntityLink`]: Cross-reference to another top-level entity
//! - [`EntityRef`]: Identity and type of a patch target

pub mod entity;
pub mod error;
pub mod reference;
pub mod temporal;
pub mod value;
pub mod vocab;

pub use entity::Entity;
pub use error::TypeError;
pub use reference::EntityRef;
pub use value::{EntityLink, Primitive, PrimitiveKind, Value};
