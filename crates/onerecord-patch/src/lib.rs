//! Patch requests for ONE Record.
//!
//! Turns the drafts produced by the diff engine into a Patch Request: each
//! draft becomes an `add` or `del` operation whose object carries the wire
//! datatype and the literal value.
//!
//! # Key Types
//!
//! - [`PatchRequest`] / [`Operation`] / [`OperationObject`]: Wire model
//! - [`PatchSerializer`]: Drafts → operations, using the ontology registry
//! - [`generate_patch_request`]: Diff and serialize two entity versions

pub mod error;
pub mod request;
pub mod serializer;

pub use error::{PatchError, PatchResult};
pub use request::{OpCode, Operation, OperationObject, PatchRequest};
pub use serializer::{generate_patch_request, PatchSerializer, DEFAULT_REVISION};
