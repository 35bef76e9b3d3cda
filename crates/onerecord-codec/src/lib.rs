//! JSON-LD codec for ONE Record.
//!
//! Turns wire documents into typed [`Entity`](onerecord_types::Entity) graphs
//! by resolving each `@type` set against an ontology registry, and renders
//! entities back to wire form.
//!
//! # Key Types
//!
//! - [`Decoder`]: Registry-driven polymorphic decoder
//! - [`DecoderConfig`]: Decoder limits
//! - [`PropertyMap`] / [`SerializedValue`]: Literal projection used for diffing
//! - [`encode`] / [`value_literal`]: Entity → wire JSON, value → literal

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod projection;

pub use decoder::{Decoder, DecoderConfig};
pub use encoder::{encode, encode_value, value_literal};
pub use error::{DecodeError, DecodeResult};
pub use projection::{project_properties, project_value, PropertyMap, SerializedValue};
