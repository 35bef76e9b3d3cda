//! Error types for the ontology crate.

/// Errors raised while building or loading an ontology registry.
#[derive(Debug, thiserror::Error)]
pub enum OntologyError {
    /// Two variants were registered under the same type identifier.
    #[error("duplicate type identifier: {0}")]
    DuplicateType(String),

    /// A variant names a parent that was never registered.
    #[error("variant {type_id} extends unknown parent {parent}")]
    UnknownParent { type_id: String, parent: String },

    /// Following parent links from this variant leads back to it.
    #[error("inheritance cycle through {0}")]
    InheritanceCycle(String),

    /// A single variant declares the same predicate twice.
    #[error("variant {type_id} declares {predicate} more than once")]
    DuplicatePredicate { type_id: String, predicate: String },

    /// An entity-valued field points at an unregistered type.
    #[error("field {predicate} of {type_id} has unknown range {range}")]
    UnknownRange {
        type_id: String,
        predicate: String,
        range: String,
    },

    /// The configuration file could not be parsed.
    #[error("invalid ontology configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for ontology results.
pub type OntologyResult<T> = Result<T, OntologyError>;
