use thiserror::Error;

use onerecord_types::TypeError;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("document has no @type")]
    MissingType,

    #[error("no registered variant for types {types:?}")]
    UnknownType { types: Vec<String> },

    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    #[error("type mismatch at {predicate}: expected {expected}")]
    TypeMismatch { predicate: String, expected: String },

    #[error("nesting deeper than {0} levels")]
    DepthExceeded(usize),

    #[error("invalid entity: {0}")]
    Type(#[from] TypeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DecodeError {
    pub(crate) fn mismatch(predicate: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::TypeMismatch {
            predicate: predicate.into(),
            expected: expected.into(),
        }
    }
}

pub type DecodeResult<T> = Result<T, DecodeError>;
