use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("no operation could be serialized")]
    NoOperations,

    #[error("target entity has no identity")]
    MissingIdentity,

    #[error("target entity has no type")]
    MissingType,
}

pub type PatchResult<T> = Result<T, PatchError>;
