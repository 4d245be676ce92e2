use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("Post not found with ID: {0}")]
    NotFound(String),

    #[error("data store failure: {0}")]
    Store(String),

    #[error("stored document is missing required data: {0}")]
    Corrupt(String),

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}
