use thiserror::Error;

/// Network-wide error types for the Veritas validation core.
///
/// All variants are recoverable, typed results returned to the caller.
/// Nothing in this core treats an error as fatal to the process, and no
/// operation retries internally.
#[derive(Debug, Error)]
pub enum VeritasError {
    /// Referenced content, validator, or dispute does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A validator with the same identifier is already registered.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The validator has already cast a vote on this content item.
    #[error("Duplicate vote: {0}")]
    DuplicateVote(String),

    /// Operation not valid for the entity's current status.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Storage layer error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration load or parse error.
    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for VeritasError {
    fn from(e: serde_json::Error) -> Self {
        VeritasError::Serialization(e.to_string())
    }
}
