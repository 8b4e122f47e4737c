use std::sync::PoisonError;
use thiserror::Error;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found error
    #[error("User not found: {0}")]
    NotFound(String),

    /// Duplicate key on insert
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    /// Mutex lock error
    #[error("Mutex lock error: {0}")]
    MutexLock(String),

    /// Snapshot encoding or decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot file error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(error: PoisonError<T>) -> Self {
        RepositoryError::MutexLock(error.to_string())
    }
}
