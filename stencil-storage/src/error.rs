//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No template matched the lookup.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Summary search pattern is not a valid regular expression.
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A writer panicked while holding the store lock.
    #[error("template store lock poisoned")]
    Poisoned,

    /// Backend-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}
