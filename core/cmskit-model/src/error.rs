//! Error types for the schema model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while reading site configuration.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No collection or global is registered under this slug.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    /// Config JSON could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
