//! Error types for document traversal.

use cmskit_model::ModelError;
use thiserror::Error;

/// Result type for traversal operations.
pub type TraverseResult<T> = Result<T, TraverseError>;

/// Errors that can occur while traversing a document.
///
/// A document key with no schema entry is never an error; it is skipped.
#[derive(Debug, Error)]
pub enum TraverseError {
    /// The collection's schema could not be loaded.
    #[error("schema error: {0}")]
    Schema(#[from] ModelError),

    /// A related document could not be looked up.
    #[error("lookup failed for {collection}/{id}: {message}")]
    Lookup {
        collection: String,
        id: String,
        message: String,
    },

    /// A resolver failed for the field at `path`.
    #[error("resolver failed at {path}: {message}")]
    Resolver { path: String, message: String },
}
