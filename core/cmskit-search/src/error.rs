//! Search error types.
//!
//! The `Display` text of each variant is the message the search endpoint
//! returns to the admin UI.

use thiserror::Error;

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid JSON body")]
    InvalidJson,

    #[error("Invalid entityType")]
    InvalidEntityType,

    #[error("Missing slug or schemaPath")]
    MissingSlugOrSchemaPath,

    #[error("Unknown entity")]
    UnknownEntity,

    #[error("Field not found")]
    FieldNotFound,

    #[error("Field not searchable")]
    FieldNotSearchable,

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Invalid search.debounce.{key}: expected a finite number >= 0")]
    InvalidDebounce { key: &'static str },
}

impl SearchError {
    /// HTTP status the search endpoint answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            SearchError::Unauthorized => 401,
            SearchError::InvalidJson
            | SearchError::InvalidEntityType
            | SearchError::MissingSlugOrSchemaPath
            | SearchError::FieldNotFound
            | SearchError::FieldNotSearchable => 400,
            SearchError::UnknownEntity => 404,
            SearchError::SearchFailed(_) | SearchError::InvalidDebounce { .. } => 500,
        }
    }
}
