//! Searchable select fields for cmskit.
//!
//! A select-search field stores plain text but offers its values from a
//! [`SearchFunction`] queried as the editor types. [`select_search_field`]
//! builds the field, [`SearchRegistry`] remembers each field's function and
//! [`SearchService`] answers the admin UI's search requests.

mod error;
mod field;
mod function;
mod registry;
mod service;
mod types;

pub use error::{SearchError, SearchResult};
pub use field::{
    CLIENT_PROPS_KEY, DEFAULT_QUERY_DEBOUNCE_MS, DEFAULT_WATCHED_FIELDS_DEBOUNCE_MS, DebounceMs,
    SelectSearchClientProps, SelectSearchConfig, SelectSearchDebounceConfig, SelectSearchField,
    SelectSearchFieldArgs, select_search_field,
};
pub use function::{SearchArgs, SearchFunction, StaticOptionsSearch};
pub use registry::SearchRegistry;
pub use service::{MAX_QUERY_LENGTH, SearchService, parse_request};
pub use types::{EntityType, SearchRequest, SearchResponse, SearchUser, SelectSearchOption};
