//! Building select-search fields.

use cmskit_model::{Field, FieldType, Label};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{SearchError, SearchResult};
use crate::function::SearchFunction;

pub const DEFAULT_QUERY_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_WATCHED_FIELDS_DEBOUNCE_MS: u64 = 700;

/// Key of [`Field::custom`] holding the client props.
pub const CLIENT_PROPS_KEY: &str = "selectSearch";

/// Debounce delays in milliseconds, as configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectSearchDebounceConfig {
    /// Delay after the query changes. Default 300.
    pub query: Option<f64>,
    /// Delay after a watched field changes. Default 700.
    pub watched_fields: Option<f64>,
}

/// How a select-search field searches.
#[derive(Clone)]
pub struct SelectSearchConfig {
    pub search_function: Arc<dyn SearchFunction>,
    pub debounce: SelectSearchDebounceConfig,
    /// Send the whole form data along with each search.
    pub pass_data_to_search_function: bool,
    /// Send the sibling data along with each search.
    pub pass_sibling_data_to_search_function: bool,
    /// Field paths whose changes trigger a new search.
    pub watch_field_paths: Vec<String>,
}

impl fmt::Debug for SelectSearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectSearchConfig")
            .field("debounce", &self.debounce)
            .field("pass_data_to_search_function", &self.pass_data_to_search_function)
            .field(
                "pass_sibling_data_to_search_function",
                &self.pass_sibling_data_to_search_function,
            )
            .field("watch_field_paths", &self.watch_field_paths)
            .finish_non_exhaustive()
    }
}

impl SelectSearchConfig {
    pub fn new(search_function: Arc<dyn SearchFunction>) -> Self {
        Self {
            search_function,
            debounce: SelectSearchDebounceConfig::default(),
            pass_data_to_search_function: false,
            pass_sibling_data_to_search_function: false,
            watch_field_paths: Vec::new(),
        }
    }

    /// Validates and normalizes the config into what the admin UI needs.
    pub fn client_props(&self) -> SearchResult<SelectSearchClientProps> {
        Ok(SelectSearchClientProps {
            debounce: DebounceMs {
                query: debounce_ms(self.debounce.query, DEFAULT_QUERY_DEBOUNCE_MS, "query")?,
                watched_fields: debounce_ms(
                    self.debounce.watched_fields,
                    DEFAULT_WATCHED_FIELDS_DEBOUNCE_MS,
                    "watchedFields",
                )?,
            },
            pass_data_to_search_function: self.pass_data_to_search_function,
            pass_sibling_data_to_search_function: self.pass_sibling_data_to_search_function,
            watch_field_paths: normalize_watch_paths(&self.watch_field_paths),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebounceMs {
    pub query: u64,
    pub watched_fields: u64,
}

/// Normalized settings handed to the admin UI component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectSearchClientProps {
    pub debounce: DebounceMs,
    pub pass_data_to_search_function: bool,
    pub pass_sibling_data_to_search_function: bool,
    /// Trimmed, de-duplicated and sorted.
    pub watch_field_paths: Vec<String>,
}

fn debounce_ms(value: Option<f64>, default: u64, key: &'static str) -> SearchResult<u64> {
    match value {
        None => Ok(default),
        Some(ms) if ms.is_finite() && ms >= 0.0 => Ok(ms.floor() as u64),
        Some(_) => Err(SearchError::InvalidDebounce { key }),
    }
}

fn normalize_watch_paths(paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Arguments of [`select_search_field`].
#[derive(Debug, Clone)]
pub struct SelectSearchFieldArgs {
    pub name: String,
    pub label: Option<Label>,
    pub has_many: bool,
    /// Extra metadata kept on the field.
    pub custom: Map<String, Value>,
    pub search: SelectSearchConfig,
}

impl SelectSearchFieldArgs {
    pub fn new(name: impl Into<String>, search: SelectSearchConfig) -> Self {
        Self {
            name: name.into(),
            label: None,
            has_many: false,
            custom: Map::new(),
            search,
        }
    }
}

/// A text field whose value is picked from searched options.
#[derive(Clone)]
pub struct SelectSearchField {
    pub field: Field,
    pub client_props: SelectSearchClientProps,
    pub search_function: Arc<dyn SearchFunction>,
}

impl fmt::Debug for SelectSearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectSearchField")
            .field("field", &self.field)
            .field("client_props", &self.client_props)
            .finish_non_exhaustive()
    }
}

/// Builds a select-search field. The stored value is plain text; the client
/// props are also kept under [`CLIENT_PROPS_KEY`] in the field's `custom`
/// map so they travel with the schema.
///
/// Fails when a debounce delay is negative or not finite.
pub fn select_search_field(args: SelectSearchFieldArgs) -> SearchResult<SelectSearchField> {
    let client_props = args.search.client_props()?;

    let mut custom = args.custom;
    custom.insert(
        CLIENT_PROPS_KEY.to_string(),
        serde_json::to_value(&client_props).unwrap_or(Value::Null),
    );
    let field = Field {
        label: args.label,
        has_many: args.has_many,
        custom,
        ..Field::new(args.name, FieldType::Text)
    };

    Ok(SelectSearchField {
        field,
        client_props,
        search_function: args.search.search_function,
    })
}
