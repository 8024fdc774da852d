use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One option offered by a select-search field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectSearchOption {
    pub label: String,
    pub value: String,
    /// Any additional data the search function wants to hand to the UI.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SelectSearchOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            extra: Map::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Whether a search targets a collection or a global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Collection,
    Global,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Collection => "collection",
            EntityType::Global => "global",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "collection" => Some(EntityType::Collection),
            "global" => Some(EntityType::Global),
            _ => None,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub entity_type: EntityType,
    pub slug: String,
    /// Full schema path, starting with the entity slug.
    pub schema_path: String,
    /// The typed query, at most [`MAX_QUERY_LENGTH`](crate::MAX_QUERY_LENGTH)
    /// characters.
    pub query: String,
    pub selected_values: Vec<String>,
    pub data: Option<Value>,
    pub sibling_data: Option<Value>,
}

impl SearchRequest {
    /// The schema path without its leading entity slug, e.g. `meta.author`.
    pub fn field_path(&self) -> String {
        self.schema_path
            .split('.')
            .skip(1)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Reply of a successful search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub options: Vec<SelectSearchOption>,
}

/// The authenticated caller of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchUser {
    pub id: String,
}

impl SearchUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
