use async_trait::async_trait;
use cmskit_model::Field;
use serde_json::Value;

use crate::error::SearchResult;
use crate::types::{EntityType, SearchUser, SelectSearchOption};

/// What a search function is called with.
#[derive(Debug, Clone, Copy)]
pub struct SearchArgs<'a> {
    pub entity_type: EntityType,
    pub slug: &'a str,
    pub field: &'a Field,
    pub query: &'a str,
    pub selected_values: &'a [String],
    /// Whole form data, when the field passes it.
    pub data: Option<&'a Value>,
    /// Sibling form data, when the field passes it.
    pub sibling_data: Option<&'a Value>,
    pub user: &'a SearchUser,
}

/// Produces the options of a select-search field for a query.
#[async_trait]
pub trait SearchFunction: Send + Sync {
    async fn search(&self, args: SearchArgs<'_>) -> SearchResult<Vec<SelectSearchOption>>;
}

/// Searches a fixed option list.
///
/// An option matches when the query is a case-insensitive substring of its
/// label or value. Currently selected options are always returned so the UI
/// can keep showing them.
#[derive(Debug, Clone, Default)]
pub struct StaticOptionsSearch {
    options: Vec<SelectSearchOption>,
}

impl StaticOptionsSearch {
    pub fn new(options: Vec<SelectSearchOption>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &[SelectSearchOption] {
        &self.options
    }
}

#[async_trait]
impl SearchFunction for StaticOptionsSearch {
    async fn search(&self, args: SearchArgs<'_>) -> SearchResult<Vec<SelectSearchOption>> {
        let needle = args.query.trim().to_lowercase();
        Ok(self
            .options
            .iter()
            .filter(|option| {
                needle.is_empty()
                    || args.selected_values.contains(&option.value)
                    || option.label.to_lowercase().contains(&needle)
                    || option.value.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}
