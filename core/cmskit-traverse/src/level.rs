//! Expansion of one object level into schema-ordered field entries. Shared
//! by both traversal modes.

use cmskit_model::{Field, Localizer, SchemaMap, resolve_field_label};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

use crate::path::{IndexPathSegment, SchemaPathSegment, join_names};

/// Key of an array item that identifies the item, not a field.
const ITEM_ID_KEY: &str = "id";

/// A document key that resolved to a schema field.
pub(crate) struct LevelEntry<'s, 'd> {
    pub field: &'s Field,
    pub value: &'d Value,
    pub schema_path_segments: Vec<SchemaPathSegment>,
    pub index_path_segments: Vec<IndexPathSegment>,
}

pub(crate) struct Walker<'a> {
    pub collection_slug: &'a str,
    pub schema_map: &'a SchemaMap,
    pub excluded: &'a HashSet<String>,
    pub localizer: &'a dyn Localizer,
}

impl<'a> Walker<'a> {
    /// Resolves the keys of `data` against the schema, in schema order.
    ///
    /// `item_index` is set when `data` is an array item: the item position is
    /// added to the index path and the item's `id` key is skipped. Keys with
    /// no schema entry and excluded paths yield nothing.
    pub fn level<'d>(
        &self,
        data: &'d Map<String, Value>,
        parent_schema: &[SchemaPathSegment],
        parent_index: &[IndexPathSegment],
        item_index: Option<usize>,
    ) -> Vec<LevelEntry<'a, 'd>> {
        let parent_path = join_names(parent_schema.iter().map(|s| s.name.as_str()));
        let relative_path = |key: &str| {
            if parent_path.is_empty() {
                key.to_string()
            } else {
                format!("{parent_path}.{key}")
            }
        };

        let mut keys: Vec<(&'d String, &'d Value, String)> = data
            .iter()
            .filter(|(key, _)| item_index.is_none() || key.as_str() != ITEM_ID_KEY)
            .map(|(key, value)| (key, value, relative_path(key)))
            .collect();
        keys.sort_by_cached_key(|(_, _, relative)| {
            self.schema_map
                .position(&self.schema_path(relative))
                .unwrap_or(usize::MAX)
        });

        let schema_map: &'a SchemaMap = self.schema_map;
        let mut entries = Vec::with_capacity(keys.len());
        for (key, value, relative) in keys {
            if self.excluded.contains(&relative) {
                debug!(path = %relative, "skipping excluded field");
                continue;
            }
            let Some(field) = schema_map.get(&self.schema_path(&relative)) else {
                debug!(path = %relative, "skipping key with no schema entry");
                continue;
            };

            let label = resolve_field_label(field, self.localizer).unwrap_or_else(|| key.clone());
            let segment = SchemaPathSegment {
                name: key.clone(),
                label,
            };

            let mut index_path_segments = parent_index.to_vec();
            if let Some(index) = item_index {
                index_path_segments.push(IndexPathSegment::item(index));
            }
            index_path_segments.push(segment.clone().into());

            let mut schema_path_segments = parent_schema.to_vec();
            schema_path_segments.push(segment);

            entries.push(LevelEntry {
                field,
                value,
                schema_path_segments,
                index_path_segments,
            });
        }
        entries
    }

    fn schema_path(&self, relative: &str) -> String {
        format!("{}.{relative}", self.collection_slug)
    }
}
