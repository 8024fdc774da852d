use std::collections::HashMap;
use std::sync::Arc;

use crate::field::SelectSearchField;
use crate::function::SearchFunction;
use crate::types::EntityType;

type Key = (EntityType, String, String);

/// Search functions of every select-search field, by entity and field path.
///
/// Paths are relative to the entity root, e.g. `meta.author`.
#[derive(Clone, Default)]
pub struct SearchRegistry {
    functions: HashMap<Key, Arc<dyn SearchFunction>>,
}

impl SearchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        entity_type: EntityType,
        slug: impl Into<String>,
        field_path: impl Into<String>,
        function: Arc<dyn SearchFunction>,
    ) {
        self.functions
            .insert((entity_type, slug.into(), field_path.into()), function);
    }

    /// Registers a built field. `parent_path` is the path of the level the
    /// field sits in, empty at the root.
    pub fn register_field(
        &mut self,
        entity_type: EntityType,
        slug: impl Into<String>,
        parent_path: &str,
        field: &SelectSearchField,
    ) {
        let path = if parent_path.is_empty() {
            field.field.name.clone()
        } else {
            format!("{parent_path}.{}", field.field.name)
        };
        self.register(entity_type, slug, path, field.search_function.clone());
    }

    pub fn with(
        mut self,
        entity_type: EntityType,
        slug: impl Into<String>,
        field_path: impl Into<String>,
        function: Arc<dyn SearchFunction>,
    ) -> Self {
        self.register(entity_type, slug, field_path, function);
        self
    }

    pub fn get(
        &self,
        entity_type: EntityType,
        slug: &str,
        field_path: &str,
    ) -> Option<&Arc<dyn SearchFunction>> {
        self.functions
            .get(&(entity_type, slug.to_string(), field_path.to_string()))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
