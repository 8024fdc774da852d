use std::collections::HashMap;

use crate::config::Config;
use crate::error::{ModelError, ModelResult};
use crate::field::{Field, FieldType};

/// Ordered mapping from dotted schema path (`<slug>.<name>[.<name>…]`) to
/// the field declared there.
///
/// Insertion order is the field declaration order of the config, and it is
/// the order every traversal emits values in.
#[derive(Debug, Clone, Default)]
pub struct SchemaMap {
    entries: Vec<(String, Field)>,
    positions: HashMap<String, usize>,
}

impl SchemaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the schema map of a field tree rooted at `slug`.
    ///
    /// Rows, collapsibles and unnamed tabs add no path segment; their
    /// children are registered at the parent level. Named tabs are
    /// registered as group entries. Block contents are not descended into.
    pub fn from_fields(slug: &str, fields: &[Field]) -> Self {
        let mut map = Self::new();
        map.collect(slug, fields);
        map
    }

    fn collect(&mut self, prefix: &str, fields: &[Field]) {
        for field in fields {
            match field.field_type {
                FieldType::Row | FieldType::Collapsible => self.collect(prefix, &field.fields),
                FieldType::Tabs => {
                    for tab in &field.tabs {
                        match &tab.name {
                            Some(name) => {
                                let path = format!("{prefix}.{name}");
                                let mut group = Field::group(name.clone(), tab.fields.clone());
                                group.label = tab.label.clone();
                                self.insert(path.clone(), group);
                                self.collect(&path, &tab.fields);
                            }
                            None => self.collect(prefix, &tab.fields),
                        }
                    }
                }
                FieldType::Group | FieldType::Array => {
                    let path = format!("{prefix}.{}", field.name);
                    self.insert(path.clone(), field.clone());
                    self.collect(&path, &field.fields);
                }
                _ if field.name.is_empty() => {}
                _ => self.insert(format!("{prefix}.{}", field.name), field.clone()),
            }
        }
    }

    /// Inserts a field. Re-inserting a path replaces the field but keeps
    /// its original position.
    pub fn insert(&mut self, path: impl Into<String>, field: Field) {
        let path = path.into();
        match self.positions.get(&path) {
            Some(&pos) => self.entries[pos].1 = field,
            None => {
                self.positions.insert(path.clone(), self.entries.len());
                self.entries.push((path, field));
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&Field> {
        self.positions.get(path).map(|&pos| &self.entries[pos].1)
    }

    /// Declared position of a path, used to order document keys.
    pub fn position(&self, path: &str) -> Option<usize> {
        self.positions.get(path).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.entries.iter().map(|(path, field)| (path.as_str(), field))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Source of schema maps, keyed by collection (or global) slug.
pub trait SchemaLookup: Send + Sync {
    fn schema_map(&self, slug: &str) -> ModelResult<SchemaMap>;
}

impl SchemaLookup for Config {
    fn schema_map(&self, slug: &str) -> ModelResult<SchemaMap> {
        if let Some(collection) = self.collection(slug) {
            return Ok(SchemaMap::from_fields(slug, &collection.fields));
        }
        if let Some(global) = self.global(slug) {
            return Ok(SchemaMap::from_fields(slug, &global.fields));
        }
        Err(ModelError::UnknownCollection(slug.to_string()))
    }
}
