use serde::{Deserialize, Serialize};

use crate::error::ModelResult;
use crate::field::{Field, FieldType};

/// Admin options of a collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionAdmin {
    /// Field shown as the document's title wherever it is referenced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_as_title: Option<String>,
}

/// A collection: many documents sharing one field tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub slug: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub admin: CollectionAdmin,
    /// Whether documents of this collection are uploaded files.
    #[serde(default)]
    pub upload: bool,
}

impl CollectionConfig {
    pub fn new(slug: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            slug: slug.into(),
            fields,
            admin: CollectionAdmin::default(),
            upload: false,
        }
    }

    pub fn with_title_field(mut self, field: impl Into<String>) -> Self {
        self.admin.use_as_title = Some(field.into());
        self
    }

    pub fn with_upload(mut self, upload: bool) -> Self {
        self.upload = upload;
        self
    }
}

/// A global: a single document with its own field tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub slug: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// Site configuration: every collection and global.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub collections: Vec<CollectionConfig>,
    #[serde(default)]
    pub globals: Vec<GlobalConfig>,
}

impl Config {
    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_collection(mut self, collection: CollectionConfig) -> Self {
        self.collections.push(collection);
        self
    }

    pub fn with_global(mut self, global: GlobalConfig) -> Self {
        self.globals.push(global);
        self
    }

    pub fn collection(&self, slug: &str) -> Option<&CollectionConfig> {
        self.collections.iter().find(|c| c.slug == slug)
    }

    pub fn global(&self, slug: &str) -> Option<&GlobalConfig> {
        self.globals.iter().find(|g| g.slug == slug)
    }
}

/// Finds a field by its dotted data path relative to the entity root
/// (e.g. `"meta.author"`).
///
/// Rows, collapsibles and unnamed tabs are looked through; named tabs act
/// like groups. Returns `None` when the path ends on a named tab or any
/// segment is missing.
pub fn find_field_by_path<'a>(fields: &'a [Field], path: &str) -> Option<&'a Field> {
    let mut segments = path.split('.').filter(|s| !s.is_empty()).peekable();
    segments.peek()?;

    let mut level: Vec<&'a [Field]> = vec![fields];
    while let Some(segment) = segments.next() {
        let last = segments.peek().is_none();
        match lookup_in_level(&level, segment)? {
            Found::Field(field) if last => return Some(field),
            Found::Field(field) => match field.field_type {
                FieldType::Group | FieldType::Array => level = vec![&field.fields],
                _ => return None,
            },
            Found::NamedTab(_) if last => return None,
            Found::NamedTab(tab_fields) => level = vec![tab_fields],
        }
    }
    None
}

enum Found<'a> {
    Field(&'a Field),
    NamedTab(&'a [Field]),
}

fn lookup_in_level<'a>(level: &[&'a [Field]], name: &str) -> Option<Found<'a>> {
    let mut pending: Vec<&'a [Field]> = level.to_vec();
    while let Some(fields) = pending.pop() {
        for field in fields {
            match field.field_type {
                FieldType::Row | FieldType::Collapsible => pending.push(&field.fields),
                FieldType::Tabs => {
                    for tab in &field.tabs {
                        match &tab.name {
                            Some(tab_name) if tab_name == name => {
                                return Some(Found::NamedTab(&tab.fields));
                            }
                            Some(_) => {}
                            None => pending.push(&tab.fields),
                        }
                    }
                }
                _ if field.name == name => return Some(Found::Field(field)),
                _ => {}
            }
        }
    }
    None
}
