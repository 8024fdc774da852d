use cmskit_model::Field;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One step of a field's path in the collection schema. Never an array
/// index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaPathSegment {
    pub name: String,
    pub label: String,
}

/// Name or label of an [`IndexPathSegment`]: a data key, or the position
/// of an array item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathName {
    Index(usize),
    Key(String),
}

impl fmt::Display for PathName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathName::Index(i) => write!(f, "{i}"),
            PathName::Key(k) => f.write_str(k),
        }
    }
}

/// One step of a field's concrete path inside a document, array positions
/// included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPathSegment {
    pub name: PathName,
    pub label: PathName,
}

impl IndexPathSegment {
    /// Segment for item `index` of an array.
    pub fn item(index: usize) -> Self {
        Self {
            name: PathName::Index(index),
            label: PathName::Index(index),
        }
    }

    pub fn item_index(&self) -> Option<usize> {
        match self.name {
            PathName::Index(i) => Some(i),
            PathName::Key(_) => None,
        }
    }
}

impl From<SchemaPathSegment> for IndexPathSegment {
    fn from(segment: SchemaPathSegment) -> Self {
        Self {
            name: PathName::Key(segment.name),
            label: PathName::Key(segment.label),
        }
    }
}

/// One value emitted by a traversal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedFieldValue {
    pub field: Field,
    /// Path to the field in the collection schema.
    pub schema_path_segments: Vec<SchemaPathSegment>,
    /// Path to the value in this document; includes the indices of any
    /// array items on the way.
    pub index_path_segments: Vec<IndexPathSegment>,
    pub value: Value,
}

impl FlattenedFieldValue {
    /// Dotted schema path without the collection slug, e.g. `tags.label`.
    pub fn schema_path(&self) -> String {
        join_names(self.schema_path_segments.iter().map(|s| s.name.as_str()))
    }

    /// Dotted document path, e.g. `tags.1.label`.
    pub fn index_path(&self) -> String {
        self.index_path_segments
            .iter()
            .map(|s| s.name.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Labels along the document path joined by `separator`, e.g.
    /// `Tags > 1 > Label`.
    pub fn label_path(&self, separator: &str) -> String {
        self.index_path_segments
            .iter()
            .map(|s| s.label.to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

pub(crate) fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(".")
}
