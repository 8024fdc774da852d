use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::label::Label;

/// The type tag of a declared field.
///
/// This is a closed set: every consumer that dispatches on field type matches
/// it exhaustively, so adding a variant is a compile error everywhere it
/// matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Array,
    Blocks,
    Checkbox,
    Code,
    Collapsible,
    Date,
    Email,
    Group,
    Join,
    Json,
    Number,
    Point,
    Radio,
    Relationship,
    RichText,
    Row,
    Select,
    Tabs,
    Text,
    Textarea,
    Ui,
    Upload,
}

impl FieldType {
    /// Every variant, in declaration order.
    pub const ALL: [FieldType; 22] = [
        FieldType::Array,
        FieldType::Blocks,
        FieldType::Checkbox,
        FieldType::Code,
        FieldType::Collapsible,
        FieldType::Date,
        FieldType::Email,
        FieldType::Group,
        FieldType::Join,
        FieldType::Json,
        FieldType::Number,
        FieldType::Point,
        FieldType::Radio,
        FieldType::Relationship,
        FieldType::RichText,
        FieldType::Row,
        FieldType::Select,
        FieldType::Tabs,
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Ui,
        FieldType::Upload,
    ];

    /// The tag as it appears in config JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Array => "array",
            FieldType::Blocks => "blocks",
            FieldType::Checkbox => "checkbox",
            FieldType::Code => "code",
            FieldType::Collapsible => "collapsible",
            FieldType::Date => "date",
            FieldType::Email => "email",
            FieldType::Group => "group",
            FieldType::Join => "join",
            FieldType::Json => "json",
            FieldType::Number => "number",
            FieldType::Point => "point",
            FieldType::Radio => "radio",
            FieldType::Relationship => "relationship",
            FieldType::RichText => "richText",
            FieldType::Row => "row",
            FieldType::Select => "select",
            FieldType::Tabs => "tabs",
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Ui => "ui",
            FieldType::Upload => "upload",
        }
    }

    /// Layout-only types: they hold child fields but store no data under
    /// their own name.
    pub fn is_presentational(self) -> bool {
        matches!(self, FieldType::Row | FieldType::Collapsible | FieldType::Tabs)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target collection(s) of a relationship or upload field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationTo {
    One(String),
    Many(Vec<String>),
}

impl RelationTo {
    /// The collection a bare id refers to. Polymorphic relationships always
    /// store `{relationTo, value}` pairs, so the first entry is only a guess.
    pub fn primary(&self) -> Option<&str> {
        match self {
            RelationTo::One(slug) => Some(slug),
            RelationTo::Many(slugs) => slugs.first().map(String::as_str),
        }
    }

    pub fn is_polymorphic(&self) -> bool {
        matches!(self, RelationTo::Many(_))
    }
}

/// One tab of a `tabs` field. Named tabs nest their data under the name;
/// unnamed tabs are purely visual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A declared field of a collection or global.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Data key. Empty for presentational fields.
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    /// Related collection(s). Only meaningful for relationship and upload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_to: Option<RelationTo>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_many: bool,
    /// Child fields of array, group, row and collapsible.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tabs: Vec<Tab>,
    /// Free-form plugin metadata.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub custom: Map<String, Value>,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            label: None,
            relation_to: None,
            has_many: false,
            fields: Vec::new(),
            tabs: Vec::new(),
            custom: Map::new(),
        }
    }

    /// Shorthand for a text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text)
    }

    /// Shorthand for a number field.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number)
    }

    /// Shorthand for a date field.
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Date)
    }

    /// Shorthand for a rich text field.
    pub fn rich_text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::RichText)
    }

    /// Shorthand for a group with the given children.
    pub fn group(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            fields,
            ..Self::new(name, FieldType::Group)
        }
    }

    /// Shorthand for an array whose items have the given fields.
    pub fn array(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            fields,
            ..Self::new(name, FieldType::Array)
        }
    }

    /// Shorthand for a row; its children live at the row's own level.
    pub fn row(fields: Vec<Field>) -> Self {
        Self {
            fields,
            ..Self::new("", FieldType::Row)
        }
    }

    /// Shorthand for a collapsible; its children live at its own level.
    pub fn collapsible(fields: Vec<Field>) -> Self {
        Self {
            fields,
            ..Self::new("", FieldType::Collapsible)
        }
    }

    /// Shorthand for a tabs field.
    pub fn tabs(tabs: Vec<Tab>) -> Self {
        Self {
            tabs,
            ..Self::new("", FieldType::Tabs)
        }
    }

    /// Shorthand for a relationship to a single collection.
    pub fn relationship(name: impl Into<String>, relation_to: impl Into<String>) -> Self {
        Self {
            relation_to: Some(RelationTo::One(relation_to.into())),
            ..Self::new(name, FieldType::Relationship)
        }
    }

    /// Shorthand for a relationship to several collections.
    pub fn polymorphic_relationship(name: impl Into<String>, relation_to: Vec<String>) -> Self {
        Self {
            relation_to: Some(RelationTo::Many(relation_to)),
            ..Self::new(name, FieldType::Relationship)
        }
    }

    /// Shorthand for an upload field.
    pub fn upload(name: impl Into<String>, relation_to: impl Into<String>) -> Self {
        Self {
            relation_to: Some(RelationTo::One(relation_to.into())),
            ..Self::new(name, FieldType::Upload)
        }
    }

    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_has_many(mut self, has_many: bool) -> Self {
        self.has_many = has_many;
        self
    }
}
