//! Parsing of relationship and upload values.

use serde_json::{Map, Value};

/// A reference to another document, as stored in a relationship or upload
/// field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DocumentRef<'a> {
    /// Target collection, if known.
    pub collection: Option<String>,
    /// The id as stored (string or number).
    pub id: Value,
    /// The referenced document itself, when the value was already populated.
    pub populated: Option<&'a Map<String, Value>>,
}

impl DocumentRef<'_> {
    /// The id as a lookup key.
    pub fn id_key(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Reads one reference. Accepted shapes:
///
/// - a bare id (`"abc"` or `42`), targeting `default_collection`
/// - `{ "relationTo": "users", "value": <id or document> }`
/// - a populated document `{ "id": …, … }`, targeting `default_collection`
///
/// Anything else (including `null`) is not a reference.
pub(crate) fn parse_ref<'a>(value: &'a Value, default_collection: Option<&str>) -> Option<DocumentRef<'a>> {
    match value {
        Value::String(_) | Value::Number(_) => Some(DocumentRef {
            collection: default_collection.map(str::to_string),
            id: value.clone(),
            populated: None,
        }),
        Value::Object(obj) => match (obj.get("relationTo"), obj.get("value")) {
            (Some(Value::String(relation_to)), Some(inner)) => {
                parse_ref(inner, Some(relation_to.as_str())).map(|r| DocumentRef {
                    collection: Some(relation_to.clone()),
                    ..r
                })
            }
            _ => {
                let id = obj.get("id").filter(|id| id.is_string() || id.is_number())?;
                Some(DocumentRef {
                    collection: default_collection.map(str::to_string),
                    id: id.clone(),
                    populated: Some(obj),
                })
            }
        },
        _ => None,
    }
}

/// True for `null` and for a `{ "relationTo": …, "value": null }` pair:
/// an unset reference.
pub(crate) fn is_unset_ref(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(obj) => obj.contains_key("relationTo") && obj.get("value").is_some_and(Value::is_null),
        _ => false,
    }
}
