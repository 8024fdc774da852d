use serde::{Deserialize, Serialize};

/// A stored document of some collection.
///
/// `data` holds the field values as JSON, shaped by the collection's fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub collection: String,
    pub data: serde_json::Value,
}

impl Document {
    pub fn new(
        collection: impl Into<String>,
        id: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            collection: collection.into(),
            data,
        }
    }
}
