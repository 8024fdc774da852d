use async_trait::async_trait;
use cmskit_model::{Config, Document};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{TraverseError, TraverseResult};

/// Read access to other documents, used to display references.
#[async_trait]
pub trait DocumentLookup: Send + Sync {
    /// The field a collection uses as its documents' title, if any.
    fn title_field(&self, collection: &str) -> Option<String>;

    /// Fetches a document by id. With a non-empty `select`, only those
    /// fields (plus `id`) are returned. `Ok(None)` when there is no such
    /// document.
    async fn find_by_id(
        &self,
        collection: &str,
        id: &str,
        select: &[&str],
    ) -> TraverseResult<Option<Value>>;
}

/// [`DocumentLookup`] over a [`Config`] and documents held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryDocuments {
    config: Arc<Config>,
    documents: HashMap<(String, String), Value>,
}

impl InMemoryDocuments {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            documents: HashMap::new(),
        }
    }

    pub fn insert(&mut self, document: Document) {
        self.documents
            .insert((document.collection, document.id), document.data);
    }

    pub fn with_document(mut self, document: Document) -> Self {
        self.insert(document);
        self
    }
}

#[async_trait]
impl DocumentLookup for InMemoryDocuments {
    fn title_field(&self, collection: &str) -> Option<String> {
        self.config
            .collection(collection)
            .and_then(|c| c.admin.use_as_title.clone())
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: &str,
        select: &[&str],
    ) -> TraverseResult<Option<Value>> {
        if self.config.collection(collection).is_none() {
            return Err(TraverseError::Lookup {
                collection: collection.to_string(),
                id: id.to_string(),
                message: "unknown collection".to_string(),
            });
        }
        let Some(data) = self.documents.get(&(collection.to_string(), id.to_string())) else {
            return Ok(None);
        };
        Ok(Some(project(data, id, select)))
    }
}

/// Keeps `id` and the selected fields of a document.
pub(crate) fn project(data: &Value, id: &str, select: &[&str]) -> Value {
    let Some(obj) = data.as_object() else {
        return data.clone();
    };
    if select.is_empty() {
        return data.clone();
    }
    let mut out = Map::new();
    out.insert(
        "id".to_string(),
        obj.get("id").cloned().unwrap_or_else(|| Value::String(id.to_string())),
    );
    for key in select {
        if let Some(v) = obj.get(*key) {
            out.insert(key.to_string(), v.clone());
        }
    }
    Value::Object(out)
}
