use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;
use std::sync::Arc;

use super::reference::{is_unset_ref, parse_ref};
use super::{FieldResolver, ResolveArgs};
use crate::error::TraverseResult;
use crate::lookup::{DocumentLookup, project};
use crate::path::FlattenedFieldValue;

/// Fields of an upload document reported by [`UploadResolver`].
pub const UPLOAD_METADATA_FIELDS: [&str; 4] = ["filename", "filesize", "mimeType", "url"];

/// Resolves an upload field to the file metadata of each referenced
/// document, or to the raw id when the document does not exist.
pub struct UploadResolver {
    lookup: Arc<dyn DocumentLookup>,
}

impl UploadResolver {
    pub fn new(lookup: Arc<dyn DocumentLookup>) -> Self {
        Self { lookup }
    }

    async fn metadata_of(&self, value: &Value, default_collection: Option<&str>) -> TraverseResult<Value> {
        if is_unset_ref(value) {
            return Ok(Value::Null);
        }
        let Some(reference) = parse_ref(value, default_collection) else {
            return Ok(value.clone());
        };
        let id = reference.id_key();
        if let Some(doc) = reference.populated {
            return Ok(project(&Value::Object(doc.clone()), &id, &UPLOAD_METADATA_FIELDS));
        }
        let Some(collection) = reference.collection.as_deref() else {
            return Ok(reference.id.clone());
        };
        let metadata = self
            .lookup
            .find_by_id(collection, &id, &UPLOAD_METADATA_FIELDS)
            .await?;
        Ok(metadata.unwrap_or(reference.id))
    }
}

#[async_trait]
impl FieldResolver for UploadResolver {
    async fn resolve(&self, args: ResolveArgs<'_>) -> TraverseResult<Vec<FlattenedFieldValue>> {
        let default_collection = args.field.relation_to.as_ref().and_then(|r| r.primary());
        let value = match args.data {
            Value::Array(items) => Value::Array(
                try_join_all(items.iter().map(|v| self.metadata_of(v, default_collection))).await?,
            ),
            other => self.metadata_of(other, default_collection).await?,
        };
        Ok(vec![args.emit(value)])
    }
}
