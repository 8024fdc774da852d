use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::reference::{is_unset_ref, parse_ref};
use super::{FieldResolver, ResolveArgs};
use crate::error::TraverseResult;
use crate::lookup::DocumentLookup;
use crate::path::FlattenedFieldValue;

/// Resolves a relationship to the title of each referenced document, using
/// the related collection's title field. Falls back to the raw id when the
/// collection has no title field or the document does not exist.
///
/// Handles single values and `hasMany` arrays alike.
pub struct RelationshipTitleResolver {
    lookup: Arc<dyn DocumentLookup>,
}

impl RelationshipTitleResolver {
    pub fn new(lookup: Arc<dyn DocumentLookup>) -> Self {
        Self { lookup }
    }

    async fn title_of(&self, value: &Value, default_collection: Option<&str>) -> TraverseResult<Value> {
        if is_unset_ref(value) {
            return Ok(Value::Null);
        }
        let Some(reference) = parse_ref(value, default_collection) else {
            return Ok(value.clone());
        };
        let Some(collection) = reference.collection.as_deref() else {
            return Ok(reference.id.clone());
        };
        let Some(title_field) = self.lookup.title_field(collection) else {
            return Ok(reference.id.clone());
        };

        if let Some(title) = reference
            .populated
            .and_then(|doc| doc.get(&title_field))
            .filter(|t| !t.is_null())
        {
            return Ok(title.clone());
        }

        let id = reference.id_key();
        let title = self
            .lookup
            .find_by_id(collection, &id, &[title_field.as_str()])
            .await?
            .and_then(|doc| doc.get(&title_field).cloned())
            .filter(|t| !t.is_null());
        if title.is_none() {
            debug!(collection, id = %id, "no title for related document, using id");
        }
        Ok(title.unwrap_or(reference.id))
    }
}

#[async_trait]
impl FieldResolver for RelationshipTitleResolver {
    async fn resolve(&self, args: ResolveArgs<'_>) -> TraverseResult<Vec<FlattenedFieldValue>> {
        let default_collection = args.field.relation_to.as_ref().and_then(|r| r.primary());
        let value = match args.data {
            Value::Array(items) => Value::Array(
                try_join_all(items.iter().map(|v| self.title_of(v, default_collection))).await?,
            ),
            other => self.title_of(other, default_collection).await?,
        };
        Ok(vec![args.emit(value)])
    }
}
