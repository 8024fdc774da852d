use async_trait::async_trait;
use futures::future::try_join_all;

use super::{FieldResolver, ResolveArgs};
use crate::error::TraverseResult;
use crate::path::FlattenedFieldValue;

/// Resolves a group by resolving each of its sub-fields.
pub struct GroupResolver;

#[async_trait]
impl FieldResolver for GroupResolver {
    async fn resolve(&self, args: ResolveArgs<'_>) -> TraverseResult<Vec<FlattenedFieldValue>> {
        let Some(data) = args.data.as_object() else {
            return Ok(Vec::new());
        };
        args.ctx
            .resolve_level(
                data,
                &args.schema_path_segments,
                &args.index_path_segments,
                None,
            )
            .await
    }
}

/// Resolves an array by resolving the sub-fields of every item. Each value's
/// index path records the item position.
pub struct ArrayResolver;

#[async_trait]
impl FieldResolver for ArrayResolver {
    async fn resolve(&self, args: ResolveArgs<'_>) -> TraverseResult<Vec<FlattenedFieldValue>> {
        let Some(items) = args.data.as_array() else {
            return Ok(Vec::new());
        };
        let ctx = args.ctx;
        let schema = &args.schema_path_segments;
        let index = &args.index_path_segments;

        let pending = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| item.as_object().map(|obj| (i, obj)))
            .map(|(i, obj)| ctx.resolve_level(obj, schema, index, Some(i)));

        let resolved = try_join_all(pending).await?;
        Ok(resolved.into_iter().flatten().collect())
    }
}
