use cmskit_model::{Localizer, SchemaMap};
use futures::future::try_join_all;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

use crate::error::TraverseResult;
use crate::level::Walker;
use crate::path::{FlattenedFieldValue, IndexPathSegment, SchemaPathSegment};
use crate::resolvers::{FieldResolvers, ResolveArgs};
use crate::traverse::TraverseArgs;

/// State shared by every resolver call of one [`flatten_document_values`]
/// run. Container resolvers recurse through [`FlattenContext::resolve_level`].
pub struct FlattenContext<'a> {
    collection_slug: &'a str,
    schema_map: SchemaMap,
    excluded: HashSet<String>,
    localizer: &'a dyn Localizer,
    resolvers: &'a FieldResolvers,
}

impl<'a> FlattenContext<'a> {
    pub fn collection_slug(&self) -> &str {
        self.collection_slug
    }

    pub fn schema_map(&self) -> &SchemaMap {
        &self.schema_map
    }

    pub fn localizer(&self) -> &dyn Localizer {
        self.localizer
    }

    pub fn is_excluded(&self, relative_path: &str) -> bool {
        self.excluded.contains(relative_path)
    }

    /// Resolves every schema field of one object level and concatenates the
    /// results in schema order.
    ///
    /// All resolvers of the level run concurrently; the output order does not
    /// depend on which finishes first. `item_index` marks `data` as item
    /// `item_index` of an array.
    pub async fn resolve_level(
        &self,
        data: &Map<String, Value>,
        parent_schema: &[SchemaPathSegment],
        parent_index: &[IndexPathSegment],
        item_index: Option<usize>,
    ) -> TraverseResult<Vec<FlattenedFieldValue>> {
        let walker = Walker {
            collection_slug: self.collection_slug,
            schema_map: &self.schema_map,
            excluded: &self.excluded,
            localizer: self.localizer,
        };
        let pending = walker
            .level(data, parent_schema, parent_index, item_index)
            .into_iter()
            .map(|entry| {
                let resolver = self.resolvers.get(entry.field.field_type);
                resolver.resolve(ResolveArgs {
                    ctx: self,
                    field: entry.field,
                    data: entry.value,
                    schema_path_segments: entry.schema_path_segments,
                    index_path_segments: entry.index_path_segments,
                })
            });

        let resolved = try_join_all(pending).await?;
        Ok(resolved.into_iter().flatten().collect())
    }
}

/// Maps over a document and returns its flattened field values, each field
/// resolved by the resolver registered for its type.
///
/// Resolver errors propagate unchanged.
pub async fn flatten_document_values(
    args: TraverseArgs<'_>,
    resolvers: &FieldResolvers,
) -> TraverseResult<Vec<FlattenedFieldValue>> {
    let ctx = FlattenContext {
        collection_slug: args.collection,
        schema_map: args.schema.schema_map(args.collection)?,
        excluded: args.excluded_set(),
        localizer: args.localizer,
        resolvers,
    };

    let Some(root) = args.doc.as_object() else {
        debug!(collection = args.collection, "document is not an object, nothing to flatten");
        return Ok(Vec::new());
    };

    let values = ctx.resolve_level(root, &[], &[], None).await?;
    debug!(collection = args.collection, count = values.len(), "flattened document");
    Ok(values)
}
