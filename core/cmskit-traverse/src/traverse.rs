use cmskit_model::{Field, FieldType, Localizer, SchemaLookup};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::ops::ControlFlow;
use tracing::debug;

use crate::error::TraverseResult;
use crate::level::{LevelEntry, Walker};
use crate::path::{FlattenedFieldValue, IndexPathSegment, SchemaPathSegment};

/// Audit timestamps skipped unless the caller passes its own exclusions.
pub const DEFAULT_EXCLUDED_FIELDS: [&str; 2] = ["updatedAt", "createdAt"];

/// A document to traverse and everything needed to read it.
pub struct TraverseArgs<'a> {
    /// Slug of the collection (or global) the document belongs to.
    pub collection: &'a str,
    pub doc: &'a Value,
    pub schema: &'a dyn SchemaLookup,
    pub localizer: &'a dyn Localizer,
    /// Schema paths relative to the collection root (e.g. `group.subField`)
    /// to skip along with everything below them.
    pub excluded_fields: Vec<String>,
}

impl<'a> TraverseArgs<'a> {
    pub fn new(
        collection: &'a str,
        doc: &'a Value,
        schema: &'a dyn SchemaLookup,
        localizer: &'a dyn Localizer,
    ) -> Self {
        Self {
            collection,
            doc,
            schema,
            localizer,
            excluded_fields: DEFAULT_EXCLUDED_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_excluded_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn excluded_set(&self) -> HashSet<String> {
        self.excluded_fields.iter().cloned().collect()
    }
}

/// What the [`traverse_document`] callback sees for one field.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub field: &'a Field,
    pub schema_path_segments: &'a [SchemaPathSegment],
    pub index_path_segments: &'a [IndexPathSegment],
    /// The object holding this field's value.
    pub sibling_data: &'a Map<String, Value>,
    pub value: &'a Value,
}

struct Pending<'s, 'd> {
    entry: LevelEntry<'s, 'd>,
    sibling_data: &'d Map<String, Value>,
}

/// Calls `callback` for every field of the document in schema order.
///
/// Containers are visited before their children. Returning
/// [`ControlFlow::Break`] from the callback ends the whole traversal; when it
/// breaks on a container, none of that container's children are visited
/// either.
pub fn traverse_document<F>(args: TraverseArgs<'_>, mut callback: F) -> TraverseResult<()>
where
    F: FnMut(Visit<'_>) -> ControlFlow<()>,
{
    let schema_map = args.schema.schema_map(args.collection)?;
    let excluded = args.excluded_set();
    let walker = Walker {
        collection_slug: args.collection,
        schema_map: &schema_map,
        excluded: &excluded,
        localizer: args.localizer,
    };

    let Some(root) = args.doc.as_object() else {
        debug!(collection = args.collection, "document is not an object, nothing to traverse");
        return Ok(());
    };

    let mut stack: Vec<Pending<'_, '_>> = Vec::new();
    push_level(&mut stack, walker.level(root, &[], &[], None), root);

    while let Some(Pending {
        entry,
        sibling_data,
    }) = stack.pop()
    {
        let visit = Visit {
            field: entry.field,
            schema_path_segments: &entry.schema_path_segments,
            index_path_segments: &entry.index_path_segments,
            sibling_data,
            value: entry.value,
        };
        if callback(visit).is_break() {
            debug!(collection = args.collection, "traversal stopped by callback");
            return Ok(());
        }

        let children = expand_children(&walker, &entry);
        stack.extend(children.into_iter().rev());
    }
    Ok(())
}

fn push_level<'s, 'd>(
    stack: &mut Vec<Pending<'s, 'd>>,
    entries: Vec<LevelEntry<'s, 'd>>,
    sibling_data: &'d Map<String, Value>,
) {
    stack.extend(
        entries
            .into_iter()
            .rev()
            .map(|entry| Pending {
                entry,
                sibling_data,
            }),
    );
}

/// Child entries of a container, in visit order. Only the declared type
/// decides whether a field has children.
fn expand_children<'s, 'd>(
    walker: &Walker<'s>,
    entry: &LevelEntry<'s, 'd>,
) -> Vec<Pending<'s, 'd>> {
    let schema = &entry.schema_path_segments;
    let index = &entry.index_path_segments;
    match entry.field.field_type {
        FieldType::Group => match entry.value.as_object() {
            Some(obj) => walker
                .level(obj, schema, index, None)
                .into_iter()
                .map(|child| Pending {
                    entry: child,
                    sibling_data: obj,
                })
                .collect(),
            None => Vec::new(),
        },
        FieldType::Array => entry
            .value
            .as_array()
            .into_iter()
            .flatten()
            .enumerate()
            .filter_map(|(i, item)| item.as_object().map(|obj| (i, obj)))
            .flat_map(|(i, obj)| {
                walker
                    .level(obj, schema, index, Some(i))
                    .into_iter()
                    .map(move |child| Pending {
                        entry: child,
                        sibling_data: obj,
                    })
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Flattens a document by recording every [`traverse_document`] visit,
/// containers included.
pub fn flatten_document_values_v2(args: TraverseArgs<'_>) -> TraverseResult<Vec<FlattenedFieldValue>> {
    let mut values = Vec::new();
    traverse_document(args, |visit| {
        values.push(FlattenedFieldValue {
            field: visit.field.clone(),
            schema_path_segments: visit.schema_path_segments.to_vec(),
            index_path_segments: visit.index_path_segments.to_vec(),
            value: visit.value.clone(),
        });
        ControlFlow::Continue(())
    })?;
    Ok(values)
}
