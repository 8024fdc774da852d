//! Per-field-type resolvers for [`flatten_document_values`].
//!
//! [`flatten_document_values`]: crate::flatten_document_values

mod container;
mod reference;
mod relationship;
mod rich_text;
mod simple;
mod upload;

use async_trait::async_trait;
use cmskit_model::{Field, FieldType};
use serde_json::Value;
use std::sync::Arc;

use crate::error::TraverseResult;
use crate::flatten::FlattenContext;
use crate::path::{FlattenedFieldValue, IndexPathSegment, SchemaPathSegment};

pub use container::{ArrayResolver, GroupResolver};
pub use relationship::RelationshipTitleResolver;
pub use rich_text::{
    PlaintextConverter, PlaintextConverters, RichTextPlaintextResolver,
    convert_lexical_to_plaintext,
};
pub use simple::SimpleResolver;
pub use upload::{UPLOAD_METADATA_FIELDS, UploadResolver};

/// Arguments of one resolver call.
pub struct ResolveArgs<'a> {
    pub ctx: &'a FlattenContext<'a>,
    pub field: &'a Field,
    /// The field's value in the document.
    pub data: &'a Value,
    pub schema_path_segments: Vec<SchemaPathSegment>,
    pub index_path_segments: Vec<IndexPathSegment>,
}

impl ResolveArgs<'_> {
    /// A flattened value for this field carrying `value`.
    pub fn emit(self, value: Value) -> FlattenedFieldValue {
        FlattenedFieldValue {
            field: self.field.clone(),
            schema_path_segments: self.schema_path_segments,
            index_path_segments: self.index_path_segments,
            value,
        }
    }
}

/// Turns one field of a document into zero or more flattened values.
#[async_trait]
pub trait FieldResolver: Send + Sync {
    async fn resolve(&self, args: ResolveArgs<'_>) -> TraverseResult<Vec<FlattenedFieldValue>>;
}

/// One resolver per [`FieldType`].
///
/// Every variant has a slot, so dispatch can never miss. The default
/// registry recurses into arrays and groups and passes every other value
/// through unchanged.
#[derive(Clone)]
pub struct FieldResolvers {
    array: Arc<dyn FieldResolver>,
    blocks: Arc<dyn FieldResolver>,
    checkbox: Arc<dyn FieldResolver>,
    code: Arc<dyn FieldResolver>,
    collapsible: Arc<dyn FieldResolver>,
    date: Arc<dyn FieldResolver>,
    email: Arc<dyn FieldResolver>,
    group: Arc<dyn FieldResolver>,
    join: Arc<dyn FieldResolver>,
    json: Arc<dyn FieldResolver>,
    number: Arc<dyn FieldResolver>,
    point: Arc<dyn FieldResolver>,
    radio: Arc<dyn FieldResolver>,
    relationship: Arc<dyn FieldResolver>,
    rich_text: Arc<dyn FieldResolver>,
    row: Arc<dyn FieldResolver>,
    select: Arc<dyn FieldResolver>,
    tabs: Arc<dyn FieldResolver>,
    text: Arc<dyn FieldResolver>,
    textarea: Arc<dyn FieldResolver>,
    ui: Arc<dyn FieldResolver>,
    upload: Arc<dyn FieldResolver>,
}

impl FieldResolvers {
    /// A registry using `resolver` for every field type.
    pub fn uniform(resolver: Arc<dyn FieldResolver>) -> Self {
        Self {
            array: resolver.clone(),
            blocks: resolver.clone(),
            checkbox: resolver.clone(),
            code: resolver.clone(),
            collapsible: resolver.clone(),
            date: resolver.clone(),
            email: resolver.clone(),
            group: resolver.clone(),
            join: resolver.clone(),
            json: resolver.clone(),
            number: resolver.clone(),
            point: resolver.clone(),
            radio: resolver.clone(),
            relationship: resolver.clone(),
            rich_text: resolver.clone(),
            row: resolver.clone(),
            select: resolver.clone(),
            tabs: resolver.clone(),
            text: resolver.clone(),
            textarea: resolver.clone(),
            ui: resolver.clone(),
            upload: resolver,
        }
    }

    /// Replaces the resolver for one field type.
    pub fn with(mut self, field_type: FieldType, resolver: impl FieldResolver + 'static) -> Self {
        *self.slot_mut(field_type) = Arc::new(resolver);
        self
    }

    /// Replaces the resolver for one field type with a shared one.
    pub fn with_shared(mut self, field_type: FieldType, resolver: Arc<dyn FieldResolver>) -> Self {
        *self.slot_mut(field_type) = resolver;
        self
    }

    pub fn get(&self, field_type: FieldType) -> &dyn FieldResolver {
        match field_type {
            FieldType::Array => self.array.as_ref(),
            FieldType::Blocks => self.blocks.as_ref(),
            FieldType::Checkbox => self.checkbox.as_ref(),
            FieldType::Code => self.code.as_ref(),
            FieldType::Collapsible => self.collapsible.as_ref(),
            FieldType::Date => self.date.as_ref(),
            FieldType::Email => self.email.as_ref(),
            FieldType::Group => self.group.as_ref(),
            FieldType::Join => self.join.as_ref(),
            FieldType::Json => self.json.as_ref(),
            FieldType::Number => self.number.as_ref(),
            FieldType::Point => self.point.as_ref(),
            FieldType::Radio => self.radio.as_ref(),
            FieldType::Relationship => self.relationship.as_ref(),
            FieldType::RichText => self.rich_text.as_ref(),
            FieldType::Row => self.row.as_ref(),
            FieldType::Select => self.select.as_ref(),
            FieldType::Tabs => self.tabs.as_ref(),
            FieldType::Text => self.text.as_ref(),
            FieldType::Textarea => self.textarea.as_ref(),
            FieldType::Ui => self.ui.as_ref(),
            FieldType::Upload => self.upload.as_ref(),
        }
    }

    fn slot_mut(&mut self, field_type: FieldType) -> &mut Arc<dyn FieldResolver> {
        match field_type {
            FieldType::Array => &mut self.array,
            FieldType::Blocks => &mut self.blocks,
            FieldType::Checkbox => &mut self.checkbox,
            FieldType::Code => &mut self.code,
            FieldType::Collapsible => &mut self.collapsible,
            FieldType::Date => &mut self.date,
            FieldType::Email => &mut self.email,
            FieldType::Group => &mut self.group,
            FieldType::Join => &mut self.join,
            FieldType::Json => &mut self.json,
            FieldType::Number => &mut self.number,
            FieldType::Point => &mut self.point,
            FieldType::Radio => &mut self.radio,
            FieldType::Relationship => &mut self.relationship,
            FieldType::RichText => &mut self.rich_text,
            FieldType::Row => &mut self.row,
            FieldType::Select => &mut self.select,
            FieldType::Tabs => &mut self.tabs,
            FieldType::Text => &mut self.text,
            FieldType::Textarea => &mut self.textarea,
            FieldType::Ui => &mut self.ui,
            FieldType::Upload => &mut self.upload,
        }
    }
}

impl Default for FieldResolvers {
    fn default() -> Self {
        Self::uniform(Arc::new(SimpleResolver))
            .with(FieldType::Array, ArrayResolver)
            .with(FieldType::Group, GroupResolver)
    }
}
