use async_trait::async_trait;

use super::{FieldResolver, ResolveArgs};
use crate::error::TraverseResult;
use crate::path::FlattenedFieldValue;

/// Emits the field's value unchanged.
pub struct SimpleResolver;

#[async_trait]
impl FieldResolver for SimpleResolver {
    async fn resolve(&self, args: ResolveArgs<'_>) -> TraverseResult<Vec<FlattenedFieldValue>> {
        let value = args.data.clone();
        Ok(vec![args.emit(value)])
    }
}
