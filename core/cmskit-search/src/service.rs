//! The select-search endpoint, independent of any HTTP framework.

use cmskit_model::{Config, Field, find_field_by_path};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{SearchError, SearchResult};
use crate::function::SearchArgs;
use crate::registry::SearchRegistry;
use crate::types::{EntityType, SearchRequest, SearchResponse, SearchUser};

/// Longest query handed to a search function, in characters.
pub const MAX_QUERY_LENGTH: usize = 200;

/// Answers select-search requests against a site config.
#[derive(Clone)]
pub struct SearchService {
    config: Arc<Config>,
    registry: SearchRegistry,
}

impl SearchService {
    pub fn new(config: Arc<Config>, registry: SearchRegistry) -> Self {
        Self { config, registry }
    }

    pub fn registry(&self) -> &SearchRegistry {
        &self.registry
    }

    /// Handles one request body from `user` (`None` when unauthenticated).
    ///
    /// Checks run in a fixed order: authentication, body, entity type,
    /// slug and path, entity, field, search function.
    pub async fn handle(&self, user: Option<&SearchUser>, body: &[u8]) -> SearchResult<SearchResponse> {
        let user = user.ok_or(SearchError::Unauthorized)?;
        let request = parse_request(body)?;
        debug!(
            user = %user.id,
            entity = %request.entity_type,
            slug = %request.slug,
            path = %request.schema_path,
            "select search"
        );

        let fields = self.entity_fields(request.entity_type, &request.slug)?;
        let field_path = request.field_path();
        let field = find_field_by_path(fields, &field_path).ok_or(SearchError::FieldNotFound)?;
        let function = self
            .registry
            .get(request.entity_type, &request.slug, &field_path)
            .ok_or(SearchError::FieldNotSearchable)?;

        let options = function
            .search(SearchArgs {
                entity_type: request.entity_type,
                slug: &request.slug,
                field,
                query: &request.query,
                selected_values: &request.selected_values,
                data: request.data.as_ref(),
                sibling_data: request.sibling_data.as_ref(),
                user,
            })
            .await
            .map_err(|e| {
                warn!(slug = %request.slug, path = %field_path, error = %e, "search function failed");
                match e {
                    SearchError::SearchFailed(message) => SearchError::SearchFailed(message),
                    other => SearchError::SearchFailed(other.to_string()),
                }
            })?;

        debug!(count = options.len(), "select search answered");
        Ok(SearchResponse { options })
    }

    fn entity_fields(&self, entity_type: EntityType, slug: &str) -> SearchResult<&[Field]> {
        let fields = match entity_type {
            EntityType::Collection => self.config.collection(slug).map(|c| c.fields.as_slice()),
            EntityType::Global => self.config.global(slug).map(|g| g.fields.as_slice()),
        };
        fields.ok_or(SearchError::UnknownEntity)
    }
}

/// Validates a raw request body.
pub fn parse_request(body: &[u8]) -> SearchResult<SearchRequest> {
    let body: Value = serde_json::from_slice(body).map_err(|_| SearchError::InvalidJson)?;
    let Value::Object(body) = body else {
        return Err(SearchError::InvalidJson);
    };

    let entity_type = body
        .get("entityType")
        .and_then(Value::as_str)
        .and_then(EntityType::parse)
        .ok_or(SearchError::InvalidEntityType)?;

    let non_empty = |key: &str| {
        body.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let (Some(slug), Some(schema_path)) = (non_empty("slug"), non_empty("schemaPath")) else {
        return Err(SearchError::MissingSlugOrSchemaPath);
    };

    let query: String = body
        .get("query")
        .filter(|q| is_truthy(q))
        .map(to_js_string)
        .unwrap_or_default()
        .chars()
        .take(MAX_QUERY_LENGTH)
        .collect();
    let selected_values: Vec<String> = body
        .get("selectedValues")
        .and_then(Value::as_array)
        .map(|values| values.iter().map(to_js_string).collect())
        .unwrap_or_default();

    Ok(SearchRequest {
        entity_type,
        slug,
        schema_path,
        query,
        selected_values,
        data: body.get("data").cloned(),
        sibling_data: body.get("siblingData").cloned(),
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Stringifies a JSON value the way a browser script's `String()` would for
/// scalars.
fn to_js_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items
            .iter()
            .map(|v| match v {
                Value::Null => String::new(),
                other => to_js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => js_number_string(f),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
    }
}

/// Whole floats print without a fraction (`1.0` is `"1"`), like JavaScript.
fn js_number_string(f: f64) -> String {
    if f == 0.0 {
        "0".to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_strings() {
        assert_eq!(to_js_string(&serde_json::json!(42)), "42");
        assert_eq!(to_js_string(&serde_json::json!(true)), "true");
        assert_eq!(to_js_string(&serde_json::json!(null)), "null");
        assert_eq!(to_js_string(&serde_json::json!([1, "a", null])), "1,a,");
        assert_eq!(to_js_string(&serde_json::json!({"a": 1})), "[object Object]");
        assert_eq!(to_js_string(&serde_json::json!(1.0)), "1");
        assert_eq!(to_js_string(&serde_json::json!(2.50)), "2.5");
        assert_eq!(to_js_string(&serde_json::json!(-0.0)), "0");
        assert_eq!(to_js_string(&serde_json::json!([1.0, 2.5])), "1,2.5");
    }

    #[test]
    fn field_path_drops_entity_slug() {
        let request = parse_request(
            br#"{"entityType": "collection", "slug": "posts", "schemaPath": "posts.meta.author"}"#,
        )
        .unwrap();
        assert_eq!(request.field_path(), "meta.author");
        assert_eq!(request.query, "");
        assert!(request.selected_values.is_empty());
    }
}
