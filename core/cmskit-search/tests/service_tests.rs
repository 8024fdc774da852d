use async_trait::async_trait;
use cmskit_model::{CollectionConfig, Config, Field, GlobalConfig};
use cmskit_search::{
    EntityType, MAX_QUERY_LENGTH, SearchArgs, SearchError, SearchFunction, SearchRegistry,
    SearchResult, SearchService, SearchUser, SelectSearchConfig, SelectSearchFieldArgs,
    SelectSearchOption, StaticOptionsSearch, select_search_field,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// Records the last call and echoes the query back as an option.
#[derive(Default)]
struct RecordingSearch {
    last: Mutex<Option<(String, Vec<String>, Option<Value>, String)>>,
}

#[async_trait]
impl SearchFunction for RecordingSearch {
    async fn search(&self, args: SearchArgs<'_>) -> SearchResult<Vec<SelectSearchOption>> {
        *self.last.lock().unwrap() = Some((
            args.query.to_string(),
            args.selected_values.to_vec(),
            args.sibling_data.cloned(),
            args.field.name.clone(),
        ));
        Ok(vec![SelectSearchOption::new(args.query, args.query)])
    }
}

struct FailingSearch;

#[async_trait]
impl SearchFunction for FailingSearch {
    async fn search(&self, _args: SearchArgs<'_>) -> SearchResult<Vec<SelectSearchOption>> {
        Err(SearchError::SearchFailed("upstream unavailable".to_string()))
    }
}

fn countries() -> StaticOptionsSearch {
    StaticOptionsSearch::new(vec![
        SelectSearchOption::new("Germany", "DE"),
        SelectSearchOption::new("France", "FR").with_extra("flag", json!("fr")),
        SelectSearchOption::new("United States", "US"),
    ])
}

fn make_service(recording: Arc<RecordingSearch>) -> SearchService {
    let country = select_search_field(SelectSearchFieldArgs::new(
        "country",
        SelectSearchConfig::new(Arc::new(countries())),
    ))
    .unwrap();

    let config = Config::default()
        .with_collection(CollectionConfig::new(
            "posts",
            vec![
                country.field.clone(),
                Field::group("meta", vec![Field::text("author")]),
                Field::text("plain"),
                Field::text("broken"),
            ],
        ))
        .with_global(GlobalConfig {
            slug: "settings".to_string(),
            fields: vec![Field::text("region")],
        });

    let mut registry = SearchRegistry::new()
        .with(EntityType::Collection, "posts", "meta.author", recording.clone())
        .with(EntityType::Collection, "posts", "broken", Arc::new(FailingSearch))
        .with(EntityType::Global, "settings", "region", recording);
    registry.register_field(EntityType::Collection, "posts", "", &country);

    SearchService::new(Arc::new(config), registry)
}

fn user() -> SearchUser {
    SearchUser::new("editor-1")
}

async fn search(service: &SearchService, body: Value) -> SearchResult<Vec<SelectSearchOption>> {
    service
        .handle(Some(&user()), body.to_string().as_bytes())
        .await
        .map(|r| r.options)
}

// ── Request validation ───────────────────────────────────────────

#[tokio::test]
async fn unauthenticated_is_rejected_first() {
    let service = make_service(Arc::default());
    let err = service.handle(None, b"not json").await.unwrap_err();
    assert_eq!(err, SearchError::Unauthorized);
    assert_eq!(err.status_code(), 401);
}

#[tokio::test]
async fn invalid_json_body() {
    let service = make_service(Arc::default());
    let err = service.handle(Some(&user()), b"{nope").await.unwrap_err();
    assert_eq!(err, SearchError::InvalidJson);
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.to_string(), "Invalid JSON body");
}

#[tokio::test]
async fn invalid_entity_type() {
    let service = make_service(Arc::default());
    for body in [
        json!({"slug": "posts", "schemaPath": "posts.country"}),
        json!({"entityType": "page", "slug": "posts", "schemaPath": "posts.country"}),
    ] {
        assert_eq!(search(&service, body).await.unwrap_err(), SearchError::InvalidEntityType);
    }
}

#[tokio::test]
async fn missing_slug_or_schema_path() {
    let service = make_service(Arc::default());
    for body in [
        json!({"entityType": "collection", "schemaPath": "posts.country"}),
        json!({"entityType": "collection", "slug": "posts"}),
        json!({"entityType": "collection", "slug": "", "schemaPath": "posts.country"}),
    ] {
        let err = search(&service, body).await.unwrap_err();
        assert_eq!(err, SearchError::MissingSlugOrSchemaPath);
        assert_eq!(err.to_string(), "Missing slug or schemaPath");
    }
}

#[tokio::test]
async fn unknown_entity_is_not_found() {
    let service = make_service(Arc::default());
    let err = search(
        &service,
        json!({"entityType": "global", "slug": "posts", "schemaPath": "posts.country"}),
    )
    .await
    .unwrap_err();
    assert_eq!(err, SearchError::UnknownEntity);
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn unknown_field() {
    let service = make_service(Arc::default());
    let err = search(
        &service,
        json!({"entityType": "collection", "slug": "posts", "schemaPath": "posts.nope"}),
    )
    .await
    .unwrap_err();
    assert_eq!(err, SearchError::FieldNotFound);
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn field_without_search_function() {
    let service = make_service(Arc::default());
    let err = search(
        &service,
        json!({"entityType": "collection", "slug": "posts", "schemaPath": "posts.plain"}),
    )
    .await
    .unwrap_err();
    assert_eq!(err, SearchError::FieldNotSearchable);
    assert_eq!(err.to_string(), "Field not searchable");
}

#[tokio::test]
async fn search_function_failure_is_a_server_error() {
    let service = make_service(Arc::default());
    let err = search(
        &service,
        json!({"entityType": "collection", "slug": "posts", "schemaPath": "posts.broken"}),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert_eq!(err.to_string(), "Search failed: upstream unavailable");
}

// ── Searching ────────────────────────────────────────────────────

#[tokio::test]
async fn static_options_filter_and_keep_selected() {
    let service = make_service(Arc::default());
    let options = search(
        &service,
        json!({
            "entityType": "collection",
            "slug": "posts",
            "schemaPath": "posts.country",
            "query": "fra",
            "selectedValues": ["US"],
        }),
    )
    .await
    .unwrap();

    let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["FR", "US"]);
    assert_eq!(options[0].extra["flag"], json!("fr"));
}

#[tokio::test]
async fn empty_query_returns_every_option() {
    let service = make_service(Arc::default());
    let options = search(
        &service,
        json!({"entityType": "collection", "slug": "posts", "schemaPath": "posts.country"}),
    )
    .await
    .unwrap();
    assert_eq!(options.len(), 3);
}

#[tokio::test]
async fn nested_field_gets_normalized_arguments() {
    let recording = Arc::new(RecordingSearch::default());
    let service = make_service(recording.clone());
    let long_query = "x".repeat(MAX_QUERY_LENGTH + 50);

    search(
        &service,
        json!({
            "entityType": "collection",
            "slug": "posts",
            "schemaPath": "posts.meta.author",
            "query": long_query,
            "selectedValues": [1, true, "a"],
            "siblingData": {"author": "Ada"},
        }),
    )
    .await
    .unwrap();

    let (query, selected, sibling, field) = recording.last.lock().unwrap().clone().unwrap();
    assert_eq!(query.chars().count(), MAX_QUERY_LENGTH);
    assert_eq!(selected, vec!["1", "true", "a"]);
    assert_eq!(sibling, Some(json!({"author": "Ada"})));
    assert_eq!(field, "author");
}

#[tokio::test]
async fn numeric_query_is_stringified() {
    let recording = Arc::new(RecordingSearch::default());
    let service = make_service(recording.clone());
    let options = search(
        &service,
        json!({"entityType": "global", "slug": "settings", "schemaPath": "settings.region", "query": 42}),
    )
    .await
    .unwrap();
    assert_eq!(options, vec![SelectSearchOption::new("42", "42")]);
}

#[tokio::test]
async fn float_selected_values_are_stringified_like_the_browser() {
    let recording = Arc::new(RecordingSearch::default());
    let service = make_service(recording.clone());
    search(
        &service,
        json!({
            "entityType": "global",
            "slug": "settings",
            "schemaPath": "settings.region",
            "query": "eu",
            "selectedValues": [1.0, 2.50, -3],
        }),
    )
    .await
    .unwrap();

    let (_, selected, _, _) = recording.last.lock().unwrap().clone().unwrap();
    assert_eq!(selected, vec!["1", "2.5", "-3"]);
}
