use cmskit_search::EntityType;
use cmskit_server::{DEFAULT_COUNTRY_HEADER, DEFAULT_PORT, ServerConfig};
use pretty_assertions::assert_eq;

#[test]
fn missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig::load(&dir.path().join("cmskit.toml")).unwrap();
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.consent_api_path, "/api/consent");
    assert_eq!(config.country_header, DEFAULT_COUNTRY_HEADER);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cmskit.toml");
    std::fs::write(
        &path,
        r#"
port = 8080

[[api_tokens]]
user = "editor"
token = "s3cret"

[[static_search]]
entity_type = "global"
slug = "settings"
field_path = "region"
options = [{ label = "Europe", value = "eu" }]
"#,
    )
    .unwrap();

    let config = ServerConfig::load(&path).unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.consent_api_path, "/api/consent");
    assert_eq!(config.api_tokens[0].user, "editor");
    assert_eq!(config.static_search[0].entity_type, EntityType::Global);
    assert_eq!(config.static_search[0].options[0].value, "eu");

    let registry = config.search_registry();
    assert!(registry.get(EntityType::Global, "settings", "region").is_some());
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cmskit.toml");
    std::fs::write(&path, "port = \"not a port\"").unwrap();

    let err = ServerConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse server config"));
}

#[test]
fn schema_is_loaded_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("schema.json");
    std::fs::write(
        &schema,
        r#"{"collections":[{"slug":"posts","fields":[{"name":"title","type":"text"}]}],
            "globals":[{"slug":"settings","fields":[]}]}"#,
    )
    .unwrap();

    let config = ServerConfig {
        schema_path: Some(schema),
        ..ServerConfig::default()
    };
    let loaded = config.load_schema().unwrap();
    assert!(loaded.collection("posts").is_some());
    assert!(loaded.global("settings").is_some());
}

#[test]
fn missing_schema_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        schema_path: Some(dir.path().join("nope.json")),
        ..ServerConfig::default()
    };
    assert!(config.build_state().is_err());
}

#[test]
fn no_schema_means_empty_site() {
    let loaded = ServerConfig::default().load_schema().unwrap();
    assert!(loaded.collections.is_empty());
    assert!(loaded.globals.is_empty());
}
