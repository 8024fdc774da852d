use cmskit_model::{
    CollectionConfig, Config, Field, FieldType, GlobalConfig, ModelError, SchemaLookup, SchemaMap,
    Tab,
};
use pretty_assertions::assert_eq;

fn make_posts_config() -> Config {
    Config::default().with_collection(CollectionConfig::new(
        "posts",
        vec![
            Field::text("title"),
            Field::row(vec![Field::text("subtitle"), Field::date("publishedOn")]),
            Field::group("meta", vec![Field::text("author"), Field::number("readTime")]),
            Field::array("tags", vec![Field::text("label")]),
            Field::tabs(vec![
                Tab {
                    name: None,
                    label: None,
                    fields: vec![Field::rich_text("body")],
                },
                Tab {
                    name: Some("seo".to_string()),
                    label: Some("SEO".into()),
                    fields: vec![Field::text("description")],
                },
            ]),
            Field::date("updatedAt"),
        ],
    ))
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn schema_map_follows_declaration_order() {
    let map = make_posts_config().schema_map("posts").unwrap();
    let keys: Vec<&str> = map.keys().collect();
    assert_eq!(
        keys,
        vec![
            "posts.title",
            "posts.subtitle",
            "posts.publishedOn",
            "posts.meta",
            "posts.meta.author",
            "posts.meta.readTime",
            "posts.tags",
            "posts.tags.label",
            "posts.body",
            "posts.seo",
            "posts.seo.description",
            "posts.updatedAt",
        ]
    );
}

#[test]
fn row_children_are_hoisted() {
    let map = make_posts_config().schema_map("posts").unwrap();
    assert!(map.get("posts.subtitle").is_some());
    assert!(map.keys().all(|k| !k.contains("row")));
}

#[test]
fn named_tab_is_registered_as_group() {
    let map = make_posts_config().schema_map("posts").unwrap();
    let seo = map.get("posts.seo").unwrap();
    assert_eq!(seo.field_type, FieldType::Group);
    assert_eq!(seo.fields.len(), 1);
}

#[test]
fn positions_match_key_order() {
    let map = make_posts_config().schema_map("posts").unwrap();
    for (i, key) in map.keys().enumerate() {
        assert_eq!(map.position(key), Some(i));
    }
    assert_eq!(map.position("posts.nope"), None);
}

#[test]
fn reinsert_keeps_position() {
    let mut map = SchemaMap::new();
    map.insert("c.a", Field::text("a"));
    map.insert("c.b", Field::text("b"));
    map.insert("c.a", Field::number("a"));

    assert_eq!(map.len(), 2);
    assert_eq!(map.position("c.a"), Some(0));
    assert_eq!(map.get("c.a").unwrap().field_type, FieldType::Number);
}

#[test]
fn empty_map() {
    let map = SchemaMap::new();
    assert!(map.is_empty());
    assert_eq!(map.iter().count(), 0);
}

// ── SchemaLookup ─────────────────────────────────────────────────

#[test]
fn lookup_resolves_globals() {
    let config = Config::default().with_global(GlobalConfig {
        slug: "settings".to_string(),
        fields: vec![Field::text("siteName")],
    });
    let map = config.schema_map("settings").unwrap();
    assert!(map.get("settings.siteName").is_some());
}

#[test]
fn lookup_unknown_slug_errors() {
    let err = make_posts_config().schema_map("nope").unwrap_err();
    assert!(matches!(err, ModelError::UnknownCollection(ref s) if s == "nope"));
    assert_eq!(err.to_string(), "unknown collection: nope");
}

// ── FieldType ────────────────────────────────────────────────────

#[test]
fn field_type_serializes_camel_case() {
    assert_eq!(serde_json::to_string(&FieldType::RichText).unwrap(), "\"richText\"");
    let parsed: FieldType = serde_json::from_str("\"textarea\"").unwrap();
    assert_eq!(parsed, FieldType::Textarea);
}

#[test]
fn field_type_as_str_matches_serde() {
    for ft in FieldType::ALL {
        let json = serde_json::to_string(&ft).unwrap();
        assert_eq!(json, format!("\"{}\"", ft.as_str()));
    }
}

#[test]
fn presentational_types() {
    assert!(FieldType::Row.is_presentational());
    assert!(FieldType::Tabs.is_presentational());
    assert!(!FieldType::Group.is_presentational());
    assert!(!FieldType::Array.is_presentational());
}
