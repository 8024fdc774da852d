use cmskit_model::FieldType;
use cmskit_search::{
    CLIENT_PROPS_KEY, DebounceMs, SearchError, SelectSearchConfig, SelectSearchDebounceConfig,
    SelectSearchFieldArgs, SelectSearchOption, StaticOptionsSearch, select_search_field,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn make_config() -> SelectSearchConfig {
    SelectSearchConfig::new(Arc::new(StaticOptionsSearch::new(vec![SelectSearchOption::new(
        "One", "1",
    )])))
}

// ── Client props ─────────────────────────────────────────────────

#[test]
fn defaults() {
    let props = make_config().client_props().unwrap();
    assert_eq!(
        props.debounce,
        DebounceMs {
            query: 300,
            watched_fields: 700
        }
    );
    assert!(!props.pass_data_to_search_function);
    assert!(!props.pass_sibling_data_to_search_function);
    assert!(props.watch_field_paths.is_empty());
}

#[test]
fn debounce_values_are_floored() {
    let config = SelectSearchConfig {
        debounce: SelectSearchDebounceConfig {
            query: Some(150.9),
            watched_fields: Some(0.0),
        },
        ..make_config()
    };
    let props = config.client_props().unwrap();
    assert_eq!(props.debounce.query, 150);
    assert_eq!(props.debounce.watched_fields, 0);
}

#[test]
fn invalid_debounce_names_the_key() {
    let negative = SelectSearchConfig {
        debounce: SelectSearchDebounceConfig {
            query: Some(-1.0),
            watched_fields: None,
        },
        ..make_config()
    };
    let err = negative.client_props().unwrap_err();
    assert_eq!(err, SearchError::InvalidDebounce { key: "query" });
    assert_eq!(
        err.to_string(),
        "Invalid search.debounce.query: expected a finite number >= 0"
    );

    let infinite = SelectSearchConfig {
        debounce: SelectSearchDebounceConfig {
            query: None,
            watched_fields: Some(f64::INFINITY),
        },
        ..make_config()
    };
    assert_eq!(
        infinite.client_props().unwrap_err().to_string(),
        "Invalid search.debounce.watchedFields: expected a finite number >= 0"
    );

    let nan = SelectSearchConfig {
        debounce: SelectSearchDebounceConfig {
            query: Some(f64::NAN),
            watched_fields: None,
        },
        ..make_config()
    };
    assert!(nan.client_props().is_err());
}

#[test]
fn watch_paths_are_normalized() {
    let config = SelectSearchConfig {
        watch_field_paths: vec![
            " title ".to_string(),
            "".to_string(),
            "meta.author".to_string(),
            "title".to_string(),
            "   ".to_string(),
        ],
        ..make_config()
    };
    assert_eq!(
        config.client_props().unwrap().watch_field_paths,
        vec!["meta.author", "title"]
    );
}

// ── Field ────────────────────────────────────────────────────────

#[test]
fn builds_a_text_field_carrying_client_props() {
    let mut args = SelectSearchFieldArgs::new(
        "country",
        SelectSearchConfig {
            pass_sibling_data_to_search_function: true,
            ..make_config()
        },
    );
    args.has_many = true;
    args.custom.insert("owner".to_string(), json!("marketing"));

    let built = select_search_field(args).unwrap();
    assert_eq!(built.field.name, "country");
    assert_eq!(built.field.field_type, FieldType::Text);
    assert!(built.field.has_many);
    assert_eq!(built.field.custom["owner"], json!("marketing"));
    assert_eq!(
        built.field.custom[CLIENT_PROPS_KEY],
        json!({
            "debounce": {"query": 300, "watchedFields": 700},
            "passDataToSearchFunction": false,
            "passSiblingDataToSearchFunction": true,
            "watchFieldPaths": [],
        })
    );
    assert!(built.client_props.pass_sibling_data_to_search_function);
}

#[test]
fn invalid_config_fails_to_build() {
    let args = SelectSearchFieldArgs::new(
        "country",
        SelectSearchConfig {
            debounce: SelectSearchDebounceConfig {
                query: Some(-5.0),
                watched_fields: None,
            },
            ..make_config()
        },
    );
    assert!(select_search_field(args).is_err());
}
