use cmskit_model::Document;
use serde_json::json;

fn make_document(data: serde_json::Value) -> Document {
    Document::new("posts", "doc-1", data)
}

// ── Construction & fields ────────────────────────────────────────

#[test]
fn document_new_sets_fields() {
    let d = make_document(json!({"title": "Hello"}));
    assert_eq!(d.id, "doc-1");
    assert_eq!(d.collection, "posts");
    assert_eq!(d.data["title"], json!("Hello"));
}

#[test]
fn document_serde_roundtrip() {
    let d = make_document(json!({"title": "x"}));
    let json = serde_json::to_string(&d).unwrap();
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, "doc-1");
    assert_eq!(back.data, json!({"title": "x"}));
}
