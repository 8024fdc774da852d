//! Rich text to plain text.
//!
//! Rich text values are Lexical editor states:
//! `{ "root": { "type": "root", "children": [ … ] } }`. Every node has a
//! `type`; element nodes carry `children`, text nodes carry `text`.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::{FieldResolver, ResolveArgs};
use crate::error::TraverseResult;
use crate::path::FlattenedFieldValue;

/// Converts one node to plain text. Receives the node and the already
/// converted text of its children.
pub trait PlaintextConverter: Send + Sync {
    fn convert(&self, node: &Value, children_text: &str) -> String;
}

impl<F> PlaintextConverter for F
where
    F: Fn(&Value, &str) -> String + Send + Sync,
{
    fn convert(&self, node: &Value, children_text: &str) -> String {
        self(node, children_text)
    }
}

/// Node-type specific converters, consulted before the built-in handling.
#[derive(Clone, Default)]
pub struct PlaintextConverters {
    by_type: HashMap<String, Arc<dyn PlaintextConverter>>,
}

impl PlaintextConverters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, node_type: impl Into<String>, converter: impl PlaintextConverter + 'static) -> Self {
        self.by_type.insert(node_type.into(), Arc::new(converter));
        self
    }

    fn get(&self, node_type: &str) -> Option<&dyn PlaintextConverter> {
        self.by_type.get(node_type).map(|c| c.as_ref())
    }
}

/// Block-level siblings under the root are separated by a blank line,
/// siblings inside a list by a single newline and everything else is
/// concatenated.
pub fn convert_lexical_to_plaintext(data: &Value, converters: &PlaintextConverters) -> String {
    let Some(root) = data.get("root").filter(|r| r.is_object()) else {
        return String::new();
    };
    convert_node(root, converters)
}

fn convert_node(node: &Value, converters: &PlaintextConverters) -> String {
    let node_type = node.get("type").and_then(Value::as_str).unwrap_or_default();
    let children_text = convert_children(node, node_type, converters);

    if let Some(converter) = converters.get(node_type) {
        return converter.convert(node, &children_text);
    }
    match node_type {
        "text" => node
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        "linebreak" => "\n".to_string(),
        "tab" => "\t".to_string(),
        _ => children_text,
    }
}

fn convert_children(node: &Value, node_type: &str, converters: &PlaintextConverters) -> String {
    let Some(children) = node.get("children").and_then(Value::as_array) else {
        return String::new();
    };
    let separator = match node_type {
        "root" => "\n\n",
        "list" => "\n",
        _ => "",
    };
    children
        .iter()
        .map(|child| convert_node(child, converters))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Resolves a rich text field to its plain text.
#[derive(Clone, Default)]
pub struct RichTextPlaintextResolver {
    converters: PlaintextConverters,
}

impl RichTextPlaintextResolver {
    pub fn new(converters: PlaintextConverters) -> Self {
        Self { converters }
    }
}

#[async_trait]
impl FieldResolver for RichTextPlaintextResolver {
    async fn resolve(&self, args: ResolveArgs<'_>) -> TraverseResult<Vec<FlattenedFieldValue>> {
        let text = convert_lexical_to_plaintext(args.data, &self.converters);
        Ok(vec![args.emit(Value::String(text))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(t: &str) -> Value {
        json!({"type": "text", "text": t})
    }

    #[test]
    fn paragraphs_are_separated_by_blank_lines() {
        let state = json!({"root": {"type": "root", "children": [
            {"type": "paragraph", "children": [text("Hello "), text("world")]},
            {"type": "paragraph", "children": [text("Second")]},
        ]}});
        assert_eq!(
            convert_lexical_to_plaintext(&state, &PlaintextConverters::default()),
            "Hello world\n\nSecond"
        );
    }

    #[test]
    fn linebreaks_tabs_and_lists() {
        let state = json!({"root": {"type": "root", "children": [
            {"type": "paragraph", "children": [text("a"), {"type": "linebreak"}, {"type": "tab"}, text("b")]},
            {"type": "list", "children": [
                {"type": "listitem", "children": [text("one")]},
                {"type": "listitem", "children": [text("two")]},
            ]},
        ]}});
        assert_eq!(
            convert_lexical_to_plaintext(&state, &PlaintextConverters::default()),
            "a\n\tb\n\none\ntwo"
        );
    }

    #[test]
    fn custom_converter_wins() {
        let converters = PlaintextConverters::new().with("heading", |_: &Value, children: &str| {
            children.to_uppercase()
        });
        let state = json!({"root": {"type": "root", "children": [
            {"type": "heading", "tag": "h1", "children": [text("title")]},
        ]}});
        assert_eq!(convert_lexical_to_plaintext(&state, &converters), "TITLE");
    }

    #[test]
    fn non_editor_state_is_empty() {
        let converters = PlaintextConverters::default();
        assert_eq!(convert_lexical_to_plaintext(&json!(null), &converters), "");
        assert_eq!(convert_lexical_to_plaintext(&json!("plain"), &converters), "");
        assert_eq!(convert_lexical_to_plaintext(&json!({"root": 1}), &converters), "");
    }
}
