use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::field::Field;

/// Localization capability injected by the host. cmskit never ships
/// translation tables of its own.
pub trait Localizer: Send + Sync {
    /// Active language code, e.g. `"en"`.
    fn language(&self) -> &str;

    /// Language tried when a label has no entry for [`Localizer::language`].
    fn fallback_language(&self) -> &str {
        "en"
    }

    /// Looks up a translation key. Unknown keys come back unchanged.
    fn t(&self, key: &str) -> String;
}

/// Plain in-memory [`Localizer`].
#[derive(Debug, Clone)]
pub struct I18n {
    pub language: String,
    pub fallback_language: String,
    pub messages: HashMap<String, String>,
}

impl I18n {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            fallback_language: "en".to_string(),
            messages: HashMap::new(),
        }
    }

    pub fn with_message(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.messages.insert(key.into(), value.into());
        self
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new("en")
    }
}

impl Localizer for I18n {
    fn language(&self) -> &str {
        &self.language
    }

    fn fallback_language(&self) -> &str {
        &self.fallback_language
    }

    fn t(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// A label computed from the localization context at resolve time.
#[derive(Clone)]
pub struct LabelFn(Arc<dyn Fn(&dyn Localizer) -> String + Send + Sync>);

impl LabelFn {
    pub fn new(f: impl Fn(&dyn Localizer) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, localizer: &dyn Localizer) -> String {
        (self.0)(localizer)
    }
}

impl fmt::Debug for LabelFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LabelFn(..)")
    }
}

/// A field label as declared in config.
///
/// Dynamic labels only exist in code-built configs; they are skipped when
/// (de)serializing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Static(String),
    /// Language code → label.
    Translations(BTreeMap<String, String>),
    #[serde(skip)]
    Dynamic(LabelFn),
}

impl Label {
    pub fn dynamic(f: impl Fn(&dyn Localizer) -> String + Send + Sync + 'static) -> Self {
        Label::Dynamic(LabelFn::new(f))
    }

    /// Resolves the label for the localizer's language.
    ///
    /// Translation tables try the active language, then the fallback
    /// language, then the first entry.
    pub fn resolve(&self, localizer: &dyn Localizer) -> Option<String> {
        let resolved = match self {
            Label::Static(s) => Some(s.clone()),
            Label::Translations(table) => table
                .get(localizer.language())
                .or_else(|| table.get(localizer.fallback_language()))
                .or_else(|| table.values().next())
                .cloned(),
            Label::Dynamic(f) => Some(f.call(localizer)),
        };
        resolved.filter(|s| !s.is_empty())
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Static(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Static(s)
    }
}

/// Resolves a field's label, or `None` when it has none (callers fall back
/// to the data key).
pub fn resolve_field_label(field: &Field, localizer: &dyn Localizer) -> Option<String> {
    field.label.as_ref().and_then(|l| l.resolve(localizer))
}
