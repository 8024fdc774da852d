//! Persisted visitor decisions.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

use crate::error::ConsentResult;
use crate::strategy::UserDecision;

/// Key the decision is stored under.
pub const DECISION_KEY: &str = "cookiesAllowed";

/// Single-key storage for the visitor's decision. Writes are
/// last-writer-wins.
pub trait DecisionStore: Send + Sync {
    /// The stored raw value, if any.
    fn load_raw(&self) -> ConsentResult<Option<String>>;

    fn save_raw(&self, value: &str) -> ConsentResult<()>;

    /// The stored decision. Unrecognized values count as no decision.
    fn load(&self) -> ConsentResult<Option<UserDecision>> {
        Ok(self
            .load_raw()?
            .as_deref()
            .and_then(UserDecision::from_stored))
    }

    fn save(&self, decision: UserDecision) -> ConsentResult<()> {
        self.save_raw(decision.as_stored())
    }
}

/// Keeps the decision in memory for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryDecisionStore {
    value: Mutex<Option<String>>,
}

impl MemoryDecisionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `value` as its raw content.
    pub fn with_raw(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }

    pub fn with_decision(decision: UserDecision) -> Self {
        Self::with_raw(decision.as_stored())
    }
}

impl DecisionStore for MemoryDecisionStore {
    fn load_raw(&self) -> ConsentResult<Option<String>> {
        let value = self.value.lock().unwrap_or_else(|e| e.into_inner());
        Ok(value.clone())
    }

    fn save_raw(&self, value: &str) -> ConsentResult<()> {
        let mut slot = self.value.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(value.to_string());
        Ok(())
    }
}

/// Stores the decision in a JSON object file, next to any other keys the
/// file already holds.
#[derive(Debug, Clone)]
pub struct FileDecisionStore {
    path: PathBuf,
}

impl FileDecisionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> ConsentResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }
}

impl DecisionStore for FileDecisionStore {
    fn load_raw(&self) -> ConsentResult<Option<String>> {
        let entries = self.read_entries()?;
        Ok(entries.get(DECISION_KEY).and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }))
    }

    fn save_raw(&self, value: &str) -> ConsentResult<()> {
        let mut entries = self.read_entries()?;
        entries.insert(DECISION_KEY.to_string(), Value::String(value.to_string()));
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        debug!(path = ?self.path, value, "stored consent decision");
        Ok(())
    }
}
