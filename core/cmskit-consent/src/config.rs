//! Consent configuration, loaded from TOML.
//!
//! ```toml
//! strategy = "require-before-loading"
//! consent_api_path = "/api/consent"
//! base_url = "https://example.com"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::strategy::ConsentStrategy;

pub const DEFAULT_CONSENT_API_PATH: &str = "/api/consent";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentConfig {
    pub strategy: ConsentStrategy,
    /// Path of the consent requirement endpoint.
    pub consent_api_path: String,
    /// Origin the endpoint is served from.
    pub base_url: String,
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            strategy: ConsentStrategy::default(),
            consent_api_path: DEFAULT_CONSENT_API_PATH.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ConsentConfig {
    /// Loads the config at `path`. A missing or malformed file yields the
    /// defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No consent config at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ConsentConfig>(&contents) {
                Ok(config) => {
                    info!(strategy = %config.strategy, "Loaded consent config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse consent config {:?}: {}. Falling back to defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read consent config {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
