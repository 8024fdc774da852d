//! Server configuration, loaded from TOML.
//!
//! ```toml
//! port = 3000
//! consent_api_path = "/api/consent"
//! country_header = "x-vercel-ip-country"
//! schema_path = "schema.json"
//!
//! [[api_tokens]]
//! user = "editor"
//! token = "s3cret"
//!
//! [[static_search]]
//! entity_type = "collection"
//! slug = "posts"
//! field_path = "country"
//! options = [{ label = "Germany", value = "DE" }]
//! ```

use anyhow::{Context, Result};
use cmskit_consent::DEFAULT_CONSENT_API_PATH;
use cmskit_model::Config;
use cmskit_search::{
    EntityType, SearchRegistry, SearchService, SelectSearchOption, StaticOptionsSearch,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::AppState;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_COUNTRY_HEADER: &str = "x-vercel-ip-country";

/// A caller allowed to use the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiToken {
    pub user: String,
    pub token: String,
}

/// A select-search field answered from a fixed option list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticSearchConfig {
    pub entity_type: EntityType,
    pub slug: String,
    /// Field path relative to the entity root.
    pub field_path: String,
    #[serde(default)]
    pub options: Vec<SelectSearchOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub consent_api_path: String,
    /// Request header carrying the visitor's country code.
    pub country_header: String,
    pub api_tokens: Vec<ApiToken>,
    /// JSON file holding the site's collections and globals.
    pub schema_path: Option<PathBuf>,
    pub static_search: Vec<StaticSearchConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            consent_api_path: DEFAULT_CONSENT_API_PATH.to_string(),
            country_header: DEFAULT_COUNTRY_HEADER.to_string(),
            api_tokens: Vec::new(),
            schema_path: None,
            static_search: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Loads the config at `path`. A missing file yields the defaults; a
    /// file that cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No server config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read server config {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse server config {}", path.display()))?;
        info!("Loaded server config from {:?}", path);
        Ok(config)
    }

    /// Reads the site schema. Without a `schema_path` the site has no
    /// collections or globals.
    pub fn load_schema(&self) -> Result<Config> {
        let Some(path) = &self.schema_path else {
            return Ok(Config::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema {}", path.display()))?;
        Config::from_json(&json).with_context(|| format!("Failed to parse schema {}", path.display()))
    }

    pub fn search_registry(&self) -> SearchRegistry {
        self.static_search
            .iter()
            .fold(SearchRegistry::new(), |registry, search| {
                registry.with(
                    search.entity_type,
                    search.slug.clone(),
                    search.field_path.clone(),
                    Arc::new(StaticOptionsSearch::new(search.options.clone())),
                )
            })
    }

    /// Builds the shared handler state.
    pub fn build_state(&self) -> Result<AppState> {
        let schema = Arc::new(self.load_schema()?);
        Ok(AppState {
            consent_api_path: self.consent_api_path.clone(),
            country_header: self.country_header.clone(),
            api_tokens: self.api_tokens.clone(),
            search: SearchService::new(schema, self.search_registry()),
        })
    }
}
