//! Asks the site whether the visitor needs to give consent.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::ConsentConfig;
use crate::error::{ConsentError, ConsentResult};

/// Source of the "does this visitor need to consent" answer.
#[async_trait]
pub trait RequirementProbe: Send + Sync {
    async fn requires_consent(&self) -> ConsentResult<bool>;
}

/// Probe that calls the consent endpoint over HTTP and reads the
/// `requiresConsent` field of the JSON reply.
#[derive(Debug, Clone)]
pub struct HttpRequirementProbe {
    client: Client,
    url: String,
}

impl HttpRequirementProbe {
    pub fn new(base_url: &str, consent_api_path: &str) -> Self {
        Self::with_client(Client::new(), base_url, consent_api_path)
    }

    pub fn with_client(client: Client, base_url: &str, consent_api_path: &str) -> Self {
        let url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            consent_api_path.trim_start_matches('/')
        );
        Self { client, url }
    }

    pub fn from_config(config: &ConsentConfig) -> Self {
        Self::new(&config.base_url, &config.consent_api_path)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RequirementProbe for HttpRequirementProbe {
    async fn requires_consent(&self) -> ConsentResult<bool> {
        debug!(url = %self.url, "probing consent requirement");
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(ConsentError::ProbeStatus(response.status().as_u16()));
        }
        let body: Value = response.json().await?;
        Ok(body.get("requiresConsent").is_some_and(is_truthy))
    }
}

/// Truthiness of a JSON value as a browser script would see it.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
