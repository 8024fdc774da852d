//! HTTP endpoints of a cmskit site.
//!
//! - `GET <consent_api_path>` tells the visitor's browser whether it must
//!   ask for cookie consent, based on the country header set by the edge.
//! - `POST /api/select-search` answers select-search fields in the admin UI.

mod config;
mod error;

pub use config::{
    ApiToken, DEFAULT_COUNTRY_HEADER, DEFAULT_PORT, ServerConfig, StaticSearchConfig,
};
pub use error::{ApiError, ErrorBody};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use cmskit_consent::geo::requires_consent_for_country;
use cmskit_search::{SearchResponse, SearchService, SearchUser};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::debug;

pub const SELECT_SEARCH_PATH: &str = "/api/select-search";

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub consent_api_path: String,
    pub country_header: String,
    pub api_tokens: Vec<ApiToken>,
    pub search: SearchService,
}

impl AppState {
    /// The caller behind a `Bearer` token, if the token is known.
    fn authenticate(&self, headers: &HeaderMap) -> Option<SearchUser> {
        let token = headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?
            .trim();
        // Compares against every configured token.
        self.api_tokens
            .iter()
            .fold(None, |found, t| {
                let matches = !t.token.is_empty() && tokens_match(token, &t.token);
                found.or(matches.then_some(t))
            })
            .map(|t| SearchUser::new(t.user.clone()))
    }
}

/// Constant-time token comparison.
fn tokens_match(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRequirement {
    pub requires_consent: bool,
}

async fn consent_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<ConsentRequirement> {
    let country = headers
        .get(state.country_header.as_str())
        .and_then(|v| v.to_str().ok());
    let requires_consent = requires_consent_for_country(country);
    debug!(?country, requires_consent, "consent requirement");
    Json(ConsentRequirement { requires_consent })
}

async fn select_search_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SearchResponse>, ApiError> {
    let user = state.authenticate(&headers);
    let response = state.search.handle(user.as_ref(), &body).await?;
    Ok(Json(response))
}

/// Builds the router for `state`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let consent_path = if state.consent_api_path.starts_with('/') {
        state.consent_api_path.clone()
    } else {
        format!("/{}", state.consent_api_path)
    };
    Router::new()
        .route(&consent_path, get(consent_handler))
        .route(SELECT_SEARCH_PATH, post(select_search_handler))
        .with_state(state)
}
