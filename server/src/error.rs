//! Error responses.
//!
//! Every failure is answered with `{"error": "<message>"}` and the status
//! of the underlying error.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cmskit_search::SearchError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error type of the HTTP handlers.
#[derive(Debug)]
pub struct ApiError(pub SearchError);

impl ApiError {
    fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
