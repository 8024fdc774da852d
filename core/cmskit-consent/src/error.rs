//! Consent error types.

use thiserror::Error;

/// Result type for consent operations.
pub type ConsentResult<T> = Result<T, ConsentError>;

/// Errors raised by stores and probes. The engine itself never surfaces
/// these; it logs them and falls back to a safe default.
#[derive(Debug, Error)]
pub enum ConsentError {
    #[error("decision store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("decision store is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("consent requirement request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("consent requirement endpoint returned HTTP {0}")]
    ProbeStatus(u16),

    #[error("unknown consent strategy: {0}")]
    UnknownStrategy(String),

    #[error("no async runtime to run the requirement probe on")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
