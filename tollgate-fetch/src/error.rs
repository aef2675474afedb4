//! Fetch error types.

use thiserror::Error;

/// Error type for gateway API calls.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by the gateway.
    #[error("Rate limited, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after: Option<u64>,
    },

    /// Missing, invalid or expired credentials.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The gateway answered with `success: false`.
    #[error("API error: {message}")]
    Api {
        /// Message reported by the gateway.
        message: String,
    },

    /// Unexpected HTTP status or body shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid base URL or path.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] tollgate_core::CoreError),
}

impl FetchError {
    /// Returns true if this is a transient error that might succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(e) => e.is_connect() || e.is_timeout(),
            FetchError::RateLimited { .. } => true,
            _ => false,
        }
    }

    /// Returns true if the gateway rejected the credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, FetchError::AuthenticationFailed(_))
    }
}
