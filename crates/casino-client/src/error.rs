//! Casino backend client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CasinoError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Authentication failed")]
    Unauthorized,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Rejected by backend: {0}")]
    Rejected(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CasinoError {
    /// Transport failures, rate limits and server errors are worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            CasinoError::Http(_) | CasinoError::RateLimit => true,
            CasinoError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
