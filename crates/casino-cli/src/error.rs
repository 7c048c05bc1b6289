//! Application error types.

use casino_session::SessionError;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Backend error: {0}")]
    Casino(#[from] casino_client::CasinoError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("{0}")]
    Usage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// The reply shown to the user for this error.
    ///
    /// Usage and validation problems are explained; infrastructure failures
    /// get a generic apology and are only detailed in the logs.
    pub fn reply(&self) -> String {
        match self {
            AppError::Usage(usage) => usage.clone(),
            AppError::Session(SessionError::Backend(casino_client::CasinoError::Forbidden(_))) => {
                "This command requires admin access.".into()
            }
            AppError::Session(SessionError::Backend(casino_client::CasinoError::Rejected(msg))) => {
                format!("Request refused: {}", msg)
            }
            AppError::Session(SessionError::Backend(_)) => "Sorry, something went wrong.".into(),
            AppError::Session(e) => e.to_string(),
            _ => "Sorry, something went wrong.".into(),
        }
    }
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
