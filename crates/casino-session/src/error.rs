//! Session errors.

use casino_client::CasinoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Backend error: {0}")]
    Backend(#[from] CasinoError),

    #[error("Insufficient credits: required {required}, available {available}")]
    InsufficientBalance { required: u64, available: u64 },

    #[error("Custom pricing is unavailable: no priced credit packages")]
    PricingUnavailable,

    #[error("Manual payments are not configured")]
    PaymentsNotConfigured,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid house edge {0}: must be between 0 and 10000 basis points")]
    InvalidHouseEdge(u64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid referral code format")]
    InvalidReferralCode,

    #[error("You cannot refer yourself")]
    SelfReferral,
}

pub type SessionResult<T> = Result<T, SessionError>;
