//! Validation of admin-supplied settings before they reach the backend.

use crate::error::{SessionError, SessionResult};
use casino_client::{ManualPaymentConfig, StripeConfiguration};

/// Upper bound for the house edge, in basis points (100%).
pub const MAX_HOUSE_EDGE_BPS: u64 = 10_000;

pub fn validate_house_edge(bps: u64) -> SessionResult<u64> {
    if bps > MAX_HOUSE_EDGE_BPS {
        return Err(SessionError::InvalidHouseEdge(bps));
    }
    Ok(bps)
}

/// Trim both fields; both must be non-empty.
pub fn payment_config(
    qr_image_reference: &str,
    instructions: &str,
) -> SessionResult<ManualPaymentConfig> {
    let qr_image_reference = qr_image_reference.trim();
    let instructions = instructions.trim();

    if qr_image_reference.is_empty() || instructions.is_empty() {
        return Err(SessionError::InvalidConfig(
            "QR image reference and instructions are both required".into(),
        ));
    }

    Ok(ManualPaymentConfig {
        qr_image_reference: qr_image_reference.to_string(),
        instructions: instructions.to_string(),
    })
}

/// Parse a comma-separated country list, keeping only two-letter codes.
pub fn parse_allowed_countries(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(|code| code.trim().to_uppercase())
        .filter(|code| code.chars().count() == 2)
        .collect()
}

pub fn stripe_configuration(secret_key: &str, countries_csv: &str) -> SessionResult<StripeConfiguration> {
    let secret_key = secret_key.trim();
    if secret_key.is_empty() {
        return Err(SessionError::InvalidConfig("Secret key is required".into()));
    }

    let allowed_countries = parse_allowed_countries(countries_csv);
    if allowed_countries.is_empty() {
        return Err(SessionError::InvalidConfig(
            "At least one valid country code is required (e.g., US, CA, GB)".into(),
        ));
    }

    Ok(StripeConfiguration {
        secret_key: secret_key.to_string(),
        allowed_countries,
    })
}
