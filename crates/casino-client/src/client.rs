//! HTTP client for the casino backend RPC API.

use crate::backend::CasinoBackend;
use crate::error::CasinoError;
use crate::types::*;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// Default retry configuration
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_INITIAL_BACKOFF_MS: u64 = 100;
const DEFAULT_MAX_BACKOFF_MS: u64 = 5000;

/// Casino backend client.
///
/// Every RPC is `POST {base_url}/rpc/{method}` with a JSON array of arguments.
/// The caller identity token, if any, is sent as a bearer token and kept in a
/// `SecretString` so it never shows up in logs or debug output. Without a
/// token the backend treats the caller as a guest.
#[derive(Clone)]
pub struct CasinoClient {
    client: Client,
    base_url: String,
    identity: Option<SecretString>,
    max_retries: u32,
}

impl CasinoClient {
    /// Create a new casino backend client.
    pub fn new(
        base_url: impl Into<String>,
        identity: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CasinoError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            identity: identity.map(SecretString::new),
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Override how many times read-only calls are retried.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Health check - returns true if the backend answers a role query.
    pub async fn health_check(&self) -> bool {
        self.get_caller_user_role().await.is_ok()
    }

    /// Issue one RPC without retrying.
    #[instrument(skip(self, args))]
    async fn call<T: DeserializeOwned>(&self, method: &str, args: Value) -> Result<T, CasinoError> {
        let mut request = self
            .client
            .post(format!("{}/rpc/{}", self.base_url, method))
            .header("Content-Type", "application/json")
            .json(&args);

        if let Some(identity) = &self.identity {
            request = request.header(
                "Authorization",
                format!("Bearer {}", identity.expose_secret()),
            );
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Read-only RPC with exponential backoff on transient failures.
    async fn query<T: DeserializeOwned>(&self, method: &str, args: Value) -> Result<T, CasinoError> {
        let mut backoff_ms = DEFAULT_INITIAL_BACKOFF_MS;
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!("Retry attempt {} for {} after {}ms backoff", attempt, method, backoff_ms);
                sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms = (backoff_ms * 2).min(DEFAULT_MAX_BACKOFF_MS);
            }

            match self.call(method, args.clone()).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => {
                    warn!("{} failed (attempt {}): {}", method, attempt + 1, e);
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(CasinoError::Api {
            status: 0,
            message: "Max retries exceeded".into(),
        }))
    }

    /// State-changing RPC. Never retried.
    async fn update<T: DeserializeOwned>(&self, method: &str, args: Value) -> Result<T, CasinoError> {
        self.call(method, args).await
    }

    /// Handle HTTP response, converting errors appropriately.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, CasinoError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            debug!("Response body: {}", truncate(&body, 200));
            // Unit-returning methods may answer with an empty body.
            let body = if body.trim().is_empty() { "null" } else { body.as_str() };
            serde_json::from_str(body).map_err(CasinoError::from)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract error information from failed response.
    async fn extract_error(&self, response: reqwest::Response) -> CasinoError {
        let status = response.status();

        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Rate limit exceeded");
                CasinoError::RateLimit
            }
            StatusCode::UNAUTHORIZED => {
                warn!("Authentication failed");
                CasinoError::Unauthorized
            }
            _ => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".into());
                let message = error_message(&body);

                match status {
                    StatusCode::FORBIDDEN => CasinoError::Forbidden(message),
                    StatusCode::BAD_REQUEST
                    | StatusCode::CONFLICT
                    | StatusCode::UNPROCESSABLE_ENTITY => CasinoError::Rejected(message),
                    _ => CasinoError::Api {
                        status: status.as_u16(),
                        message,
                    },
                }
            }
        }
    }
}

/// Pull a message out of `{"error": ".."}` / `{"message": ".."}` bodies, else
/// use the body as-is.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .or_else(|| value.get("message"))
                .and_then(Value::as_str)
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

fn truncate(body: &str, max: usize) -> &str {
    match body.char_indices().nth(max) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[async_trait]
impl CasinoBackend for CasinoClient {
    async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>, CasinoError> {
        self.query("getCallerUserProfile", json!([])).await
    }

    async fn complete_initial_profile_setup(
        &self,
        registration: RegistrationData,
    ) -> Result<(), CasinoError> {
        self.update("completeInitialProfileSetup", json!([registration]))
            .await
    }

    async fn get_caller_user_role(&self) -> Result<UserRole, CasinoError> {
        self.query("getCallerUserRole", json!([])).await
    }

    async fn is_caller_admin(&self) -> Result<bool, CasinoError> {
        self.query("isCallerAdmin", json!([])).await
    }

    async fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, CasinoError> {
        self.query("getLeaderboard", json!([])).await
    }

    async fn get_my_credit_transactions(&self) -> Result<Vec<Transaction>, CasinoError> {
        self.query("getMyCreditTransactions", json!([])).await
    }

    async fn get_credit_packages(&self) -> Result<Vec<CreditPackage>, CasinoError> {
        self.query("getCreditPackages", json!([])).await
    }

    async fn spin_wheel(&self) -> Result<SpinResult, CasinoError> {
        self.update("spinWheel", json!([])).await
    }

    async fn create_manual_payment_request(
        &self,
        amount: u64,
        credits: u64,
    ) -> Result<u64, CasinoError> {
        self.update("createManualPaymentRequest", json!([amount, credits]))
            .await
    }

    async fn get_my_manual_payment_requests(
        &self,
    ) -> Result<Vec<ManualPaymentRequest>, CasinoError> {
        self.query("getMyManualPaymentRequests", json!([])).await
    }

    async fn get_manual_payment_request(
        &self,
        request_id: u64,
    ) -> Result<Option<ManualPaymentRequest>, CasinoError> {
        self.query("getManualPaymentRequest", json!([request_id]))
            .await
    }

    async fn get_all_manual_payment_requests(
        &self,
    ) -> Result<Vec<ManualPaymentRequest>, CasinoError> {
        self.query("getAllManualPaymentRequests", json!([])).await
    }

    async fn approve_manual_payment(&self, request_id: u64) -> Result<(), CasinoError> {
        self.update("approveManualPayment", json!([request_id])).await
    }

    async fn decline_manual_payment(&self, request_id: u64) -> Result<(), CasinoError> {
        self.update("declineManualPayment", json!([request_id])).await
    }

    async fn get_manual_payment_config(&self) -> Result<Option<ManualPaymentConfig>, CasinoError> {
        self.query("getManualPaymentConfig", json!([])).await
    }

    async fn set_manual_payment_config(
        &self,
        config: ManualPaymentConfig,
    ) -> Result<(), CasinoError> {
        self.update("setManualPaymentConfig", json!([config])).await
    }

    async fn is_stripe_configured(&self) -> Result<bool, CasinoError> {
        self.query("isStripeConfigured", json!([])).await
    }

    async fn set_stripe_configuration(
        &self,
        config: StripeConfiguration,
    ) -> Result<(), CasinoError> {
        self.update("setStripeConfiguration", json!([config])).await
    }

    async fn get_house_edge_value(&self) -> Result<u64, CasinoError> {
        self.query("getHouseEdgeValue", json!([])).await
    }

    async fn set_house_edge_value(&self, value: u64) -> Result<(), CasinoError> {
        self.update("setHouseEdgeValue", json!([value])).await
    }

    async fn admin_update_credits(
        &self,
        user: PrincipalId,
        new_balance: u64,
    ) -> Result<u64, CasinoError> {
        self.update("adminUpdateCredits", json!([user, new_balance]))
            .await
    }
}
