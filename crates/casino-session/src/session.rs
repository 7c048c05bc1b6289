//! Cached queries and mutations against the casino backend.

use crate::admin;
use crate::cache::{CacheValue, QueryCache, QueryData, QueryKey};
use crate::error::{SessionError, SessionResult};
use crate::profile;
use crate::wheel::SPIN_COST;
use casino_client::{
    CasinoBackend, CasinoError, CreditPackage, LeaderboardEntry, ManualPaymentConfig,
    ManualPaymentRequest, PrincipalId, RegistrationData, SpinResult, Transaction, UserProfile,
};
use credit_pricing::{CustomPricing, Quote};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Default time a query result is served from cache.
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(30);

/// A submitted top-up awaiting admin approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub request_id: u64,
    pub amount: u64,
    pub credits: u64,
}

/// A signed-in user's view of the backend.
///
/// Reads go through the [`QueryCache`]; a failed read or mutation leaves the
/// cache as it was. Successful mutations invalidate the reads they affect.
#[derive(Clone)]
pub struct Session {
    backend: Arc<dyn CasinoBackend>,
    cache: QueryCache,
    caller: Option<PrincipalId>,
}

impl Session {
    pub fn new(backend: Arc<dyn CasinoBackend>, stale_time: Duration) -> Self {
        Self {
            backend,
            cache: QueryCache::new(stale_time),
            caller: None,
        }
    }

    /// Record the caller's own principal, used to refuse self-referrals.
    pub fn with_caller(mut self, caller: Option<PrincipalId>) -> Self {
        self.caller = caller;
        self
    }

    pub fn caller(&self) -> Option<&str> {
        self.caller.as_deref()
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Serve `key` from cache while fresh, otherwise await `fetch` and cache it.
    async fn fetch_query<T, F>(&self, key: QueryKey, fetch: F) -> SessionResult<T>
    where
        T: CacheValue,
        F: Future<Output = Result<T, CasinoError>>,
    {
        if let Some(value) = self.cache.get_fresh::<T>(&key).await {
            debug!("Cache hit for {:?}", key);
            return Ok(value);
        }

        let generation = self.cache.generation(&key).await;
        let value = fetch.await?;
        self.cache.set_if_current(key, value.clone(), generation).await;
        Ok(value)
    }

    // Profile

    pub async fn profile(&self) -> SessionResult<Option<UserProfile>> {
        self.fetch_query(
            QueryKey::CurrentUserProfile,
            self.backend.get_caller_user_profile(),
        )
        .await
    }

    /// Current balance, `0` when the user has no profile yet.
    pub async fn balance(&self) -> SessionResult<u64> {
        Ok(self.profile().await?.map(|p| p.credits).unwrap_or(0))
    }

    /// Validate setup input and register the profile. A blank referral code
    /// registers without a referrer.
    pub async fn setup_profile(
        &self,
        display_name: &str,
        date_of_birth: &str,
        referral_code: &str,
    ) -> SessionResult<()> {
        let registration =
            profile::registration(display_name, date_of_birth, referral_code, self.caller())?;
        self.complete_profile_setup(registration).await
    }

    #[instrument(skip(self, registration))]
    pub async fn complete_profile_setup(&self, registration: RegistrationData) -> SessionResult<()> {
        self.backend
            .complete_initial_profile_setup(registration)
            .await?;
        self.cache.invalidate(&[QueryKey::CurrentUserProfile]).await;
        Ok(())
    }

    pub async fn is_admin(&self) -> SessionResult<bool> {
        self.fetch_query(QueryKey::IsCallerAdmin, self.backend.is_caller_admin())
            .await
    }

    pub async fn leaderboard(&self) -> SessionResult<Vec<LeaderboardEntry>> {
        self.fetch_query(QueryKey::Leaderboard, self.backend.get_leaderboard())
            .await
    }

    pub async fn my_transactions(&self) -> SessionResult<Vec<Transaction>> {
        self.fetch_query(
            QueryKey::MyTransactions,
            self.backend.get_my_credit_transactions(),
        )
        .await
    }

    // Wheel

    /// Spin the wheel.
    ///
    /// Refuses without a round trip when the known balance is below
    /// [`SPIN_COST`]. On success the cached profile takes the new balance and
    /// spin result right away, and profile, transactions and leaderboard are
    /// invalidated so the next read confirms them.
    #[instrument(skip(self))]
    pub async fn spin(&self) -> SessionResult<SpinResult> {
        let available = self.balance().await?;
        if available < SPIN_COST {
            return Err(SessionError::InsufficientBalance {
                required: SPIN_COST,
                available,
            });
        }

        let result = self.backend.spin_wheel().await?;
        info!(
            "Spin landed on {} (profit {}, balance {})",
            result.outcome, result.profit, result.balance_after_spin
        );

        let optimistic = result.clone();
        self.cache
            .update(&QueryKey::CurrentUserProfile, move |data| {
                if let QueryData::Profile(Some(profile)) = data {
                    profile.credits = optimistic.balance_after_spin;
                    profile.last_spin_result = Some(optimistic);
                }
            })
            .await;

        self.cache
            .invalidate(&[
                QueryKey::CurrentUserProfile,
                QueryKey::MyTransactions,
                QueryKey::Leaderboard,
            ])
            .await;

        Ok(result)
    }

    // Credits

    pub async fn credit_packages(&self) -> SessionResult<Vec<CreditPackage>> {
        self.fetch_query(QueryKey::CreditPackages, self.backend.get_credit_packages())
            .await
    }

    /// Pricing over the current package list.
    pub async fn pricing(&self) -> SessionResult<CustomPricing> {
        Ok(CustomPricing::new(&self.credit_packages().await?))
    }

    /// Price a custom amount. `None` when pricing is unavailable.
    pub async fn quote(&self, amount: f64) -> SessionResult<Option<Quote>> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(SessionError::InvalidAmount(
                "amount must be a positive number".into(),
            ));
        }
        Ok(self.pricing().await?.quote(amount))
    }

    /// Submit a manual payment request for `amount` rupees.
    ///
    /// Credits are priced client-side from the package list; nothing is
    /// submitted when pricing is unavailable, the amount buys no credits, or
    /// manual payments are not configured.
    #[instrument(skip(self))]
    pub async fn buy_credits(&self, amount: u64) -> SessionResult<PurchaseReceipt> {
        if amount == 0 {
            return Err(SessionError::InvalidAmount("amount must be positive".into()));
        }

        let pricing = self.pricing().await?;
        if !pricing.is_available() {
            return Err(SessionError::PricingUnavailable);
        }

        let credits = pricing.credits_for(amount as f64);
        if credits == 0 {
            return Err(SessionError::InvalidAmount(format!(
                "{} is too small to buy a credit",
                amount
            )));
        }

        if self.payment_config().await?.is_none() {
            return Err(SessionError::PaymentsNotConfigured);
        }

        let request_id = self
            .backend
            .create_manual_payment_request(amount, credits)
            .await?;
        info!(
            "Created manual payment request {} ({} for {} credits)",
            request_id, amount, credits
        );

        self.cache
            .invalidate(&[QueryKey::MyManualPaymentRequests])
            .await;

        Ok(PurchaseReceipt {
            request_id,
            amount,
            credits,
        })
    }

    pub async fn my_payment_requests(&self) -> SessionResult<Vec<ManualPaymentRequest>> {
        self.fetch_query(
            QueryKey::MyManualPaymentRequests,
            self.backend.get_my_manual_payment_requests(),
        )
        .await
    }

    /// Look up one payment request. Id `0` means "none"; lookup failures are
    /// logged and reported as missing.
    pub async fn payment_request(&self, request_id: u64) -> SessionResult<Option<ManualPaymentRequest>> {
        if request_id == 0 {
            return Ok(None);
        }

        let backend = self.backend.clone();
        self.fetch_query(QueryKey::ManualPaymentRequest(request_id), async move {
            match backend.get_manual_payment_request(request_id).await {
                Ok(request) => Ok(request),
                Err(e) => {
                    warn!("Failed to fetch payment request {}: {}", request_id, e);
                    Ok(None)
                }
            }
        })
        .await
    }

    pub async fn payment_config(&self) -> SessionResult<Option<ManualPaymentConfig>> {
        self.fetch_query(
            QueryKey::ManualPaymentConfig,
            self.backend.get_manual_payment_config(),
        )
        .await
    }

    // Admin

    pub async fn all_payment_requests(&self) -> SessionResult<Vec<ManualPaymentRequest>> {
        self.fetch_query(
            QueryKey::AllManualPaymentRequests,
            self.backend.get_all_manual_payment_requests(),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn approve_payment(&self, request_id: u64) -> SessionResult<()> {
        self.backend.approve_manual_payment(request_id).await?;
        info!("Approved payment request {}", request_id);
        self.invalidate_payment_requests(request_id).await;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn decline_payment(&self, request_id: u64) -> SessionResult<()> {
        self.backend.decline_manual_payment(request_id).await?;
        info!("Declined payment request {}", request_id);
        self.invalidate_payment_requests(request_id).await;
        Ok(())
    }

    async fn invalidate_payment_requests(&self, request_id: u64) {
        self.cache
            .invalidate(&[
                QueryKey::AllManualPaymentRequests,
                QueryKey::MyManualPaymentRequests,
                QueryKey::ManualPaymentRequest(request_id),
            ])
            .await;
    }

    #[instrument(skip(self, instructions))]
    pub async fn set_payment_config(
        &self,
        qr_image_reference: &str,
        instructions: &str,
    ) -> SessionResult<()> {
        let config = admin::payment_config(qr_image_reference, instructions)?;
        self.backend.set_manual_payment_config(config).await?;
        self.cache.invalidate(&[QueryKey::ManualPaymentConfig]).await;
        Ok(())
    }

    /// House edge in basis points.
    pub async fn house_edge(&self) -> SessionResult<u64> {
        self.fetch_query(QueryKey::HouseEdge, self.backend.get_house_edge_value())
            .await
    }

    #[instrument(skip(self))]
    pub async fn set_house_edge(&self, bps: u64) -> SessionResult<()> {
        let bps = admin::validate_house_edge(bps)?;
        self.backend.set_house_edge_value(bps).await?;
        info!("House edge set to {} bps", bps);
        self.cache.invalidate(&[QueryKey::HouseEdge]).await;
        Ok(())
    }

    pub async fn is_stripe_configured(&self) -> SessionResult<bool> {
        self.fetch_query(
            QueryKey::IsStripeConfigured,
            self.backend.is_stripe_configured(),
        )
        .await
    }

    #[instrument(skip(self, secret_key))]
    pub async fn set_stripe_configuration(
        &self,
        secret_key: &str,
        countries_csv: &str,
    ) -> SessionResult<()> {
        let config = admin::stripe_configuration(secret_key, countries_csv)?;
        self.backend.set_stripe_configuration(config).await?;
        self.cache.invalidate(&[QueryKey::IsStripeConfigured]).await;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn admin_update_credits(&self, user: PrincipalId, new_balance: u64) -> SessionResult<u64> {
        let balance = self.backend.admin_update_credits(user, new_balance).await?;
        self.cache.invalidate(&[QueryKey::Leaderboard]).await;
        Ok(balance)
    }
}
