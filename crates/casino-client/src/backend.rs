//! The backend RPC surface as a trait.

use crate::error::CasinoError;
use crate::types::*;
use async_trait::async_trait;

/// Everything the client can ask of the casino backend.
///
/// Queries are read-only. Updates (`complete_*`, `create_*`, `set_*`,
/// `approve_*`, `decline_*`, `admin_*`, `spin_wheel`) change backend state and
/// are never retried by [`CasinoClient`](crate::CasinoClient).
#[async_trait]
pub trait CasinoBackend: Send + Sync {
    async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>, CasinoError>;

    async fn complete_initial_profile_setup(
        &self,
        registration: RegistrationData,
    ) -> Result<(), CasinoError>;

    async fn get_caller_user_role(&self) -> Result<UserRole, CasinoError>;

    async fn is_caller_admin(&self) -> Result<bool, CasinoError>;

    async fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, CasinoError>;

    async fn get_my_credit_transactions(&self) -> Result<Vec<Transaction>, CasinoError>;

    async fn get_credit_packages(&self) -> Result<Vec<CreditPackage>, CasinoError>;

    async fn spin_wheel(&self) -> Result<SpinResult, CasinoError>;

    /// Returns the id of the new request.
    async fn create_manual_payment_request(
        &self,
        amount: u64,
        credits: u64,
    ) -> Result<u64, CasinoError>;

    async fn get_my_manual_payment_requests(
        &self,
    ) -> Result<Vec<ManualPaymentRequest>, CasinoError>;

    async fn get_manual_payment_request(
        &self,
        request_id: u64,
    ) -> Result<Option<ManualPaymentRequest>, CasinoError>;

    async fn get_all_manual_payment_requests(
        &self,
    ) -> Result<Vec<ManualPaymentRequest>, CasinoError>;

    async fn approve_manual_payment(&self, request_id: u64) -> Result<(), CasinoError>;

    async fn decline_manual_payment(&self, request_id: u64) -> Result<(), CasinoError>;

    async fn get_manual_payment_config(&self) -> Result<Option<ManualPaymentConfig>, CasinoError>;

    async fn set_manual_payment_config(&self, config: ManualPaymentConfig)
        -> Result<(), CasinoError>;

    async fn is_stripe_configured(&self) -> Result<bool, CasinoError>;

    async fn set_stripe_configuration(
        &self,
        config: StripeConfiguration,
    ) -> Result<(), CasinoError>;

    /// House edge in basis points.
    async fn get_house_edge_value(&self) -> Result<u64, CasinoError>;

    async fn set_house_edge_value(&self, value: u64) -> Result<(), CasinoError>;

    /// Overwrites a user's balance; returns the new balance.
    async fn admin_update_credits(
        &self,
        user: PrincipalId,
        new_balance: u64,
    ) -> Result<u64, CasinoError>;
}
