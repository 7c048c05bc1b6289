//! Records exchanged with the casino backend.

use serde::{Deserialize, Serialize};

pub use credit_pricing::CreditPackage;

/// Textual principal identifying a user.
pub type PrincipalId = String;

/// Wheel segment the backend landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Tiger,
    Dragon,
    Miss,
    Crit,
}

impl GameOutcome {
    pub const ALL: [GameOutcome; 4] = [
        GameOutcome::Tiger,
        GameOutcome::Dragon,
        GameOutcome::Miss,
        GameOutcome::Crit,
    ];
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::Tiger => write!(f, "TIGER"),
            GameOutcome::Dragon => write!(f, "DRAGON"),
            GameOutcome::Miss => write!(f, "MISS"),
            GameOutcome::Crit => write!(f, "CRIT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    GameSpin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    Guest,
}

/// A ledger entry on a user's account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub transaction_type: TransactionType,
    pub user: PrincipalId,
    pub amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcall_type: Option<String>,
    /// Nanoseconds since the Unix epoch. Older backends omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

/// Result of a single wheel spin, as decided by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResult {
    pub user: PrincipalId,
    pub balance_after_spin: u64,
    pub profit: i64,
    pub outcome: GameOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    pub credits: u64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub bonus_granted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_spin_result: Option<SpinResult>,
}

/// Data submitted when a new user finishes onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationData {
    pub display_name: String,
    pub date_of_birth: String,
    #[serde(default)]
    pub referrer: Option<PrincipalId>,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManualPaymentRequestStatus {
    Pending,
    Approved,
    Declined,
}

impl std::fmt::Display for ManualPaymentRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManualPaymentRequestStatus::Pending => write!(f, "Pending"),
            ManualPaymentRequestStatus::Approved => write!(f, "Approved"),
            ManualPaymentRequestStatus::Declined => write!(f, "Declined"),
        }
    }
}

/// A user's claim of an off-band payment awaiting admin review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualPaymentRequest {
    pub id: u64,
    pub user: PrincipalId,
    /// Amount paid, in whole rupees.
    pub amount: u64,
    /// Credits granted on approval.
    #[serde(default)]
    pub credits: u64,
    pub status: ManualPaymentRequestStatus,
    /// Nanoseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<u64>,
}

/// QR code and instructions shown to users paying manually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualPaymentConfig {
    pub qr_image_reference: String,
    pub instructions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeConfiguration {
    pub secret_key: String,
    pub allowed_countries: Vec<String>,
}

/// One leaderboard row: principal and credit balance.
pub type LeaderboardEntry = (PrincipalId, u64);
