//! Wallet views over transactions and payment requests.

use casino_client::{ManualPaymentRequest, ManualPaymentRequestStatus, Transaction, TransactionType};
use chrono::{DateTime, Utc};

/// Number of transactions on the wallet overview.
pub const RECENT_TRANSACTIONS: usize = 5;

/// The last `limit` transactions, newest first.
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    transactions.iter().rev().take(limit).collect()
}

pub fn transaction_label(tx: &Transaction) -> &'static str {
    match tx.transaction_type {
        TransactionType::Deposit => "Deposit",
        TransactionType::Withdrawal => "Withdrawal",
        TransactionType::GameSpin => "Game Spin",
    }
}

/// Amount with its direction: `+` for deposits, `-` for everything else.
pub fn signed_amount(tx: &Transaction) -> String {
    match tx.transaction_type {
        TransactionType::Deposit => format!("+{}", tx.amount),
        _ => format!("-{}", tx.amount),
    }
}

/// Render a backend timestamp (nanoseconds since epoch).
pub fn format_timestamp(nanos: u64) -> String {
    let secs = (nanos / 1_000_000_000) as i64;
    let subsec = (nanos % 1_000_000_000) as u32;
    DateTime::<Utc>::from_timestamp(secs, subsec)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Payment requests split by review status.
///
/// Pending requests keep backend order (oldest first, the review queue);
/// approved and declined requests are newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestsByStatus {
    pub pending: Vec<ManualPaymentRequest>,
    pub approved: Vec<ManualPaymentRequest>,
    pub declined: Vec<ManualPaymentRequest>,
}

impl RequestsByStatus {
    pub fn partition(requests: &[ManualPaymentRequest]) -> Self {
        let mut grouped = Self::default();
        for request in requests {
            match request.status {
                ManualPaymentRequestStatus::Pending => grouped.pending.push(request.clone()),
                ManualPaymentRequestStatus::Approved => grouped.approved.push(request.clone()),
                ManualPaymentRequestStatus::Declined => grouped.declined.push(request.clone()),
            }
        }
        grouped.approved.reverse();
        grouped.declined.reverse();
        grouped
    }
}
