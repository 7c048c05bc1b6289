//! History command - lists every transaction, newest first.

use crate::commands::{CommandHandler, CommandInput};
use crate::error::AppResult;
use async_trait::async_trait;
use casino_session::wallet::{format_timestamp, signed_amount, transaction_label};
use casino_session::Session;

pub struct HistoryHandler {
    session: Session,
}

impl HistoryHandler {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CommandHandler for HistoryHandler {
    fn trigger(&self) -> &str {
        "!history"
    }

    async fn execute(&self, _input: &CommandInput) -> AppResult<String> {
        let transactions = self
            .session
            .profile()
            .await?
            .map(|p| p.transactions)
            .unwrap_or_default();

        if transactions.is_empty() {
            return Ok("**Transaction History**\n\nNo transactions yet.".into());
        }

        let mut response = String::from("**Transaction History**");
        for tx in transactions.iter().rev() {
            response.push_str(&format!(
                "\n#{} {} {}",
                tx.id,
                transaction_label(tx),
                signed_amount(tx)
            ));
            if let Some(ts) = tx.timestamp {
                response.push_str(&format!(" - {}", format_timestamp(ts)));
            }
            if let Some(description) = &tx.description {
                response.push_str(&format!(" ({})", description));
            }
        }
        Ok(response)
    }
}
