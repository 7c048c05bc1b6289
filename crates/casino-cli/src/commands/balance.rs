//! Balance command - shows the caller's balance and recent transactions.

use crate::commands::{CommandHandler, CommandInput};
use crate::error::AppResult;
use async_trait::async_trait;
use casino_session::wallet::{recent_transactions, signed_amount, transaction_label, RECENT_TRANSACTIONS};
use casino_session::Session;
use tracing::info;

pub struct BalanceHandler {
    session: Session,
}

impl BalanceHandler {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CommandHandler for BalanceHandler {
    fn trigger(&self) -> &str {
        "!balance"
    }

    async fn execute(&self, _input: &CommandInput) -> AppResult<String> {
        let Some(profile) = self.session.profile().await? else {
            return Ok("**Your Balance**\n\n\
                       No profile yet. Finish profile setup to receive your welcome bonus."
                .into());
        };

        info!("Balance check: {} credits", profile.credits);

        let mut response = format!("**Your Balance**\n\nCredits: {}", profile.credits);
        if !profile.display_name.is_empty() {
            response.push_str(&format!("\nPlayer: {}", profile.display_name));
        }
        if profile.bonus_granted {
            response.push_str("\nWelcome bonus received");
        }

        let recent = recent_transactions(&profile.transactions, RECENT_TRANSACTIONS);
        if recent.is_empty() {
            response.push_str("\n\nNo transactions yet.");
        } else {
            response.push_str("\n\n**Recent Activity**");
            for tx in recent {
                response.push_str(&format!(
                    "\n- {} {}",
                    transaction_label(tx),
                    signed_amount(tx)
                ));
                if let Some(description) = &tx.description {
                    response.push_str(&format!(" ({})", description));
                }
            }
        }

        response.push_str("\n\nUse `!buy <amount>` to add credits.");
        Ok(response)
    }
}
