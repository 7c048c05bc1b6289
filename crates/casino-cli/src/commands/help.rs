//! Help command - displays available commands.

use crate::commands::{CommandHandler, CommandInput};
use crate::error::AppResult;
use async_trait::async_trait;

pub struct HelpHandler;

impl HelpHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HelpHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for HelpHandler {
    fn trigger(&self) -> &str {
        "!help"
    }

    async fn execute(&self, _input: &CommandInput) -> AppResult<String> {
        Ok(r#"**Credit Wheel**

**Commands:**
- !setup <name> | <date of birth> [| <referral code>] - Create your profile
- !balance - Show your balance and recent activity
- !history - Show all transactions
- !spin - Spin the wheel (50 credits)
- !packages - List credit packages
- !quote <amount> - Credits for a custom rupee amount
- !buy <amount> - Request credits for a manual payment
- !requests - Show your payment requests
- !leaderboard - Top balances
- !help - Show this message

**Admin:**
- !pending - Review payment requests
- !approve <id> / !decline <id> - Resolve a payment request
- !house-edge [bps] - Show or set the house edge (0-10000)
- !payment-config [qr | instructions] - Show or set manual payment details
- !stripe <secret-key> <countries> - Configure card payments
- !set-credits <principal> <balance> - Overwrite a balance"#
            .into())
    }
}
