//! Setup command - completes the caller's initial profile.

use crate::commands::{CommandHandler, CommandInput};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use casino_session::Session;
use tracing::info;

const USAGE: &str = "Usage: !setup <display name> | <date of birth> [| <referral code>]";

pub struct SetupHandler {
    session: Session,
}

impl SetupHandler {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CommandHandler for SetupHandler {
    fn trigger(&self) -> &str {
        "!setup"
    }

    async fn execute(&self, input: &CommandInput) -> AppResult<String> {
        let mut fields = input.rest().split('|').map(str::trim);
        let display_name = fields.next().unwrap_or("");
        let date_of_birth = fields.next().unwrap_or("");
        let referral_code = fields.next().unwrap_or("");
        if display_name.is_empty() || date_of_birth.is_empty() || fields.next().is_some() {
            return Err(AppError::Usage(USAGE.into()));
        }

        self.session
            .setup_profile(display_name, date_of_birth, referral_code)
            .await?;

        info!("Profile set up for {}", display_name);

        let credits = self.session.balance().await?;
        Ok(format!(
            "Welcome, {}! Your balance is {} credits.",
            display_name, credits
        ))
    }
}
