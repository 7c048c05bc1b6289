//! Spin command - spins the wheel and reports the outcome.

use crate::commands::{CommandHandler, CommandInput};
use crate::error::AppResult;
use async_trait::async_trait;
use casino_session::wheel::{is_win, payout, SpinSummary, WheelAnimation};
use casino_session::Session;
use tokio::sync::Mutex;
use tracing::info;

pub struct SpinHandler {
    session: Session,
    wheel: Mutex<WheelAnimation>,
}

impl SpinHandler {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            wheel: Mutex::new(WheelAnimation::new()),
        }
    }
}

#[async_trait]
impl CommandHandler for SpinHandler {
    fn trigger(&self) -> &str {
        "!spin"
    }

    async fn execute(&self, _input: &CommandInput) -> AppResult<String> {
        let result = self.session.spin().await?;
        let rotation = self.wheel.lock().await.spin_to(result.outcome);
        let summary = SpinSummary::from_result(&result);

        info!("Wheel rotated to {} degrees", rotation);

        let mut response = format!("{}\n{}", summary.headline(), summary.description());
        if is_win(result.outcome) {
            response.push_str(&format!(
                " ({})",
                payout(result.outcome).multiplier_label()
            ));
        }
        response.push_str(&format!("\nBalance: {} credits", result.balance_after_spin));
        Ok(response)
    }
}
