//! Command handlers.

mod admin;
mod balance;
mod buy;
mod help;
mod history;
mod leaderboard;
mod packages;
mod setup;
mod spin;

pub use admin::{
    HouseEdgeHandler, PaymentConfigHandler, PendingHandler, ReviewAction, ReviewHandler,
    SetCreditsHandler, StripeHandler,
};
pub use balance::BalanceHandler;
pub use buy::{BuyHandler, QuoteHandler, RequestsHandler};
pub use help::HelpHandler;
pub use history::HistoryHandler;
pub use leaderboard::LeaderboardHandler;
pub use packages::PackagesHandler;
pub use setup::SetupHandler;
pub use spin::SpinHandler;

use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use casino_session::Session;

/// One line of user input, e.g. `!quote 250`.
#[derive(Debug, Clone)]
pub struct CommandInput {
    pub text: String,
}

impl CommandInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The leading `!word`.
    pub fn command(&self) -> &str {
        self.text.split_whitespace().next().unwrap_or("")
    }

    /// Whitespace-separated arguments after the command.
    pub fn args(&self) -> Vec<&str> {
        self.text.split_whitespace().skip(1).collect()
    }

    /// Everything after the command, untrimmed inside.
    pub fn rest(&self) -> &str {
        let text = self.text.trim_start();
        text.find(char::is_whitespace)
            .map(|idx| text[idx..].trim())
            .unwrap_or("")
    }

    /// Parse the argument at `index`, or fail with `usage`.
    pub fn parse_arg<T: std::str::FromStr>(&self, index: usize, usage: &str) -> AppResult<T> {
        self.args()
            .get(index)
            .and_then(|arg| arg.parse().ok())
            .ok_or_else(|| AppError::Usage(format!("Usage: {}", usage)))
    }
}

/// Command handler trait.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command trigger (e.g., "!help").
    fn trigger(&self) -> &str;

    /// Check if this handler matches the input.
    fn matches(&self, input: &CommandInput) -> bool {
        input.command() == self.trigger()
    }

    /// Execute the command.
    async fn execute(&self, input: &CommandInput) -> AppResult<String>;
}

/// Requires the caller to be an admin before running an admin command.
pub(crate) async fn require_admin(session: &Session) -> AppResult<()> {
    if session.is_admin().await? {
        Ok(())
    } else {
        Err(AppError::Usage("This command requires admin access.".into()))
    }
}

/// Every handler, user commands first.
pub fn default_handlers(session: Session) -> Vec<Box<dyn CommandHandler>> {
    vec![
        Box::new(HelpHandler::new()),
        Box::new(SetupHandler::new(session.clone())),
        Box::new(BalanceHandler::new(session.clone())),
        Box::new(HistoryHandler::new(session.clone())),
        Box::new(SpinHandler::new(session.clone())),
        Box::new(PackagesHandler::new(session.clone())),
        Box::new(QuoteHandler::new(session.clone())),
        Box::new(BuyHandler::new(session.clone())),
        Box::new(RequestsHandler::new(session.clone())),
        Box::new(LeaderboardHandler::new(session.clone())),
        Box::new(PendingHandler::new(session.clone())),
        Box::new(ReviewHandler::new(session.clone(), ReviewAction::Approve)),
        Box::new(ReviewHandler::new(session.clone(), ReviewAction::Decline)),
        Box::new(HouseEdgeHandler::new(session.clone())),
        Box::new(PaymentConfigHandler::new(session.clone())),
        Box::new(StripeHandler::new(session.clone())),
        Box::new(SetCreditsHandler::new(session)),
    ]
}
