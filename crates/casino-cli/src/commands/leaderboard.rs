//! Leaderboard command - top balances.

use crate::commands::{CommandHandler, CommandInput};
use crate::error::AppResult;
use async_trait::async_trait;
use casino_session::Session;

pub struct LeaderboardHandler {
    session: Session,
}

impl LeaderboardHandler {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CommandHandler for LeaderboardHandler {
    fn trigger(&self) -> &str {
        "!leaderboard"
    }

    async fn execute(&self, _input: &CommandInput) -> AppResult<String> {
        let board = self.session.leaderboard().await?;
        if board.is_empty() {
            return Ok("**Leaderboard**\n\nNo players yet.".into());
        }

        let mut response = String::from("**Leaderboard**");
        for (rank, (principal, credits)) in board.iter().enumerate() {
            response.push_str(&format!("\n{}. {} - {} credits", rank + 1, principal, credits));
        }
        Ok(response)
    }
}
