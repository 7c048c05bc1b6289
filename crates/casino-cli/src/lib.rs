//! Credit Wheel command-line front end.
//!
//! Reads `!command` lines and answers them against the casino backend through
//! a cached [`Session`](casino_session::Session).

pub mod commands;
pub mod config;
pub mod error;

use commands::{CommandHandler, CommandInput};
use tracing::{error, warn};

/// Route one input line to its handler and produce the reply.
///
/// Blank lines produce no reply. Handler errors are logged and turned into a
/// user-facing message.
pub async fn dispatch(handlers: &[Box<dyn CommandHandler>], line: &str) -> Option<String> {
    let input = CommandInput::new(line.trim());
    if input.text.is_empty() {
        return None;
    }

    let Some(handler) = handlers.iter().find(|h| h.matches(&input)) else {
        warn!("Unknown command: {}", input.command());
        return Some(format!(
            "Unknown command `{}`. Send `!help` for the command list.",
            input.command()
        ));
    };

    match handler.execute(&input).await {
        Ok(response) => Some(response),
        Err(e) => {
            error!("Handler error for {}: {}", handler.trigger(), e);
            Some(e.reply())
        }
    }
}
