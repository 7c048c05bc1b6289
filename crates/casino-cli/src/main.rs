//! Credit Wheel CLI - Main entry point.

use anyhow::Context;
use casino_cli::commands::default_handlers;
use casino_cli::config::Config;
use casino_cli::dispatch;
use casino_cli::error::AppResult;
use casino_client::CasinoClient;
use casino_session::Session;
use secrecy::ExposeSecret;
use std::sync::Arc;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.app.log_level);

    info!("Starting Credit Wheel...");

    let client = CasinoClient::new(
        &config.backend.url,
        config
            .backend
            .identity
            .as_ref()
            .map(|identity| identity.expose_secret().clone()),
        config.backend.timeout,
    )
    .context("Failed to create backend client")?
    .with_max_retries(config.backend.max_retries);

    if !client.is_authenticated() {
        warn!("No identity configured - playing as guest");
    }

    if client.health_check().await {
        info!("Backend healthy at {}", client.base_url());
    } else {
        warn!("Backend health check failed - will retry on requests");
    }

    let session = Session::new(Arc::new(client), config.session.stale_time)
        .with_caller(config.backend.principal.clone());
    info!(
        "Query cache ready (stale_time={:?})",
        config.session.stale_time
    );

    let handlers = default_handlers(session);
    info!("Registered {} command handlers", handlers.len());
    println!("Send `!help` for the command list.");

    let mut lines = LinesStream::new(BufReader::new(stdin()).lines());

    // Main input loop
    loop {
        tokio::select! {
            line = lines.next() => {
                match line {
                    Some(Ok(line)) => {
                        if let Some(reply) = dispatch(&handlers, &line).await {
                            println!("{}\n", reply);
                        }
                    }
                    Some(Err(e)) => {
                        error!("Failed to read input: {}", e);
                        return Err(e.into());
                    }
                    None => break,
                }
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
