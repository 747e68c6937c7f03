mod bootstrap_helpers;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use revwatch_cli::{Cli, WatchConfig};
use revwatch_core::current_unix_timestamp;
use revwatch_runtime::{run_review_watch, ReviewApiClient, TelegramNotifier};

use crate::bootstrap_helpers::{init_tracing, shutdown_signal};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is normal in deployments that export variables directly.
    let _ = dotenvy::dotenv();
    init_tracing();
    let cli = Cli::parse();
    let config = WatchConfig::from_cli(&cli, current_unix_timestamp())
        .context("revwatch cannot start")?;

    let source = ReviewApiClient::new(
        config.endpoint.clone(),
        &config.api_token,
        config.request_timeout_ms,
    )?;
    let notifier = TelegramNotifier::new(
        config.telegram_api_base.clone(),
        config.bot_token.clone(),
        config.request_timeout_ms,
    )?;

    run_review_watch(
        config.runtime_config(),
        Arc::new(source),
        Arc::new(notifier),
        shutdown_signal(),
    )
    .await;
    Ok(())
}
