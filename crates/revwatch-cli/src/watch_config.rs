//! Startup configuration validation.
//!
//! Missing credentials are the only fatal condition in the process: they are
//! detected here, before any client is built or any request is sent.

use std::{fmt, time::Duration};

use revwatch_core::Cursor;
use revwatch_runtime::ReviewWatchRuntimeConfig;
use thiserror::Error;

use crate::Cli;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<&'static str>),
}

#[derive(Clone)]
/// Validated configuration for one revwatch process.
pub struct WatchConfig {
    pub api_token: String,
    pub bot_token: String,
    pub chat_id: String,
    pub endpoint: String,
    pub telegram_api_base: String,
    pub poll_interval: Duration,
    pub request_timeout_ms: u64,
    pub initial_cursor: Cursor,
    pub poll_once: bool,
}

impl fmt::Debug for WatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchConfig")
            .field("api_token", &"<redacted>")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_base", &self.telegram_api_base)
            .field("poll_interval", &self.poll_interval)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("initial_cursor", &self.initial_cursor)
            .field("poll_once", &self.poll_once)
            .finish()
    }
}

fn required(value: Option<&str>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value.to_string(),
        None => {
            missing.push(name);
            String::new()
        }
    }
}

impl WatchConfig {
    /// Validates parsed arguments; `now_unix` anchors `--lookback-seconds`.
    pub fn from_cli(cli: &Cli, now_unix: u64) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let api_token = required(cli.api_token.as_deref(), "API_TOKEN", &mut missing);
        let bot_token = required(cli.bot_token.as_deref(), "BOT_TOKEN", &mut missing);
        let chat_id = required(cli.chat_id.as_deref(), "CHAT_ID", &mut missing);
        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables(missing));
        }

        let initial_cursor = match cli.lookback_seconds {
            Some(seconds) => Cursor::lookback_from(now_unix, seconds),
            None => Cursor::new(cli.from_date),
        };

        Ok(Self {
            api_token,
            bot_token,
            chat_id,
            endpoint: cli.endpoint.trim().to_string(),
            telegram_api_base: cli.telegram_api_base.trim().to_string(),
            poll_interval: Duration::from_secs(cli.poll_interval_seconds.max(1)),
            request_timeout_ms: cli.request_timeout_ms.max(1),
            initial_cursor,
            poll_once: cli.poll_once,
        })
    }

    pub fn runtime_config(&self) -> ReviewWatchRuntimeConfig {
        ReviewWatchRuntimeConfig {
            chat_id: self.chat_id.clone(),
            poll_interval: self.poll_interval,
            poll_once: self.poll_once,
            initial_cursor: self.initial_cursor,
        }
    }
}
