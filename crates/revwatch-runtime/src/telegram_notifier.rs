//! Telegram Bot API delivery for status and error notifications.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::transport_helpers::{describe_transport_error, truncate_for_error};

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const TELEGRAM_SAFE_MAX_CHARS: usize = 4096;
// Leaves room for the truncation marker.
const TELEGRAM_TEXT_MAX_CHARS: usize = TELEGRAM_SAFE_MAX_CHARS - 3;
const HTTP_ERROR_BODY_MAX_CHARS: usize = 800;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Best-effort delivery failure; never fatal to the watch loop.
pub enum NotifyError {
    #[error("notification request failed: {0}")]
    Transport(String),
    #[error("notification endpoint returned HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("notification rejected: {0}")]
    Rejected(String),
}

#[async_trait]
/// Outbound chat delivery.
pub trait Notifier: Send + Sync {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, Deserialize)]
struct TelegramSendResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Clone)]
pub struct TelegramNotifier {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
}

impl TelegramNotifier {
    pub fn new(api_base: String, bot_token: String, request_timeout_ms: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create telegram client")?;
        Ok(Self {
            http,
            api_base: api_base.trim().trim_end_matches('/').to_string(),
            bot_token: bot_token.trim().to_string(),
        })
    }

    fn send_message_endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), NotifyError> {
        let payload = json!({
            "chat_id": chat_id.trim(),
            "text": truncate_for_error(text, TELEGRAM_TEXT_MAX_CHARS),
            "disable_web_page_preview": true
        });
        let response = self
            .http
            .post(self.send_message_endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|error| NotifyError::Transport(describe_transport_error(error)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| NotifyError::Transport(describe_transport_error(error)))?;
        if !status.is_success() {
            return Err(NotifyError::HttpStatus {
                status: status.as_u16(),
                body: truncate_for_error(&body, HTTP_ERROR_BODY_MAX_CHARS),
            });
        }

        let parsed = serde_json::from_str::<TelegramSendResponse>(&body).map_err(|error| {
            NotifyError::Rejected(format!("unreadable sendMessage response: {error}"))
        })?;
        if !parsed.ok {
            return Err(NotifyError::Rejected(
                parsed
                    .description
                    .unwrap_or_else(|| "telegram returned ok=false".to_string()),
            ));
        }
        debug!(chat_id = chat_id.trim(), "telegram message delivered");
        Ok(())
    }
}
