//! HTTP client for the review-status API.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use revwatch_core::{Cursor, PollError};
use serde_json::Value;
use tracing::debug;

use crate::transport_helpers::{describe_transport_error, truncate_for_error};

pub const DEFAULT_REVIEW_API_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";
const HTTP_ERROR_BODY_MAX_CHARS: usize = 800;

#[async_trait]
/// Source of review-status responses, one request per poll cycle.
pub trait ReviewStatusSource: Send + Sync {
    /// Fetches every update at or after `cursor`, decoded but not validated.
    async fn fetch(&self, cursor: Cursor) -> Result<Value, PollError>;
}

#[derive(Clone)]
pub struct ReviewApiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ReviewApiClient {
    pub fn new(endpoint: String, token: &str, request_timeout_ms: u64) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("revwatch"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let mut auth_header =
            reqwest::header::HeaderValue::from_str(&format!("OAuth {}", token.trim()))
                .context("invalid review api authorization header")?;
        auth_header.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth_header);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create review api client")?;
        Ok(Self {
            http,
            endpoint: endpoint.trim().to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReviewStatusSource for ReviewApiClient {
    async fn fetch(&self, cursor: Cursor) -> Result<Value, PollError> {
        debug!(endpoint = %self.endpoint, from_date = %cursor, "requesting review statuses");
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("from_date", cursor.as_i64())])
            .send()
            .await
            .map_err(|error| PollError::Transport(describe_transport_error(error)))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(PollError::HttpStatus {
                status: status.as_u16(),
                body: truncate_for_error(&body, HTTP_ERROR_BODY_MAX_CHARS),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|error| PollError::Transport(describe_transport_error(error)))?;
        serde_json::from_slice::<Value>(&bytes)
            .map_err(|error| PollError::PayloadDecode(error.to_string()))
    }
}
