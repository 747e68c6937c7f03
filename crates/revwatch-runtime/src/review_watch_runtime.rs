//! Reconciliation loop: drives poll cycles forever and dedups notifications.
//!
//! Each iteration polls, decides whether the result differs from what was last
//! delivered, notifies, then sleeps. Recoverable failures are reported through
//! the same notifier (deduplicated separately) and never stop the loop.

use std::{future::Future, sync::Arc, time::Duration};

use revwatch_core::{Cursor, PollError};
use tracing::{debug, error, info, warn};

use crate::poll_cycle::{run_poll_cycle, PollCycleOutput};
use crate::review_api_client::ReviewStatusSource;
use crate::telegram_notifier::Notifier;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);
const ERROR_NOTIFICATION_PREFIX: &str = "Review watch failure";

#[derive(Debug, Clone)]
/// Runtime configuration for the review watch loop.
pub struct ReviewWatchRuntimeConfig {
    pub chat_id: String,
    pub poll_interval: Duration,
    pub poll_once: bool,
    pub initial_cursor: Cursor,
}

impl ReviewWatchRuntimeConfig {
    pub fn new(chat_id: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_once: false,
            initial_cursor: Cursor::START,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Last successfully delivered text per notification kind.
pub struct NotificationState {
    pub last_message: Option<String>,
    pub last_error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchState {
    pub cursor: Cursor,
    pub notifications: NotificationState,
    /// Consecutive cycles that ended in a reportable error.
    pub failure_streak: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What a single reconciliation cycle did.
pub enum CycleOutcome {
    StatusNotified,
    StatusUnchanged,
    StatusNotifyFailed,
    NoUpdate,
    ErrorNotified { reason_code: &'static str },
    ErrorSuppressed { reason_code: &'static str },
    ErrorNotifyFailed { reason_code: &'static str },
}

impl CycleOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StatusNotified => "status_notified",
            Self::StatusUnchanged => "status_unchanged",
            Self::StatusNotifyFailed => "status_notify_failed",
            Self::NoUpdate => "no_update",
            Self::ErrorNotified { .. } => "error_notified",
            Self::ErrorSuppressed { .. } => "error_suppressed",
            Self::ErrorNotifyFailed { .. } => "error_notify_failed",
        }
    }
}

/// User-facing text sent for a failed cycle.
pub fn render_error_notification(error: &PollError) -> String {
    format!("{ERROR_NOTIFICATION_PREFIX}: {error}")
}

/// Runs the review watch until `shutdown` resolves (or after one cycle in
/// `poll_once` mode).
pub async fn run_review_watch<F>(
    config: ReviewWatchRuntimeConfig,
    source: Arc<dyn ReviewStatusSource>,
    notifier: Arc<dyn Notifier>,
    shutdown: F,
) where
    F: Future<Output = ()>,
{
    let mut runtime = ReviewWatchRuntime::new(config, source, notifier);
    runtime.run_until(shutdown).await;
}

pub struct ReviewWatchRuntime {
    config: ReviewWatchRuntimeConfig,
    source: Arc<dyn ReviewStatusSource>,
    notifier: Arc<dyn Notifier>,
    state: WatchState,
}

impl ReviewWatchRuntime {
    pub fn new(
        config: ReviewWatchRuntimeConfig,
        source: Arc<dyn ReviewStatusSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let state = WatchState {
            cursor: config.initial_cursor,
            ..WatchState::default()
        };
        Self {
            config,
            source,
            notifier,
            state,
        }
    }

    pub fn state(&self) -> &WatchState {
        &self.state
    }

    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!(
            chat_id = %self.config.chat_id,
            from_date = %self.state.cursor,
            poll_interval_seconds = self.config.poll_interval.as_secs(),
            poll_once = self.config.poll_once,
            "review watch started"
        );
        loop {
            let outcome = tokio::select! {
                _ = &mut shutdown => {
                    info!("review watch shutdown requested");
                    return;
                }
                outcome = self.run_cycle() => outcome,
            };
            info!(
                outcome = outcome.as_str(),
                cursor = %self.state.cursor,
                failure_streak = self.state.failure_streak,
                "review watch cycle complete"
            );
            if self.config.poll_once {
                return;
            }

            tokio::select! {
                _ = &mut shutdown => {
                    info!("review watch shutdown requested");
                    return;
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }
    }

    /// Runs one Polling -> Deciding -> Notifying pass.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match run_poll_cycle(self.source.as_ref(), self.state.cursor).await {
            Ok(output) => {
                self.state.failure_streak = 0;
                self.deliver_status(output).await
            }
            Err(error) if error.is_no_update() => {
                self.state.failure_streak = 0;
                debug!(cursor = %self.state.cursor, "no submission updates");
                CycleOutcome::NoUpdate
            }
            Err(error) => {
                self.state.failure_streak = self.state.failure_streak.saturating_add(1);
                self.deliver_error(&error).await
            }
        }
    }

    async fn deliver_status(&mut self, output: PollCycleOutput) -> CycleOutcome {
        let PollCycleOutput {
            message,
            next_cursor,
        } = output;
        // The cursor tracks server time, not delivery history.
        self.state.cursor = next_cursor;

        if self.state.notifications.last_message.as_deref() == Some(message.as_str()) {
            debug!(cursor = %next_cursor, "review status unchanged");
            return CycleOutcome::StatusUnchanged;
        }

        match self.notifier.send(&self.config.chat_id, &message).await {
            Ok(()) => {
                info!(message = %message, "review status notification sent");
                self.state.notifications.last_message = Some(message);
                CycleOutcome::StatusNotified
            }
            Err(send_error) => {
                warn!(error = %send_error, "failed to send review status notification");
                CycleOutcome::StatusNotifyFailed
            }
        }
    }

    async fn deliver_error(&mut self, poll_error: &PollError) -> CycleOutcome {
        let reason_code = poll_error.reason_code();
        error!(
            reason_code,
            failure_streak = self.state.failure_streak,
            error = %poll_error,
            "review watch cycle failed"
        );
        if let PollError::HttpStatus { body, .. } = poll_error {
            debug!(body = %body, "review api error body");
        }

        let text = render_error_notification(poll_error);
        if self.state.notifications.last_error_message.as_deref() == Some(text.as_str()) {
            debug!(reason_code, "error notification suppressed as duplicate");
            return CycleOutcome::ErrorSuppressed { reason_code };
        }

        match self.notifier.send(&self.config.chat_id, &text).await {
            Ok(()) => {
                info!(reason_code, "error notification sent");
                self.state.notifications.last_error_message = Some(text);
                CycleOutcome::ErrorNotified { reason_code }
            }
            Err(send_error) => {
                warn!(reason_code, error = %send_error, "failed to send error notification");
                CycleOutcome::ErrorNotifyFailed { reason_code }
            }
        }
    }
}
