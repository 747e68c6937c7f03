//! Review-status watch runtime.
//!
//! Hosts the HTTP collaborators (review API source, Telegram notifier), the
//! single poll cycle and the reconciliation loop that dedups notifications.

pub mod poll_cycle;
pub mod review_api_client;
pub mod review_watch_runtime;
pub mod telegram_notifier;
pub mod transport_helpers;

pub use poll_cycle::{run_poll_cycle, PollCycleOutput};
pub use review_api_client::{ReviewApiClient, ReviewStatusSource, DEFAULT_REVIEW_API_ENDPOINT};
pub use review_watch_runtime::{
    render_error_notification, run_review_watch, CycleOutcome, NotificationState,
    ReviewWatchRuntime, ReviewWatchRuntimeConfig, WatchState, DEFAULT_POLL_INTERVAL,
};
pub use telegram_notifier::{Notifier, NotifyError, TelegramNotifier, DEFAULT_TELEGRAM_API_BASE};
