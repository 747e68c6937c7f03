//! One fetch-validate-format pass.
//!
//! No retries, sleeping or notification happen here; the reconciliation loop
//! owns all of that.

use revwatch_core::{format_status_message, validate_response, Cursor, PollError};
use tracing::debug;

use crate::review_api_client::ReviewStatusSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollCycleOutput {
    pub message: String,
    pub next_cursor: Cursor,
}

pub async fn run_poll_cycle(
    source: &dyn ReviewStatusSource,
    cursor: Cursor,
) -> Result<PollCycleOutput, PollError> {
    let response = source.fetch(cursor).await?;
    debug!(from_date = %cursor, %response, "review api response");
    let validated = validate_response(&response)?;
    let message = format_status_message(&validated.newest)?;
    Ok(PollCycleOutput {
        message,
        next_cursor: validated.current_date,
    })
}
