//! Error taxonomy for a single poll cycle.
//!
//! Every variant of [`PollError`] is recoverable: the reconciliation loop
//! reports it (except [`PollError::NoUpdate`]) and retries on the next
//! scheduled cycle. Fatal startup problems live in the CLI crate.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Decoded review API response does not have the expected shape.
pub enum SchemaError {
    #[error("response is not an object")]
    NotAnObject,
    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("response field `homeworks` is not a list")]
    HomeworksNotAList,
    #[error("response field `current_date` is not an integer timestamp")]
    CurrentDateNotAnInteger,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Newest submission record is unusable.
pub enum DataError {
    #[error("submission record is empty")]
    EmptyRecord,
    #[error("submission record is not an object")]
    NotAnObject,
    #[error("submission record is missing `name`")]
    MissingName,
    #[error("submission record is missing `status`")]
    MissingStatus,
    #[error("unknown submission status: {0}")]
    UnknownStatus(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure of one fetch-validate-format pass.
pub enum PollError {
    #[error("review api request failed: {0}")]
    Transport(String),
    /// `body` is kept for logs only so that repeated outages render identically.
    #[error("review api returned HTTP status {status}")]
    HttpStatus { status: u16, body: String },
    #[error("review api payload could not be decoded: {0}")]
    PayloadDecode(String),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("no submission updates since the current cursor")]
    NoUpdate,
    #[error(transparent)]
    Data(#[from] DataError),
}

impl PollError {
    /// Stable label for structured logs.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::HttpStatus { .. } => "http_status",
            Self::PayloadDecode(_) => "payload_decode",
            Self::Schema(_) => "schema",
            Self::NoUpdate => "no_update",
            Self::Data(_) => "data",
        }
    }

    /// Empty submission list; expected and never surfaced to the user.
    pub fn is_no_update(&self) -> bool {
        matches!(self, Self::NoUpdate)
    }
}
