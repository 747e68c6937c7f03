//! Foundational review-status types shared across revwatch crates.
//!
//! Holds the verdict table, the request cursor, the poll error taxonomy and the
//! pure validation/formatting steps applied to every review API response.

pub mod cursor;
pub mod error;
pub mod response_validator;
pub mod status_formatter;
pub mod time_utils;
pub mod verdict;

pub use cursor::Cursor;
pub use error::{DataError, PollError, SchemaError};
pub use response_validator::{validate_response, ValidatedResponse};
pub use status_formatter::{
    format_status_message, parse_submission_record, render_status_message, SubmissionRecord,
};
pub use time_utils::current_unix_timestamp;
pub use verdict::ReviewStatus;
