//! Renders the notification text for one submission record.

use serde_json::Value;

use crate::{DataError, ReviewStatus};

const NAME_FIELD: &str = "name";
const LEGACY_NAME_FIELD: &str = "homework_name";
const STATUS_FIELD: &str = "status";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub name: String,
    pub status: ReviewStatus,
}

/// Validates a raw submission record.
///
/// The production API names the title field `homework_name`; it is read when
/// `name` is absent.
pub fn parse_submission_record(record: &Value) -> Result<SubmissionRecord, DataError> {
    if is_empty_record(record) {
        return Err(DataError::EmptyRecord);
    }
    let object = record.as_object().ok_or(DataError::NotAnObject)?;

    let name = object
        .get(NAME_FIELD)
        .or_else(|| object.get(LEGACY_NAME_FIELD))
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .ok_or(DataError::MissingName)?;

    let status = match object.get(STATUS_FIELD) {
        None | Some(Value::Null) => return Err(DataError::MissingStatus),
        Some(Value::String(raw)) => {
            ReviewStatus::parse(raw).ok_or_else(|| DataError::UnknownStatus(raw.clone()))?
        }
        Some(other) => return Err(DataError::UnknownStatus(other.to_string())),
    };

    Ok(SubmissionRecord {
        name: name.to_string(),
        status,
    })
}

pub fn render_status_message(record: &SubmissionRecord) -> String {
    format!(
        "Status changed for submission \"{}\". {}",
        record.name,
        record.status.verdict()
    )
}

pub fn format_status_message(record: &Value) -> Result<String, DataError> {
    parse_submission_record(record).map(|record| render_status_message(&record))
}

fn is_empty_record(record: &Value) -> bool {
    match record {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}
