//! Shape checks for a decoded review API response.

use serde_json::Value;

use crate::{Cursor, PollError, SchemaError};

const HOMEWORKS_FIELD: &str = "homeworks";
const CURRENT_DATE_FIELD: &str = "current_date";

#[derive(Debug, Clone, PartialEq)]
/// Newest submission record plus the server time to use as the next cursor.
pub struct ValidatedResponse {
    pub newest: Value,
    pub current_date: Cursor,
}

/// Extracts the newest submission (index 0 per the API contract).
///
/// Returns [`PollError::NoUpdate`] for an empty submission list and
/// [`PollError::Schema`] for every structural problem.
pub fn validate_response(response: &Value) -> Result<ValidatedResponse, PollError> {
    let object = response.as_object().ok_or(SchemaError::NotAnObject)?;
    let homeworks = object
        .get(HOMEWORKS_FIELD)
        .ok_or(SchemaError::MissingField(HOMEWORKS_FIELD))?;
    let current_date = object
        .get(CURRENT_DATE_FIELD)
        .ok_or(SchemaError::MissingField(CURRENT_DATE_FIELD))?;

    let homeworks = homeworks
        .as_array()
        .ok_or(SchemaError::HomeworksNotAList)?;
    let current_date = current_date
        .as_i64()
        .map(Cursor::new)
        .ok_or(SchemaError::CurrentDateNotAnInteger)?;

    let newest = homeworks.first().ok_or(PollError::NoUpdate)?;
    Ok(ValidatedResponse {
        newest: newest.clone(),
        current_date,
    })
}
