//! Input validation helpers
//!
//! SQLite TEXT has no length enforcement, so limits are applied before
//! anything is written.

use shared::error::ErrorCode;

use crate::workflow::{WorkflowError, WorkflowResult};

/// Usernames and display names
pub const MAX_NAME_LEN: usize = 200;

/// Notes, comments, reasons
pub const MAX_NOTE_LEN: usize = 500;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Upper bound on any single bag count
pub const MAX_BAGS: i64 = 1_000_000;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> WorkflowResult<()> {
    if value.trim().is_empty() {
        return Err(WorkflowError::validation_code(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        ));
    }
    if value.len() > max_len {
        return Err(WorkflowError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> WorkflowResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(WorkflowError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Bag count that must be at least one
pub fn validate_positive_bags(value: i64, field: &str) -> WorkflowResult<()> {
    if value <= 0 || value > MAX_BAGS {
        return Err(WorkflowError::validation_code(
            ErrorCode::InvalidBagCount,
            format!("{field} must be between 1 and {MAX_BAGS}, got {value}"),
        ));
    }
    Ok(())
}

/// Bag count that may be zero
pub fn validate_bag_count(value: i64, field: &str) -> WorkflowResult<()> {
    if !(0..=MAX_BAGS).contains(&value) {
        return Err(WorkflowError::validation_code(
            ErrorCode::InvalidBagCount,
            format!("{field} must be between 0 and {MAX_BAGS}, got {value}"),
        ));
    }
    Ok(())
}

/// ISO calendar date `YYYY-MM-DD`
pub fn validate_date(value: &str, field: &str) -> WorkflowResult<()> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            WorkflowError::validation_code(
                ErrorCode::InvalidFormat,
                format!("{field} must be a date in YYYY-MM-DD format, got '{value}'"),
            )
        })
}
