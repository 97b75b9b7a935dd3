//! Individual validation rules.
//!
//! Each rule checks one field and returns the typed value or the
//! [`ValidationError`] for that field.

use crate::board::domain::{
    AssigneeId, BoardDomainError, ColumnId, ColumnTitle, TaskPriority, TaskStatus, TaskTitle,
};

use super::ValidationError;

fn title_error(err: BoardDomainError) -> ValidationError {
    match err {
        BoardDomainError::TitleTooLong { max, .. } => ValidationError::TitleTooLong { max },
        _ => ValidationError::TitleRequired,
    }
}

/// Validates a column title.
///
/// # Errors
///
/// Returns [`ValidationError::TitleRequired`] for blank input or
/// [`ValidationError::TitleTooLong`] past 50 characters.
pub fn validate_column_title(value: &str) -> Result<ColumnTitle, ValidationError> {
    ColumnTitle::new(value).map_err(title_error)
}

/// Validates a task title.
///
/// # Errors
///
/// Returns [`ValidationError::TitleRequired`] for blank input or
/// [`ValidationError::TitleTooLong`] past 100 characters.
pub fn validate_task_title(value: &str) -> Result<TaskTitle, ValidationError> {
    TaskTitle::new(value).map_err(title_error)
}

/// Validates an optional priority name. Blank counts as absent; anything
/// else must be one of the lowercase names exactly.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPriority`] for unknown names.
pub fn validate_priority(value: Option<&str>) -> Result<Option<TaskPriority>, ValidationError> {
    supplied(value)
        .map(|name| {
            TaskPriority::try_from(name).map_err(|err| ValidationError::InvalidPriority(err.0))
        })
        .transpose()
}

/// Validates an optional status name. Blank counts as absent; anything else
/// must be one of the lowercase names exactly.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidStatus`] for unknown names.
pub fn validate_status(value: Option<&str>) -> Result<Option<TaskStatus>, ValidationError> {
    supplied(value)
        .map(|name| TaskStatus::try_from(name).map_err(|err| ValidationError::InvalidStatus(err.0)))
        .transpose()
}

/// Validates the column reference on a task form.
///
/// # Errors
///
/// Returns [`ValidationError::ColumnIdRequired`] for blank input or
/// [`ValidationError::InvalidColumnId`] when it is not an identifier.
pub fn validate_column_ref(value: &str) -> Result<ColumnId, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::ColumnIdRequired);
    }
    trimmed
        .parse::<ColumnId>()
        .map_err(|_| ValidationError::InvalidColumnId(trimmed.to_owned()))
}

/// Normalizes optional free text: blank input becomes `None`, anything else
/// is kept verbatim.
#[must_use]
pub fn normalize_text(value: Option<&str>) -> Option<String> {
    supplied(value).map(str::to_owned)
}

/// Parses an optional roster reference: blank input becomes `None`.
#[must_use]
pub fn normalize_assignee(value: Option<&str>) -> Option<AssigneeId> {
    value.and_then(AssigneeId::parse)
}

/// Drops blank values without trimming the rest.
fn supplied(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}
