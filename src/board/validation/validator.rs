//! Form validators.
//!
//! The same functions run on the client before a request is issued and in
//! the services before anything is written. Rules run in field order and the
//! first violation is returned.

use crate::board::domain::{
    AssigneeId, ColumnChanges, ColumnId, ColumnTitle, TaskPatch, TaskPriority, TaskStatus,
    TaskTitle,
};

use super::{
    ColumnForm, TaskForm, TaskPatchForm, ValidationError,
    rules::{
        normalize_assignee, normalize_text, validate_column_ref, validate_column_title,
        validate_priority, validate_status, validate_task_title,
    },
};

/// Column form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidColumn {
    /// Validated title.
    pub title: ColumnTitle,
    /// Description with blank input removed.
    pub description: Option<String>,
}

impl From<ValidColumn> for ColumnChanges {
    fn from(valid: ValidColumn) -> Self {
        Self {
            title: valid.title,
            description: valid.description,
        }
    }
}

/// Task form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTask {
    /// Validated title.
    pub title: TaskTitle,
    /// Description with blank input removed.
    pub description: Option<String>,
    /// Priority, defaulting to medium.
    pub priority: TaskPriority,
    /// Status, defaulting to todo.
    pub status: TaskStatus,
    /// Roster reference, if supplied.
    pub assignee_id: Option<AssigneeId>,
    /// Column the task is created in.
    pub column_id: ColumnId,
}

/// Validates a column create or update form.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate_column_form(form: &ColumnForm) -> Result<ValidColumn, ValidationError> {
    let title = validate_column_title(&form.title)?;
    Ok(ValidColumn {
        title,
        description: normalize_text(form.description.as_deref()),
    })
}

/// Validates a task create form.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered, checking title,
/// priority, status, and column in that order.
pub fn validate_task_form(form: &TaskForm) -> Result<ValidTask, ValidationError> {
    let title = validate_task_title(&form.title)?;
    let priority = validate_priority(form.priority.as_deref())?.unwrap_or_default();
    let status = validate_status(form.status.as_deref())?.unwrap_or_default();
    let column_id = validate_column_ref(&form.column_id)?;
    Ok(ValidTask {
        title,
        description: normalize_text(form.description.as_deref()),
        priority,
        status,
        assignee_id: normalize_assignee(form.assignee_id.as_deref()),
        column_id,
    })
}

/// Validates a partial task update.
///
/// Only fields present in the form are checked.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate_task_patch(form: &TaskPatchForm) -> Result<TaskPatch, ValidationError> {
    let title = form
        .title
        .as_deref()
        .map(validate_task_title)
        .transpose()?;
    let priority = validate_priority(form.priority.as_deref())?;
    let status = validate_status(form.status.as_deref())?;
    Ok(TaskPatch {
        title,
        description: form
            .description
            .as_deref()
            .map(|text| normalize_text(Some(text))),
        priority,
        status,
        assignee_id: form
            .assignee_id
            .as_deref()
            .map(|id| normalize_assignee(Some(id))),
    })
}
