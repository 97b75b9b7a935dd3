//! Untyped form payloads accepted from callers.
//!
//! Forms mirror what a browser or CLI submits: plain strings, optional
//! fields absent rather than defaulted. They carry no guarantees until they
//! pass through the validators in [`super::validator`].

use serde::{Deserialize, Serialize};

/// Column create/update form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnForm {
    /// Column heading.
    #[serde(default)]
    pub title: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

impl ColumnForm {
    /// Creates a form with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Task create form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskForm {
    /// Task title.
    #[serde(default)]
    pub title: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional priority name.
    #[serde(default)]
    pub priority: Option<String>,
    /// Optional status name.
    #[serde(default)]
    pub status: Option<String>,
    /// Optional roster reference.
    #[serde(default)]
    pub assignee_id: Option<String>,
    /// Column the task is created in.
    #[serde(default)]
    pub column_id: String,
}

impl TaskForm {
    /// Creates a form with the required title and column.
    #[must_use]
    pub fn new(title: impl Into<String>, column_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            column_id: column_id.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority name.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the status name.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the roster reference.
    #[must_use]
    pub fn with_assignee(mut self, assignee_id: impl Into<String>) -> Self {
        self.assignee_id = Some(assignee_id.into());
        self
    }
}

/// Partial task update form. Absent fields are left unchanged.
///
/// An empty `description` or `assigneeId` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatchForm {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement priority name.
    #[serde(default)]
    pub priority: Option<String>,
    /// Replacement status name.
    #[serde(default)]
    pub status: Option<String>,
    /// Replacement roster reference.
    #[serde(default)]
    pub assignee_id: Option<String>,
}

impl TaskPatchForm {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description; an empty string clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority name.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the status name.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the roster reference; an empty string unassigns.
    #[must_use]
    pub fn with_assignee(mut self, assignee_id: impl Into<String>) -> Self {
        self.assignee_id = Some(assignee_id.into());
        self
    }
}
