//! Column aggregate and its creation and change payloads.

use super::{ColumnId, ColumnTitle, Positioned, SortOrder};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Board column holding an ordered list of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    id: ColumnId,
    title: ColumnTitle,
    description: Option<String>,
    order: SortOrder,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedColumnData {
    /// Persisted column identifier.
    pub id: ColumnId,
    /// Persisted title.
    pub title: ColumnTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted display order.
    pub order: SortOrder,
    /// Soft-delete timestamp, if deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest change timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A column that has been validated but not yet placed in the board.
///
/// The store assigns its order when the draft is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDraft {
    id: ColumnId,
    title: ColumnTitle,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl ColumnDraft {
    /// Creates a draft with a fresh identifier stamped by `clock`.
    #[must_use]
    pub fn new(title: ColumnTitle, description: Option<String>, clock: &impl Clock) -> Self {
        Self {
            id: ColumnId::new(),
            title,
            description,
            created_at: clock.utc(),
        }
    }

    /// Returns the identifier the column will be stored under.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the draft title.
    #[must_use]
    pub const fn title(&self) -> &ColumnTitle {
        &self.title
    }

    /// Returns the draft description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Places the draft at `order`, producing a live column.
    #[must_use]
    pub fn into_column(self, order: SortOrder) -> Column {
        Column {
            id: self.id,
            title: self.title,
            description: self.description,
            order,
            deleted_at: None,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Replacement title and description for an existing column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnChanges {
    /// New title.
    pub title: ColumnTitle,
    /// New description; `None` clears it.
    pub description: Option<String>,
}

impl Column {
    /// Reconstructs a column from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedColumnData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            order: data.order,
            deleted_at: data.deleted_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the column title.
    #[must_use]
    pub const fn title(&self) -> &ColumnTitle {
        &self.title
    }

    /// Returns the column description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the display order.
    #[must_use]
    pub const fn order(&self) -> SortOrder {
        self.order
    }

    /// Returns the soft-delete timestamp, if deleted.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` once the column has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces title and description.
    pub fn apply_changes(&mut self, changes: ColumnChanges, at: DateTime<Utc>) {
        self.title = changes.title;
        self.description = changes.description;
        self.updated_at = at;
    }

    /// Marks the column deleted. Deleting twice keeps the first timestamp.
    pub fn soft_delete(&mut self, at: DateTime<Utc>) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(at);
            self.updated_at = at;
        }
    }
}

impl Positioned for Column {
    fn order(&self) -> SortOrder {
        self.order
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn stable_id(&self) -> Uuid {
        self.id.into_inner()
    }
}
