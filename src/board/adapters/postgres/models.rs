//! Diesel row models for board persistence.

use super::schema::{board_columns, board_tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for columns.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = board_columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Column heading.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Display order.
    pub sort_order: i32,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for columns.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = board_columns)]
pub struct NewColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Column heading.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Display order.
    pub sort_order: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Title and description replacement for a column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = board_columns)]
#[diesel(treat_none_as_null = true)]
pub struct ColumnChangeset {
    /// New heading.
    pub title: String,
    /// New description; `None` clears it.
    pub description: Option<String>,
    /// Change timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for tasks.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = board_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning column.
    pub column_id: uuid::Uuid,
    /// Display order within the column.
    pub sort_order: i32,
    /// Priority name.
    pub priority: String,
    /// Status name.
    pub status: String,
    /// Optional roster reference.
    pub assignee_id: Option<String>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for tasks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = board_tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning column.
    pub column_id: uuid::Uuid,
    /// Display order within the column.
    pub sort_order: i32,
    /// Priority name.
    pub priority: String,
    /// Status name.
    pub status: String,
    /// Optional roster reference.
    pub assignee_id: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial task update. Outer `None` leaves a field unchanged; an inner
/// `None` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = board_tasks)]
pub struct TaskChangeset {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<Option<String>>,
    /// New priority name.
    pub priority: Option<String>,
    /// New status name.
    pub status: Option<String>,
    /// New roster reference.
    pub assignee_id: Option<Option<String>>,
    /// Change timestamp.
    pub updated_at: DateTime<Utc>,
}
