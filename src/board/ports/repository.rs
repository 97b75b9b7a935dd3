//! Repository ports for columns and tasks.

use crate::board::domain::{
    Column, ColumnChanges, ColumnDraft, ColumnId, Task, TaskDraft, TaskId, TaskPatch,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Column persistence contract.
///
/// Every read excludes soft-deleted columns.
#[async_trait]
pub trait ColumnRepository: Send + Sync {
    /// Appends a column after every live column and returns it with its
    /// assigned order.
    ///
    /// Concurrent appends receive distinct orders.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::DuplicateColumn`] when the identifier
    /// is already stored.
    async fn append_column(&self, draft: ColumnDraft) -> BoardRepositoryResult<Column>;

    /// Replaces the title and description of a live column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when the column is
    /// missing or deleted.
    async fn update_column(
        &self,
        id: ColumnId,
        changes: ColumnChanges,
        at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Column>;

    /// Soft-deletes a live column together with its live tasks, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when the column is
    /// missing or already deleted.
    async fn delete_column_cascade(&self, id: ColumnId, at: DateTime<Utc>)
    -> BoardRepositoryResult<()>;

    /// Finds a live column.
    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>>;

    /// Lists live columns in display order.
    async fn list_columns(&self) -> BoardRepositoryResult<Vec<Column>>;
}

/// Task persistence contract.
///
/// Every read excludes soft-deleted tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Appends a task after every live task in its column and returns it with
    /// its assigned order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when the column is
    /// missing or deleted, or [`BoardRepositoryError::DuplicateTask`] when
    /// the identifier is already stored.
    async fn append_task(&self, draft: TaskDraft) -> BoardRepositoryResult<Task>;

    /// Applies a partial update to a live task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task is missing
    /// or deleted.
    async fn update_task(
        &self,
        id: TaskId,
        patch: TaskPatch,
        at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Task>;

    /// Soft-deletes a live task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task is missing
    /// or already deleted.
    async fn delete_task(&self, id: TaskId, at: DateTime<Utc>) -> BoardRepositoryResult<()>;

    /// Moves a live task to the end of `target`.
    ///
    /// The new order is the number of live tasks in `target` at the time of
    /// the move, the task itself included when it already sits there. The
    /// source column is not renumbered.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] first when the task is
    /// missing or deleted, then [`BoardRepositoryError::ColumnNotFound`] when
    /// the target is missing or deleted. Nothing changes on failure.
    async fn move_task(
        &self,
        id: TaskId,
        target: ColumnId,
        at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Task>;

    /// Finds a live task.
    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>>;

    /// Lists every live task in order.
    async fn list_tasks(&self) -> BoardRepositoryResult<Vec<Task>>;

    /// Lists the live tasks of one column in order.
    ///
    /// An unknown column yields an empty list.
    async fn list_tasks_in_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// The column is missing or soft-deleted.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The task is missing or soft-deleted.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A column with the same identifier already exists.
    #[error("duplicate column identifier: {0}")]
    DuplicateColumn(ColumnId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A stored row could not be converted into a domain value.
    #[error("corrupt row: {0}")]
    CorruptRow(String),

    /// Persistence-layer failure, displayed as the underlying message.
    #[error("{0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Wraps a row conversion failure.
    pub fn corrupt_row(err: impl std::fmt::Display) -> Self {
        Self::CorruptRow(err.to_string())
    }
}
