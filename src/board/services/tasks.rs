//! Task operations, including moves between columns.

use crate::board::{
    domain::{ColumnId, Task, TaskDraft, TaskId},
    ports::{BoardRepositoryError, TaskRepository},
    validation::{TaskForm, TaskPatchForm, validate_task_form, validate_task_patch},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

use super::{BoardServiceError, BoardServiceResult};

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Validates `form` and appends a task to the end of its column.
    ///
    /// Priority defaults to medium and status to todo.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Validation`] for an invalid form or
    /// [`BoardServiceError::UnknownTaskColumn`] when the column is missing or
    /// deleted.
    pub async fn create(&self, form: &TaskForm) -> BoardServiceResult<Task> {
        let valid = validate_task_form(form)?;
        let draft = TaskDraft::new(valid.title, valid.column_id, &*self.clock)
            .with_description(valid.description)
            .with_priority(valid.priority)
            .with_status(valid.status)
            .with_assignee(valid.assignee_id);
        let task = self
            .repository
            .append_task(draft)
            .await
            .map_err(|err| match err {
                BoardRepositoryError::ColumnNotFound(column_id) => {
                    BoardServiceError::UnknownTaskColumn(column_id)
                }
                other => BoardServiceError::from(other),
            })?;
        info!(
            task_id = %task.id(),
            column_id = %task.column_id(),
            order = %task.order(),
            "Created task"
        );
        Ok(task)
    }

    /// Applies the fields present in `form` to a live task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Validation`] for an invalid field or
    /// [`BoardServiceError::TaskNotFound`] when the task is missing or
    /// deleted.
    pub async fn update(&self, id: TaskId, form: &TaskPatchForm) -> BoardServiceResult<Task> {
        let patch = validate_task_patch(form)?;
        let task = self
            .repository
            .update_task(id, patch, self.clock.utc())
            .await?;
        info!(task_id = %id, "Updated task");
        Ok(task)
    }

    /// Soft-deletes a task. Siblings keep their orders.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::TaskNotFound`] when the task is missing or
    /// already deleted.
    pub async fn delete(&self, id: TaskId) -> BoardServiceResult<TaskId> {
        self.repository.delete_task(id, self.clock.utc()).await?;
        info!(task_id = %id, "Deleted task");
        Ok(id)
    }

    /// Moves a task to the end of `target`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::TaskNotFound`] when the task is missing or
    /// deleted, or [`BoardServiceError::TargetColumnNotFound`] when the target
    /// is missing or deleted.
    pub async fn move_to_column(&self, id: TaskId, target: ColumnId) -> BoardServiceResult<Task> {
        let task = self
            .repository
            .move_task(id, target, self.clock.utc())
            .await
            .map_err(|err| match err {
                BoardRepositoryError::ColumnNotFound(column_id) => {
                    BoardServiceError::TargetColumnNotFound(column_id)
                }
                other => BoardServiceError::from(other),
            })?;
        info!(
            task_id = %id,
            column_id = %target,
            order = %task.order(),
            "Moved task"
        );
        Ok(task)
    }

    /// Returns a live task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::TaskNotFound`] when the task is missing or
    /// deleted.
    pub async fn get(&self, id: TaskId) -> BoardServiceResult<Task> {
        self.repository
            .find_task(id)
            .await?
            .ok_or(BoardServiceError::TaskNotFound(id))
    }

    /// Lists every live task in order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when persistence fails.
    pub async fn list(&self) -> BoardServiceResult<Vec<Task>> {
        let tasks = self.repository.list_tasks().await?;
        debug!(count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }

    /// Lists the live tasks of one column in order.
    ///
    /// An unknown or deleted column yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when persistence fails.
    pub async fn list_by_column(&self, column_id: ColumnId) -> BoardServiceResult<Vec<Task>> {
        let tasks = self.repository.list_tasks_in_column(column_id).await?;
        debug!(column_id = %column_id, count = tasks.len(), "Listed column tasks");
        Ok(tasks)
    }
}
