//! Transport seam between the client and the request boundary.

use crate::board::{
    actions::{ActionResponse, BoardActions, Deleted},
    domain::{Column, ColumnId, Task, TaskId},
    ports::{ColumnRepository, TaskRepository},
    validation::{ColumnForm, TaskForm, TaskPatchForm},
};
use async_trait::async_trait;
use mockable::Clock;

/// Operations a [`super::BoardClient`] can invoke.
///
/// Mirrors [`BoardActions`] so that a remote transport can stand in for the
/// in-process boundary.
#[async_trait]
pub trait BoardBackend: Send + Sync {
    /// Creates a column.
    async fn create_column(&self, form: &ColumnForm) -> ActionResponse<Column>;

    /// Updates a column.
    async fn update_column(&self, id: &str, form: &ColumnForm) -> ActionResponse<Column>;

    /// Soft-deletes a column and its tasks.
    async fn delete_column(&self, id: &str) -> ActionResponse<Deleted<ColumnId>>;

    /// Lists live columns.
    async fn get_columns(&self) -> ActionResponse<Vec<Column>>;

    /// Creates a task.
    async fn create_task(&self, form: &TaskForm) -> ActionResponse<Task>;

    /// Partially updates a task.
    async fn update_task(&self, id: &str, form: &TaskPatchForm) -> ActionResponse<Task>;

    /// Soft-deletes a task.
    async fn delete_task(&self, id: &str) -> ActionResponse<Deleted<TaskId>>;

    /// Moves a task to the end of another column.
    async fn move_task(&self, id: &str, target_column_id: &str) -> ActionResponse<Task>;

    /// Lists every live task.
    async fn get_tasks(&self) -> ActionResponse<Vec<Task>>;

    /// Lists the live tasks of one column.
    async fn get_tasks_by_column(&self, column_id: &str) -> ActionResponse<Vec<Task>>;
}

#[async_trait]
impl<R, C> BoardBackend for BoardActions<R, C>
where
    R: ColumnRepository + TaskRepository,
    C: Clock + Send + Sync,
{
    async fn create_column(&self, form: &ColumnForm) -> ActionResponse<Column> {
        Self::create_column(self, form).await
    }

    async fn update_column(&self, id: &str, form: &ColumnForm) -> ActionResponse<Column> {
        Self::update_column(self, id, form).await
    }

    async fn delete_column(&self, id: &str) -> ActionResponse<Deleted<ColumnId>> {
        Self::delete_column(self, id).await
    }

    async fn get_columns(&self) -> ActionResponse<Vec<Column>> {
        Self::get_columns(self).await
    }

    async fn create_task(&self, form: &TaskForm) -> ActionResponse<Task> {
        Self::create_task(self, form).await
    }

    async fn update_task(&self, id: &str, form: &TaskPatchForm) -> ActionResponse<Task> {
        Self::update_task(self, id, form).await
    }

    async fn delete_task(&self, id: &str) -> ActionResponse<Deleted<TaskId>> {
        Self::delete_task(self, id).await
    }

    async fn move_task(&self, id: &str, target_column_id: &str) -> ActionResponse<Task> {
        Self::move_task(self, id, target_column_id).await
    }

    async fn get_tasks(&self) -> ActionResponse<Vec<Task>> {
        Self::get_tasks(self).await
    }

    async fn get_tasks_by_column(&self, column_id: &str) -> ActionResponse<Vec<Task>> {
        Self::get_tasks_by_column(self, column_id).await
    }
}
