//! Request boundary for board operations.
//!
//! Every action takes string identifiers and untyped forms and returns an
//! [`ActionResponse`], serialized as `{"success": true, "data": ...}` or
//! `{"success": false, "error": "..."}`. Failures are logged here, once.

use crate::board::{
    domain::{Column, ColumnId, Task, TaskId},
    ports::{ColumnRepository, TaskRepository},
    services::{BoardServiceError, BoardServiceResult, ColumnService, ErrorKind, TaskService},
    validation::{ColumnForm, TaskForm, TaskPatchForm, validate_column_form, validate_task_patch},
};
use mockable::Clock;
use serde::{Serialize, Serializer, ser::SerializeStruct};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

const COLUMN_NOT_FOUND: &str = "Column not found";
const TARGET_COLUMN_NOT_FOUND: &str = "Target column not found";
const TASK_NOT_FOUND: &str = "Task not found";

/// Failure half of an [`ActionResponse`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ActionFailure {
    /// Failure category.
    pub kind: ErrorKind,
    /// Message shown to the caller.
    pub message: String,
}

impl ActionFailure {
    /// Creates a failure.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&BoardServiceError> for ActionFailure {
    fn from(err: &BoardServiceError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

/// Outcome of a board action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResponse<T> {
    /// The action succeeded with `data`.
    Success(T),
    /// The action failed.
    Failure(ActionFailure),
}

impl<T> ActionResponse<T> {
    /// Returns `true` for a successful response.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the payload of a successful response.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure of an unsuccessful response.
    #[must_use]
    pub const fn failure(&self) -> Option<&ActionFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    /// Converts the response into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionFailure`] of an unsuccessful response.
    pub fn into_result(self) -> Result<T, ActionFailure> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(failure) => Err(failure),
        }
    }
}

impl<T: Serialize> Serialize for ActionResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ActionResponse", 2)?;
        match self {
            Self::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Failure(failure) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", &failure.message)?;
            }
        }
        state.end()
    }
}

/// Identifier of a deleted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deleted<I> {
    /// Identifier of the soft-deleted row.
    pub id: I,
}

/// Board request boundary over the column and task services.
#[derive(Clone)]
pub struct BoardActions<R, C>
where
    R: ColumnRepository + TaskRepository,
    C: Clock + Send + Sync,
{
    columns: ColumnService<R, C>,
    tasks: TaskService<R, C>,
}

impl<R, C> BoardActions<R, C>
where
    R: ColumnRepository + TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates the boundary over one repository and clock.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            columns: ColumnService::new(Arc::clone(&repository), Arc::clone(&clock)),
            tasks: TaskService::new(repository, clock),
        }
    }

    /// Returns the column service.
    #[must_use]
    pub const fn columns(&self) -> &ColumnService<R, C> {
        &self.columns
    }

    /// Returns the task service.
    #[must_use]
    pub const fn tasks(&self) -> &TaskService<R, C> {
        &self.tasks
    }

    /// Creates a column at the end of the board.
    pub async fn create_column(&self, form: &ColumnForm) -> ActionResponse<Column> {
        respond("create_column", self.columns.create(form).await)
    }

    /// Updates a column's title and description.
    pub async fn update_column(&self, id: &str, form: &ColumnForm) -> ActionResponse<Column> {
        const OPERATION: &str = "update_column";
        if let Err(err) = validate_column_form(form) {
            return respond(OPERATION, Err(err.into()));
        }
        match id.parse::<ColumnId>() {
            Ok(column_id) => respond(OPERATION, self.columns.update(column_id, form).await),
            Err(_) => malformed(OPERATION, id, COLUMN_NOT_FOUND),
        }
    }

    /// Soft-deletes a column and its tasks.
    pub async fn delete_column(&self, id: &str) -> ActionResponse<Deleted<ColumnId>> {
        const OPERATION: &str = "delete_column";
        match id.parse::<ColumnId>() {
            Ok(column_id) => respond(
                OPERATION,
                self.columns
                    .delete(column_id)
                    .await
                    .map(|deleted| Deleted { id: deleted }),
            ),
            Err(_) => malformed(OPERATION, id, COLUMN_NOT_FOUND),
        }
    }

    /// Lists live columns in display order.
    pub async fn get_columns(&self) -> ActionResponse<Vec<Column>> {
        respond("get_columns", self.columns.list().await)
    }

    /// Creates a task at the end of its column.
    pub async fn create_task(&self, form: &TaskForm) -> ActionResponse<Task> {
        respond("create_task", self.tasks.create(form).await)
    }

    /// Applies a partial update to a task.
    pub async fn update_task(&self, id: &str, form: &TaskPatchForm) -> ActionResponse<Task> {
        const OPERATION: &str = "update_task";
        if let Err(err) = validate_task_patch(form) {
            return respond(OPERATION, Err(err.into()));
        }
        match id.parse::<TaskId>() {
            Ok(task_id) => respond(OPERATION, self.tasks.update(task_id, form).await),
            Err(_) => malformed(OPERATION, id, TASK_NOT_FOUND),
        }
    }

    /// Soft-deletes a task.
    pub async fn delete_task(&self, id: &str) -> ActionResponse<Deleted<TaskId>> {
        const OPERATION: &str = "delete_task";
        match id.parse::<TaskId>() {
            Ok(task_id) => respond(
                OPERATION,
                self.tasks
                    .delete(task_id)
                    .await
                    .map(|deleted| Deleted { id: deleted }),
            ),
            Err(_) => malformed(OPERATION, id, TASK_NOT_FOUND),
        }
    }

    /// Moves a task to the end of another column.
    pub async fn move_task(&self, id: &str, target_column_id: &str) -> ActionResponse<Task> {
        const OPERATION: &str = "move_task";
        let Ok(task_id) = id.parse::<TaskId>() else {
            return malformed(OPERATION, id, TASK_NOT_FOUND);
        };
        match target_column_id.parse::<ColumnId>() {
            Ok(target) => respond(OPERATION, self.tasks.move_to_column(task_id, target).await),
            Err(_) => match self.tasks.get(task_id).await {
                Ok(_) => malformed(OPERATION, target_column_id, TARGET_COLUMN_NOT_FOUND),
                Err(err) => respond(OPERATION, Err(err)),
            },
        }
    }

    /// Lists every live task.
    pub async fn get_tasks(&self) -> ActionResponse<Vec<Task>> {
        respond("get_tasks", self.tasks.list().await)
    }

    /// Lists the live tasks of one column.
    ///
    /// A malformed or unknown column identifier yields an empty list.
    pub async fn get_tasks_by_column(&self, column_id: &str) -> ActionResponse<Vec<Task>> {
        match column_id.parse::<ColumnId>() {
            Ok(id) => respond("get_tasks_by_column", self.tasks.list_by_column(id).await),
            Err(_) => ActionResponse::Success(Vec::new()),
        }
    }
}

fn respond<T>(operation: &'static str, result: BoardServiceResult<T>) -> ActionResponse<T> {
    match result {
        Ok(data) => ActionResponse::Success(data),
        Err(err) => {
            let failure = ActionFailure::from(&err);
            match failure.kind {
                ErrorKind::Store => error!(operation, error = %err, "Board action failed"),
                ErrorKind::Validation | ErrorKind::NotFound => {
                    warn!(operation, kind = %failure.kind, error = %err, "Board action rejected");
                }
            }
            ActionResponse::Failure(failure)
        }
    }
}

fn malformed<T>(operation: &'static str, raw_id: &str, message: &str) -> ActionResponse<T> {
    warn!(operation, id = raw_id, "Board action rejected malformed identifier");
    ActionResponse::Failure(ActionFailure::new(ErrorKind::NotFound, message))
}
