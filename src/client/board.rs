//! Board client: validated requests plus cache maintenance.
//!
//! Every mutation runs in two steps. The local apply writes the expected
//! result into the cache: after the call for creates and updates, before the
//! call for deletes and moves. A failed delete or move puts back only the
//! entries it took out, so changes other clients of the same cache made in
//! the meantime survive. The resync then invalidates affected queries, on
//! success and failure alike; [`BoardClient::refresh_stale`] refetches them.

use super::{
    BoardBackend, ClientError,
    cache::{BoardCache, InvalidateFilter, QueryKey, TaskScope},
};
use crate::board::{
    domain::{Column, ColumnId, Task, TaskId},
    validation::{
        ColumnForm, TaskForm, TaskPatchForm, validate_column_form, validate_task_form,
        validate_task_patch,
    },
};
use std::sync::Arc;
use tracing::debug;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client over a [`BoardBackend`] with its own [`BoardCache`].
pub struct BoardClient<B: BoardBackend> {
    backend: Arc<B>,
    cache: Arc<BoardCache>,
}

impl<B: BoardBackend> Clone for BoardClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<B: BoardBackend> BoardClient<B> {
    /// Creates a client over `backend` that maintains `cache`.
    #[must_use]
    pub const fn new(backend: Arc<B>, cache: Arc<BoardCache>) -> Self {
        Self { backend, cache }
    }

    /// Returns the cache maintained by this client.
    #[must_use]
    pub const fn cache(&self) -> &Arc<BoardCache> {
        &self.cache
    }

    /// Fetches the column list and stores it in the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] when the backend fails.
    pub async fn fetch_columns(&self) -> ClientResult<Vec<Column>> {
        let columns = self.backend.get_columns().await.into_result()?;
        self.cache.replace_columns(columns.clone());
        Ok(columns)
    }

    /// Fetches the task list for `scope` and stores it in the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] when the backend fails.
    pub async fn fetch_tasks(&self, scope: TaskScope) -> ClientResult<Vec<Task>> {
        let response = match scope {
            TaskScope::All => self.backend.get_tasks().await,
            TaskScope::Column(column_id) => {
                self.backend
                    .get_tasks_by_column(&column_id.to_string())
                    .await
            }
        };
        let tasks = response.into_result()?;
        self.cache.replace_tasks(scope, tasks.clone());
        Ok(tasks)
    }

    /// Refetches every stale query and returns the refreshed keys.
    ///
    /// # Errors
    ///
    /// Returns the first backend failure; queries refreshed before it keep
    /// their new data.
    pub async fn refresh_stale(&self) -> ClientResult<Vec<QueryKey>> {
        let stale = self.cache.stale_keys();
        for key in &stale {
            match *key {
                QueryKey::Columns => {
                    self.fetch_columns().await?;
                }
                QueryKey::Tasks(scope) => {
                    self.fetch_tasks(scope).await?;
                }
            }
        }
        debug!(count = stale.len(), "Refreshed stale queries");
        Ok(stale)
    }

    /// Creates a column and appends it to the cached list.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Invalid`] without contacting the backend when
    /// the form is invalid, or [`ClientError::Rejected`] when the backend
    /// fails.
    pub async fn create_column(&self, form: &ColumnForm) -> ClientResult<Column> {
        validate_column_form(form)?;
        let column = self.backend.create_column(form).await.into_result()?;
        let created = column.clone();
        self.cache
            .update_columns(move |previous| appended(previous, created, Column::id));
        self.cache.invalidate(InvalidateFilter::Columns);
        Ok(column)
    }

    /// Updates a column and replaces it in the cached list.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Invalid`] or [`ClientError::Rejected`].
    pub async fn update_column(&self, id: ColumnId, form: &ColumnForm) -> ClientResult<Column> {
        validate_column_form(form)?;
        let column = self
            .backend
            .update_column(&id.to_string(), form)
            .await
            .into_result()?;
        let updated = column.clone();
        self.cache
            .update_columns(move |previous| replaced(previous, updated, Column::id));
        self.cache.invalidate(InvalidateFilter::Columns);
        Ok(column)
    }

    /// Deletes a column, removing it from the cache before the call.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] when the backend fails; the column
    /// is put back and the column list marked stale first.
    pub async fn delete_column(&self, id: ColumnId) -> ClientResult<ColumnId> {
        let taken = self.cache.take_column(id);
        match self.backend.delete_column(&id.to_string()).await.into_result() {
            Ok(deleted) => {
                self.cache.invalidate(InvalidateFilter::AllTasks);
                self.cache.invalidate(InvalidateFilter::Columns);
                Ok(deleted.id)
            }
            Err(failure) => {
                debug!(column_id = %id, "Rolling back column removal");
                if let Some((index, column)) = taken {
                    self.cache.put_back_column(index, column);
                }
                self.cache.invalidate(InvalidateFilter::Columns);
                Err(failure.into())
            }
        }
    }

    /// Creates a task and appends it to the cached task lists.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Invalid`] or [`ClientError::Rejected`].
    pub async fn create_task(&self, form: &TaskForm) -> ClientResult<Task> {
        validate_task_form(form)?;
        let task = self.backend.create_task(form).await.into_result()?;
        for scope in [TaskScope::All, TaskScope::Column(task.column_id())] {
            let created = task.clone();
            self.cache
                .update_tasks(scope, move |previous| appended(previous, created, Task::id));
        }
        self.cache.invalidate(InvalidateFilter::AllTasks);
        Ok(task)
    }

    /// Updates a task and replaces it in the cached task lists.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Invalid`] or [`ClientError::Rejected`].
    pub async fn update_task(&self, id: TaskId, form: &TaskPatchForm) -> ClientResult<Task> {
        validate_task_patch(form)?;
        let task = self
            .backend
            .update_task(&id.to_string(), form)
            .await
            .into_result()?;
        for scope in [TaskScope::All, TaskScope::Column(task.column_id())] {
            let updated = task.clone();
            self.cache
                .update_tasks(scope, move |previous| replaced(previous, updated, Task::id));
        }
        self.cache.invalidate(InvalidateFilter::AllTasks);
        Ok(task)
    }

    /// Deletes a task, removing it from the cache before the call.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] when the backend fails; the task is
    /// put back and the task queries marked stale first.
    pub async fn delete_task(&self, id: TaskId) -> ClientResult<TaskId> {
        let taken: Vec<TakenTask> = self
            .cache
            .task_scopes()
            .into_iter()
            .filter_map(|scope| self.take_cached_task(scope, id))
            .collect();
        let result = self.backend.delete_task(&id.to_string()).await.into_result();
        if result.is_err() {
            debug!(task_id = %id, "Rolling back task removal");
            self.put_back_tasks(taken);
        }
        // Per-column lists and the full list together.
        self.cache.invalidate(InvalidateFilter::AllTasks);
        Ok(result?.id)
    }

    /// Moves a task, removing it from its old column list before the call.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] when the backend fails; the task is
    /// put back and the task queries marked stale first.
    pub async fn move_task(&self, id: TaskId, target: ColumnId) -> ClientResult<Task> {
        let taken = self
            .cache
            .find_task(id)
            .and_then(|cached| self.take_cached_task(TaskScope::Column(cached.column_id()), id));
        let response = self
            .backend
            .move_task(&id.to_string(), &target.to_string())
            .await;
        let result = response.into_result();
        match &result {
            Ok(task) => {
                let moved = task.clone();
                self.cache
                    .update_tasks(TaskScope::All, move |previous| {
                        replaced(previous, moved, Task::id)
                    });
                let appended_task = task.clone();
                self.cache.update_tasks(TaskScope::Column(target), move |previous| {
                    appended(previous, appended_task, Task::id)
                });
            }
            Err(_) => {
                debug!(task_id = %id, "Rolling back task move");
                self.put_back_tasks(taken);
            }
        }
        self.cache.invalidate(InvalidateFilter::AllTasks);
        result.map_err(ClientError::from)
    }

    fn take_cached_task(&self, scope: TaskScope, id: TaskId) -> Option<TakenTask> {
        self.cache
            .take_task(scope, id)
            .map(|(index, task)| TakenTask { scope, index, task })
    }

    fn put_back_tasks(&self, taken: impl IntoIterator<Item = TakenTask>) {
        for TakenTask { scope, index, task } in taken {
            self.cache.put_back_task(scope, index, task);
        }
    }
}

/// A task removed from one cached list ahead of a backend call.
struct TakenTask {
    scope: TaskScope,
    index: usize,
    task: Task,
}

/// Appends `item`, replacing an existing entry with the same key.
fn appended<T, K: PartialEq>(previous: Option<Vec<T>>, item: T, key: fn(&T) -> K) -> Vec<T> {
    let mut items = previous.unwrap_or_default();
    let item_key = key(&item);
    items.retain(|existing| key(existing) != item_key);
    items.push(item);
    items
}

/// Replaces the entry with the same key, or starts a list holding `item`.
fn replaced<T, K: PartialEq>(previous: Option<Vec<T>>, item: T, key: fn(&T) -> K) -> Vec<T> {
    let Some(mut items) = previous else {
        return vec![item];
    };
    let item_key = key(&item);
    if let Some(slot) = items.iter_mut().find(|existing| key(existing) == item_key) {
        *slot = item;
    }
    items
}
