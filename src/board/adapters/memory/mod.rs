//! In-memory board repository for tests and local tooling.
//!
//! One `RwLock` guards columns and tasks together, so order assignment and
//! cascade deletes observe a consistent view.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{
        Column, ColumnChanges, ColumnDraft, ColumnId, Positioned, SortOrder, Task, TaskDraft,
        TaskId, TaskPatch, sort_by_position,
    },
    ports::{BoardRepositoryError, BoardRepositoryResult, ColumnRepository, TaskRepository},
};

/// Thread-safe in-memory board repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardRepository {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    columns: HashMap<ColumnId, Column>,
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryBoardState {
    fn live_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values().filter(|column| !column.is_deleted())
    }

    fn live_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values().filter(|task| !task.is_deleted())
    }

    fn live_tasks_in(&self, column_id: ColumnId) -> impl Iterator<Item = &Task> {
        self.live_tasks()
            .filter(move |task| task.column_id() == column_id)
    }

    fn live_column_mut(&mut self, id: ColumnId) -> Option<&mut Column> {
        self.columns.get_mut(&id).filter(|column| !column.is_deleted())
    }

    fn live_task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(&id).filter(|task| !task.is_deleted())
    }

    fn has_live_column(&self, id: ColumnId) -> bool {
        self.columns
            .get(&id)
            .is_some_and(|column| !column.is_deleted())
    }
}

impl InMemoryBoardRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> BoardRepositoryResult<RwLockReadGuard<'_, InMemoryBoardState>> {
        self.state.read().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> BoardRepositoryResult<RwLockWriteGuard<'_, InMemoryBoardState>> {
        self.state.write().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn next_order(count: usize) -> BoardRepositoryResult<SortOrder> {
    let siblings = u64::try_from(count).map_err(BoardRepositoryError::persistence)?;
    SortOrder::after_siblings(siblings).map_err(BoardRepositoryError::persistence)
}

fn sorted<T: Positioned>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut listed: Vec<T> = items.collect();
    sort_by_position(&mut listed);
    listed
}

#[async_trait]
impl ColumnRepository for InMemoryBoardRepository {
    async fn append_column(&self, draft: ColumnDraft) -> BoardRepositoryResult<Column> {
        let mut state = self.write()?;
        if state.columns.contains_key(&draft.id()) {
            return Err(BoardRepositoryError::DuplicateColumn(draft.id()));
        }
        let order = next_order(state.live_columns().count())?;
        let column = draft.into_column(order);
        state.columns.insert(column.id(), column.clone());
        Ok(column)
    }

    async fn update_column(
        &self,
        id: ColumnId,
        changes: ColumnChanges,
        at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Column> {
        let mut state = self.write()?;
        let column = state
            .live_column_mut(id)
            .ok_or(BoardRepositoryError::ColumnNotFound(id))?;
        column.apply_changes(changes, at);
        Ok(column.clone())
    }

    async fn delete_column_cascade(
        &self,
        id: ColumnId,
        at: DateTime<Utc>,
    ) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .live_column_mut(id)
            .ok_or(BoardRepositoryError::ColumnNotFound(id))?
            .soft_delete(at);
        state
            .tasks
            .values_mut()
            .filter(|task| task.column_id() == id && !task.is_deleted())
            .for_each(|task| task.soft_delete(at));
        Ok(())
    }

    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        let state = self.read()?;
        Ok(state.live_columns().find(|column| column.id() == id).cloned())
    }

    async fn list_columns(&self) -> BoardRepositoryResult<Vec<Column>> {
        let state = self.read()?;
        Ok(sorted(state.live_columns().cloned()))
    }
}

#[async_trait]
impl TaskRepository for InMemoryBoardRepository {
    async fn append_task(&self, draft: TaskDraft) -> BoardRepositoryResult<Task> {
        let mut state = self.write()?;
        let column_id = draft.column_id();
        if !state.has_live_column(column_id) {
            return Err(BoardRepositoryError::ColumnNotFound(column_id));
        }
        if state.tasks.contains_key(&draft.id()) {
            return Err(BoardRepositoryError::DuplicateTask(draft.id()));
        }
        let order = next_order(state.live_tasks_in(column_id).count())?;
        let task = draft.into_task(order);
        state.tasks.insert(task.id(), task.clone());
        Ok(task)
    }

    async fn update_task(
        &self,
        id: TaskId,
        patch: TaskPatch,
        at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Task> {
        let mut state = self.write()?;
        let task = state
            .live_task_mut(id)
            .ok_or(BoardRepositoryError::TaskNotFound(id))?;
        task.apply_patch(patch, at);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId, at: DateTime<Utc>) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .live_task_mut(id)
            .ok_or(BoardRepositoryError::TaskNotFound(id))?
            .soft_delete(at);
        Ok(())
    }

    async fn move_task(
        &self,
        id: TaskId,
        target: ColumnId,
        at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Task> {
        let mut state = self.write()?;
        if state.live_task_mut(id).is_none() {
            return Err(BoardRepositoryError::TaskNotFound(id));
        }
        if !state.has_live_column(target) {
            return Err(BoardRepositoryError::ColumnNotFound(target));
        }
        let order = next_order(state.live_tasks_in(target).count())?;
        let task = state
            .live_task_mut(id)
            .ok_or(BoardRepositoryError::TaskNotFound(id))?;
        task.move_to(target, order, at);
        Ok(task.clone())
    }

    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.live_tasks().find(|task| task.id() == id).cloned())
    }

    async fn list_tasks(&self) -> BoardRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(sorted(state.live_tasks().cloned()))
    }

    async fn list_tasks_in_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(sorted(state.live_tasks_in(column_id).cloned()))
    }
}
