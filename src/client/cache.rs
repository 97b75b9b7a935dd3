//! Client-side query cache.
//!
//! Holds the last-known column list and task lists per scope. Each entry
//! carries a stale flag set by [`BoardCache::invalidate`] and cleared when
//! authoritative data replaces it. Changes are published to subscribers over
//! a broadcast channel.

use crate::board::domain::{Column, ColumnId, Task, TaskId};
use crate::config::CacheConfig;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;
use tracing::trace;

/// Default broadcast capacity for cache events.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Task list scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskScope {
    /// Every live task.
    All,
    /// Live tasks of one column.
    Column(ColumnId),
}

/// Key of a cached query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The column list.
    Columns,
    /// A task list.
    Tasks(TaskScope),
}

/// Selects cached queries to mark stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidateFilter {
    /// The column list.
    Columns,
    /// Every task query, whatever its scope.
    AllTasks,
    /// Every per-column task query.
    TasksByAnyColumn,
    /// The task query of one column.
    TasksByColumn(ColumnId),
}

impl InvalidateFilter {
    /// Returns `true` when `key` is selected by the filter.
    #[must_use]
    pub fn matches(self, key: QueryKey) -> bool {
        match (self, key) {
            (Self::Columns, QueryKey::Columns) | (Self::AllTasks, QueryKey::Tasks(_)) => true,
            (Self::TasksByAnyColumn, QueryKey::Tasks(TaskScope::Column(_))) => true,
            (Self::TasksByColumn(wanted), QueryKey::Tasks(TaskScope::Column(actual))) => {
                wanted == actual
            }
            _ => false,
        }
    }
}

/// Kind of change published for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheChange {
    /// Data was changed locally.
    Updated,
    /// The entry was marked stale.
    Invalidated,
    /// Authoritative data replaced the entry.
    Refreshed,
    /// A snapshot was restored.
    RolledBack,
}

/// Change notification sent to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEvent {
    /// Affected query.
    pub key: QueryKey,
    /// What happened to it.
    pub change: CacheChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry<T> {
    data: T,
    stale: bool,
}

impl<T> Entry<T> {
    const fn fresh(data: T) -> Self {
        Self { data, stale: false }
    }
}

/// Point-in-time copy of the whole cache, used to roll back speculative
/// changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheSnapshot {
    columns: Option<Entry<Vec<Column>>>,
    tasks: HashMap<TaskScope, Entry<Vec<Task>>>,
}

impl CacheSnapshot {
    fn keys(&self) -> Vec<QueryKey> {
        self.columns
            .iter()
            .map(|_| QueryKey::Columns)
            .chain(self.tasks.keys().map(|scope| QueryKey::Tasks(*scope)))
            .collect()
    }

    fn stale(&self, key: QueryKey) -> Option<bool> {
        match key {
            QueryKey::Columns => self.columns.as_ref().map(|entry| entry.stale),
            QueryKey::Tasks(scope) => self.tasks.get(&scope).map(|entry| entry.stale),
        }
    }

    fn mark_stale(&mut self, key: QueryKey) {
        match key {
            QueryKey::Columns => {
                if let Some(entry) = self.columns.as_mut() {
                    entry.stale = true;
                }
            }
            QueryKey::Tasks(scope) => {
                if let Some(entry) = self.tasks.get_mut(&scope) {
                    entry.stale = true;
                }
            }
        }
    }
}

/// Explicit, shareable cache of board queries.
#[derive(Debug)]
pub struct BoardCache {
    state: RwLock<CacheSnapshot>,
    events: broadcast::Sender<CacheEvent>,
}

impl Default for BoardCache {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl BoardCache {
    /// Creates an empty cache whose event channel buffers `event_capacity`
    /// events per subscriber.
    #[must_use]
    pub fn new(event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Self {
            state: RwLock::new(CacheSnapshot::default()),
            events,
        }
    }

    /// Creates an empty cache sized by the `[cache]` settings.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.event_capacity)
    }

    /// Subscribes to change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// Returns the cached column list.
    #[must_use]
    pub fn columns(&self) -> Option<Vec<Column>> {
        self.read()
            .columns
            .as_ref()
            .map(|entry| entry.data.clone())
    }

    /// Returns the cached task list for `scope`.
    #[must_use]
    pub fn tasks(&self, scope: TaskScope) -> Option<Vec<Task>> {
        self.read()
            .tasks
            .get(&scope)
            .map(|entry| entry.data.clone())
    }

    /// Returns every cached task scope.
    #[must_use]
    pub fn task_scopes(&self) -> Vec<TaskScope> {
        self.read().tasks.keys().copied().collect()
    }

    /// Finds a task in any cached task list.
    #[must_use]
    pub fn find_task(&self, id: TaskId) -> Option<Task> {
        let state = self.read();
        state
            .tasks
            .values()
            .flat_map(|entry| entry.data.iter())
            .find(|task| task.id() == id)
            .cloned()
    }

    /// Replaces the column list with the result of `update`, which receives
    /// the previous list if one is cached. The stale flag is kept.
    pub fn update_columns<F>(&self, update: F)
    where
        F: FnOnce(Option<Vec<Column>>) -> Vec<Column>,
    {
        {
            let mut state = self.write();
            let previous = state.columns.take();
            let stale = previous.as_ref().is_some_and(|entry| entry.stale);
            let data = update(previous.map(|entry| entry.data));
            state.columns = Some(Entry { data, stale });
        }
        self.publish(QueryKey::Columns, CacheChange::Updated);
    }

    /// Replaces the task list for `scope` with the result of `update`, which
    /// receives the previous list if one is cached. The stale flag is kept.
    pub fn update_tasks<F>(&self, scope: TaskScope, update: F)
    where
        F: FnOnce(Option<Vec<Task>>) -> Vec<Task>,
    {
        {
            let mut state = self.write();
            let previous = state.tasks.remove(&scope);
            let stale = previous.as_ref().is_some_and(|entry| entry.stale);
            let data = update(previous.map(|entry| entry.data));
            state.tasks.insert(scope, Entry { data, stale });
        }
        self.publish(QueryKey::Tasks(scope), CacheChange::Updated);
    }

    /// Removes the column `id` from the cached list and returns it with its
    /// position. Nothing happens when the list is not cached.
    pub fn take_column(&self, id: ColumnId) -> Option<(usize, Column)> {
        let taken = self
            .write()
            .columns
            .as_mut()
            .and_then(|entry| take_from(&mut entry.data, |column| column.id() == id));
        if taken.is_some() {
            self.publish(QueryKey::Columns, CacheChange::Updated);
        }
        taken
    }

    /// Reinserts a column removed with [`BoardCache::take_column`] at
    /// `index`. Skipped when the list is gone or already holds the column.
    pub fn put_back_column(&self, index: usize, column: Column) {
        let restored = self.write().columns.as_mut().is_some_and(|entry| {
            let id = column.id();
            put_back_into(&mut entry.data, index, column, |cached| cached.id() == id)
        });
        if restored {
            self.publish(QueryKey::Columns, CacheChange::RolledBack);
        }
    }

    /// Removes the task `id` from the cached list for `scope` and returns it
    /// with its position. Nothing happens when the list is not cached.
    pub fn take_task(&self, scope: TaskScope, id: TaskId) -> Option<(usize, Task)> {
        let taken = self
            .write()
            .tasks
            .get_mut(&scope)
            .and_then(|entry| take_from(&mut entry.data, |task| task.id() == id));
        if taken.is_some() {
            self.publish(QueryKey::Tasks(scope), CacheChange::Updated);
        }
        taken
    }

    /// Reinserts a task removed with [`BoardCache::take_task`] at `index`.
    /// Skipped when the list is gone or already holds the task.
    pub fn put_back_task(&self, scope: TaskScope, index: usize, task: Task) {
        let restored = self.write().tasks.get_mut(&scope).is_some_and(|entry| {
            let id = task.id();
            put_back_into(&mut entry.data, index, task, |cached| cached.id() == id)
        });
        if restored {
            self.publish(QueryKey::Tasks(scope), CacheChange::RolledBack);
        }
    }

    /// Stores authoritative columns and clears the stale flag.
    pub fn replace_columns(&self, columns: Vec<Column>) {
        self.write().columns = Some(Entry::fresh(columns));
        self.publish(QueryKey::Columns, CacheChange::Refreshed);
    }

    /// Stores authoritative tasks for `scope` and clears the stale flag.
    pub fn replace_tasks(&self, scope: TaskScope, tasks: Vec<Task>) {
        self.write().tasks.insert(scope, Entry::fresh(tasks));
        self.publish(QueryKey::Tasks(scope), CacheChange::Refreshed);
    }

    /// Marks every cached query selected by `filter` stale and returns the
    /// affected keys.
    pub fn invalidate(&self, filter: InvalidateFilter) -> Vec<QueryKey> {
        let keys: Vec<QueryKey> = {
            let mut state = self.write();
            let selected: Vec<QueryKey> = state
                .keys()
                .into_iter()
                .filter(|key| filter.matches(*key))
                .collect();
            for key in &selected {
                state.mark_stale(*key);
            }
            selected
        };
        for key in &keys {
            self.publish(*key, CacheChange::Invalidated);
        }
        keys
    }

    /// Returns the keys of every stale entry.
    #[must_use]
    pub fn stale_keys(&self) -> Vec<QueryKey> {
        let state = self.read();
        state
            .keys()
            .into_iter()
            .filter(|key| state.stale(*key) == Some(true))
            .collect()
    }

    /// Returns `true` when `key` is cached and stale.
    #[must_use]
    pub fn is_stale(&self, key: QueryKey) -> bool {
        self.read().stale(key) == Some(true)
    }

    /// Copies the whole cache.
    #[must_use]
    pub fn snapshot(&self) -> CacheSnapshot {
        self.read().clone()
    }

    /// Restores a snapshot taken with [`BoardCache::snapshot`].
    ///
    /// Every entry is replaced, including ones written after the snapshot was
    /// taken, so this is only safe while no other client shares the cache.
    pub fn restore(&self, snapshot: CacheSnapshot) {
        let keys = {
            let mut state = self.write();
            let mut keys = state.keys();
            for key in snapshot.keys() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
            *state = snapshot;
            keys
        };
        for key in keys {
            self.publish(key, CacheChange::RolledBack);
        }
    }

    fn publish(&self, key: QueryKey, change: CacheChange) {
        if let Err(err) = self.events.send(CacheEvent { key, change }) {
            trace!(key = ?err.0.key, "No cache subscribers");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheSnapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheSnapshot> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn take_from<T>(items: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> Option<(usize, T)> {
    let index = items.iter().position(matches)?;
    Some((index, items.remove(index)))
}

fn put_back_into<T>(items: &mut Vec<T>, index: usize, item: T, same: impl Fn(&T) -> bool) -> bool {
    if items.iter().any(same) {
        return false;
    }
    items.insert(index.min(items.len()), item);
    true
}
