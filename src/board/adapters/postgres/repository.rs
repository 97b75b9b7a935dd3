//! `PostgreSQL` repository implementation for board storage.
//!
//! Order assignment is serialized per scope inside the writing transaction:
//! column appends take a transaction-scoped advisory lock, task appends and
//! moves lock the parent column row.

use super::{
    models::{ColumnChangeset, ColumnRow, NewColumnRow, NewTaskRow, TaskChangeset, TaskRow},
    schema::{board_columns, board_tasks},
};
use crate::board::{
    domain::{
        AssigneeId, Column, ColumnChanges, ColumnDraft, ColumnId, ColumnTitle,
        PersistedColumnData, PersistedTaskData, SortOrder, Task, TaskDraft, TaskId, TaskPatch,
        TaskPriority, TaskStatus, TaskTitle,
    },
    ports::{BoardRepositoryError, BoardRepositoryResult, ColumnRepository, TaskRepository},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::IsNull;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::BigInt;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// Advisory lock key serializing column appends.
const COLUMN_SCOPE_LOCK_KEY: i64 = 0x6b61_6e62_616e_0001;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`BoardRepositoryError::Persistence`] when the pool cannot open
/// its initial connections.
pub fn connect(database_url: &str, max_size: u32) -> BoardRepositoryResult<BoardPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(BoardRepositoryError::persistence)
}

/// `PostgreSQL`-backed board repository.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: BoardPgPool,
}

impl PostgresBoardRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &BoardPgPool {
        &self.pool
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardRepositoryError::persistence)?
    }
}

impl From<DieselError> for BoardRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// Filter matching columns that have not been soft-deleted.
fn column_is_live() -> IsNull<board_columns::deleted_at> {
    board_columns::deleted_at.is_null()
}

/// Filter matching tasks that have not been soft-deleted.
fn task_is_live() -> IsNull<board_tasks::deleted_at> {
    board_tasks::deleted_at.is_null()
}

#[async_trait]
impl ColumnRepository for PostgresBoardRepository {
    async fn append_column(&self, draft: ColumnDraft) -> BoardRepositoryResult<Column> {
        let column_id = draft.id();
        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardRepositoryError, _>(|tx| {
                diesel::sql_query("SELECT pg_advisory_xact_lock($1)")
                    .bind::<BigInt, _>(COLUMN_SCOPE_LOCK_KEY)
                    .execute(tx)?;

                let siblings = board_columns::table
                    .filter(column_is_live())
                    .count()
                    .get_result::<i64>(tx)?;
                let new_row = to_new_column_row(draft, order_after(siblings)?);

                let row = diesel::insert_into(board_columns::table)
                    .values(&new_row)
                    .returning(ColumnRow::as_returning())
                    .get_result(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            BoardRepositoryError::DuplicateColumn(column_id)
                        }
                        _ => BoardRepositoryError::persistence(err),
                    })?;
                row_to_column(row)
            })
        })
        .await
    }

    async fn update_column(
        &self,
        id: ColumnId,
        changes: ColumnChanges,
        at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Column> {
        let changeset = ColumnChangeset {
            title: changes.title.as_str().to_owned(),
            description: changes.description,
            updated_at: at,
        };
        self.run_blocking(move |connection| {
            let row = diesel::update(
                board_columns::table
                    .filter(board_columns::id.eq(id.into_inner()))
                    .filter(column_is_live()),
            )
            .set(&changeset)
            .returning(ColumnRow::as_returning())
            .get_result(connection)
            .optional()?;
            row.map_or(Err(BoardRepositoryError::ColumnNotFound(id)), row_to_column)
        })
        .await
    }

    async fn delete_column_cascade(
        &self,
        id: ColumnId,
        at: DateTime<Utc>,
    ) -> BoardRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardRepositoryError, _>(|tx| {
                let deleted = diesel::update(
                    board_columns::table
                        .filter(board_columns::id.eq(id.into_inner()))
                        .filter(column_is_live()),
                )
                .set((
                    board_columns::deleted_at.eq(Some(at)),
                    board_columns::updated_at.eq(at),
                ))
                .execute(tx)?;
                if deleted == 0 {
                    return Err(BoardRepositoryError::ColumnNotFound(id));
                }

                diesel::update(
                    board_tasks::table
                        .filter(board_tasks::column_id.eq(id.into_inner()))
                        .filter(task_is_live()),
                )
                .set((
                    board_tasks::deleted_at.eq(Some(at)),
                    board_tasks::updated_at.eq(at),
                ))
                .execute(tx)?;
                Ok(())
            })
        })
        .await
    }

    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        self.run_blocking(move |connection| {
            let row = board_columns::table
                .filter(board_columns::id.eq(id.into_inner()))
                .filter(column_is_live())
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()?;
            row.map(row_to_column).transpose()
        })
        .await
    }

    async fn list_columns(&self) -> BoardRepositoryResult<Vec<Column>> {
        self.run_blocking(|connection| {
            board_columns::table
                .filter(column_is_live())
                .order((
                    board_columns::sort_order.asc(),
                    board_columns::created_at.asc(),
                    board_columns::id.asc(),
                ))
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)?
                .into_iter()
                .map(row_to_column)
                .collect()
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresBoardRepository {
    async fn append_task(&self, draft: TaskDraft) -> BoardRepositoryResult<Task> {
        let task_id = draft.id();
        let column_id = draft.column_id();
        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardRepositoryError, _>(|tx| {
                lock_live_column(tx, column_id)?;
                let siblings = count_live_tasks_in(tx, column_id)?;
                let new_row = to_new_task_row(draft, order_after(siblings)?);

                let row = diesel::insert_into(board_tasks::table)
                    .values(&new_row)
                    .returning(TaskRow::as_returning())
                    .get_result(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            BoardRepositoryError::DuplicateTask(task_id)
                        }
                        _ => BoardRepositoryError::persistence(err),
                    })?;
                row_to_task(row)
            })
        })
        .await
    }

    async fn update_task(
        &self,
        id: TaskId,
        patch: TaskPatch,
        at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Task> {
        let changeset = to_task_changeset(patch, at);
        self.run_blocking(move |connection| {
            let row = diesel::update(
                board_tasks::table
                    .filter(board_tasks::id.eq(id.into_inner()))
                    .filter(task_is_live()),
            )
            .set(&changeset)
            .returning(TaskRow::as_returning())
            .get_result(connection)
            .optional()?;
            row.map_or(Err(BoardRepositoryError::TaskNotFound(id)), row_to_task)
        })
        .await
    }

    async fn delete_task(&self, id: TaskId, at: DateTime<Utc>) -> BoardRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::update(
                board_tasks::table
                    .filter(board_tasks::id.eq(id.into_inner()))
                    .filter(task_is_live()),
            )
            .set((
                board_tasks::deleted_at.eq(Some(at)),
                board_tasks::updated_at.eq(at),
            ))
            .execute(connection)?;
            if deleted == 0 {
                return Err(BoardRepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn move_task(
        &self,
        id: TaskId,
        target: ColumnId,
        at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardRepositoryError, _>(|tx| {
                let existing = board_tasks::table
                    .filter(board_tasks::id.eq(id.into_inner()))
                    .filter(task_is_live())
                    .select(board_tasks::id)
                    .first::<uuid::Uuid>(tx)
                    .optional()?;
                if existing.is_none() {
                    return Err(BoardRepositoryError::TaskNotFound(id));
                }

                // Target column first, then the task row.
                lock_live_column(tx, target)?;
                let locked = board_tasks::table
                    .filter(board_tasks::id.eq(id.into_inner()))
                    .filter(task_is_live())
                    .select(board_tasks::id)
                    .for_update()
                    .first::<uuid::Uuid>(tx)
                    .optional()?;
                if locked.is_none() {
                    return Err(BoardRepositoryError::TaskNotFound(id));
                }

                let order = order_after(count_live_tasks_in(tx, target)?)?;
                let row = diesel::update(board_tasks::table.find(id.into_inner()))
                    .set((
                        board_tasks::column_id.eq(target.into_inner()),
                        board_tasks::sort_order.eq(order.to_persisted()),
                        board_tasks::updated_at.eq(at),
                    ))
                    .returning(TaskRow::as_returning())
                    .get_result(tx)?;
                row_to_task(row)
            })
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = board_tasks::table
                .filter(board_tasks::id.eq(id.into_inner()))
                .filter(task_is_live())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_tasks(&self) -> BoardRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            board_tasks::table
                .filter(task_is_live())
                .order((
                    board_tasks::sort_order.asc(),
                    board_tasks::created_at.asc(),
                    board_tasks::id.asc(),
                ))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn list_tasks_in_column(&self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            board_tasks::table
                .filter(board_tasks::column_id.eq(column_id.into_inner()))
                .filter(task_is_live())
                .order((
                    board_tasks::sort_order.asc(),
                    board_tasks::created_at.asc(),
                    board_tasks::id.asc(),
                ))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }
}

/// Locks a live column row for the rest of the transaction.
fn lock_live_column(connection: &mut PgConnection, id: ColumnId) -> BoardRepositoryResult<()> {
    let locked = board_columns::table
        .filter(board_columns::id.eq(id.into_inner()))
        .filter(column_is_live())
        .select(board_columns::id)
        .for_update()
        .first::<uuid::Uuid>(connection)
        .optional()?;
    locked
        .map(|_| ())
        .ok_or(BoardRepositoryError::ColumnNotFound(id))
}

fn count_live_tasks_in(connection: &mut PgConnection, id: ColumnId) -> BoardRepositoryResult<i64> {
    let count = board_tasks::table
        .filter(board_tasks::column_id.eq(id.into_inner()))
        .filter(task_is_live())
        .count()
        .get_result::<i64>(connection)?;
    Ok(count)
}

fn order_after(siblings: i64) -> BoardRepositoryResult<SortOrder> {
    let count = u64::try_from(siblings).map_err(BoardRepositoryError::persistence)?;
    SortOrder::after_siblings(count).map_err(BoardRepositoryError::persistence)
}

fn to_new_column_row(draft: ColumnDraft, order: SortOrder) -> NewColumnRow {
    let column = draft.into_column(order);
    NewColumnRow {
        id: column.id().into_inner(),
        title: column.title().as_str().to_owned(),
        description: column.description().map(str::to_owned),
        sort_order: column.order().to_persisted(),
        created_at: column.created_at(),
        updated_at: column.updated_at(),
    }
}

fn to_new_task_row(draft: TaskDraft, order: SortOrder) -> NewTaskRow {
    let task = draft.into_task(order);
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        column_id: task.column_id().into_inner(),
        sort_order: task.order().to_persisted(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        assignee_id: task.assignee_id().map(|id| id.as_str().to_owned()),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_task_changeset(patch: TaskPatch, at: DateTime<Utc>) -> TaskChangeset {
    let TaskPatch {
        title,
        description,
        priority,
        status,
        assignee_id,
    } = patch;
    TaskChangeset {
        title: title.map(|value| value.as_str().to_owned()),
        description,
        priority: priority.map(|value| value.as_str().to_owned()),
        status: status.map(|value| value.as_str().to_owned()),
        assignee_id: assignee_id.map(|value| value.map(|id| id.as_str().to_owned())),
        updated_at: at,
    }
}

fn row_to_column(row: ColumnRow) -> BoardRepositoryResult<Column> {
    let ColumnRow {
        id,
        title: persisted_title,
        description,
        sort_order,
        deleted_at,
        created_at,
        updated_at,
    } = row;

    let title = ColumnTitle::new(&persisted_title).map_err(BoardRepositoryError::corrupt_row)?;
    let order = SortOrder::from_persisted(sort_order).map_err(BoardRepositoryError::corrupt_row)?;

    Ok(Column::from_persisted(PersistedColumnData {
        id: ColumnId::from_uuid(id),
        title,
        description,
        order,
        deleted_at,
        created_at,
        updated_at,
    }))
}

fn row_to_task(row: TaskRow) -> BoardRepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        description,
        column_id,
        sort_order,
        priority: persisted_priority,
        status: persisted_status,
        assignee_id,
        deleted_at,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(&persisted_title).map_err(BoardRepositoryError::corrupt_row)?;
    let order = SortOrder::from_persisted(sort_order).map_err(BoardRepositoryError::corrupt_row)?;
    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(BoardRepositoryError::corrupt_row)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(BoardRepositoryError::corrupt_row)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        column_id: ColumnId::from_uuid(column_id),
        order,
        priority,
        status,
        assignee_id: assignee_id.as_deref().and_then(AssigneeId::parse),
        deleted_at,
        created_at,
        updated_at,
    }))
}
