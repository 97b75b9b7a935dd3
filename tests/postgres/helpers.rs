//! Shared helpers for `PostgreSQL` integration tests.

pub use super::cluster::BoxError;
use super::cluster::{TemporaryDatabase, shared_cluster};
use kanban_board::board::{
    actions::BoardActions,
    adapters::postgres::{BoardPgPool, PostgresBoardRepository, apply_migrations, connect},
    domain::{Column, Task},
    validation::{ColumnForm, TaskForm},
};
use mockable::DefaultClock;
use std::sync::Arc;

/// Pool size used by each test database.
pub const TEST_POOL_SIZE: u32 = 8;

/// Action boundary over the `PostgreSQL` adapter.
pub type PgActions = BoardActions<PostgresBoardRepository, DefaultClock>;

/// Migrated database plus the objects tests drive.
///
/// Fields drop in order, so the pool closes before the database is dropped.
pub struct PgBoard {
    /// Request boundary under test.
    pub actions: PgActions,
    /// Adapter shared by `actions`.
    pub repository: Arc<PostgresBoardRepository>,
    /// Pool for direct SQL checks.
    pub pool: BoardPgPool,
    /// Backing database.
    pub database: TemporaryDatabase,
}

/// Creates and migrates a fresh database.
///
/// Returns `Ok(None)` when no `PostgreSQL` server is available.
///
/// # Errors
///
/// Returns an error if the database cannot be created or migrated.
pub async fn prepared_board() -> Result<Option<PgBoard>, BoxError> {
    let created = tokio::task::spawn_blocking(|| {
        shared_cluster()
            .map(|cluster| cluster.temporary_database())
            .transpose()
    })
    .await??;
    let Some(database) = created else {
        return Ok(None);
    };

    let pool = connect(database.url(), TEST_POOL_SIZE)?;
    apply_migrations(&pool).await?;
    let repository = Arc::new(PostgresBoardRepository::new(pool.clone()));
    let actions = BoardActions::new(Arc::clone(&repository), Arc::new(DefaultClock));
    Ok(Some(PgBoard {
        actions,
        repository,
        pool,
        database,
    }))
}

impl PgBoard {
    /// Creates a column through the services.
    ///
    /// # Errors
    ///
    /// Returns the service error.
    pub async fn column(&self, title: &str) -> Result<Column, BoxError> {
        Ok(self.actions.columns().create(&ColumnForm::new(title)).await?)
    }

    /// Creates a task in `column` through the services.
    ///
    /// # Errors
    ///
    /// Returns the service error.
    pub async fn task(&self, column: &Column, title: &str) -> Result<Task, BoxError> {
        Ok(self
            .actions
            .tasks()
            .create(&TaskForm::new(title, column.id().to_string()))
            .await?)
    }
}

/// Returns task titles in list order.
#[must_use]
pub fn titles(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|task| task.title().to_string()).collect()
}

/// Returns task orders in list order.
#[must_use]
pub fn orders(tasks: &[Task]) -> Vec<u32> {
    tasks.iter().map(|task| task.order().value()).collect()
}
