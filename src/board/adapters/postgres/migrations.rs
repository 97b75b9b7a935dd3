//! Embedded schema migrations.
//!
//! Each migration runs in its own transaction and is recorded in
//! `board_schema_migrations`, so applying twice is a no-op.

use super::{BoardPgPool, schema::board_schema_migrations};
use crate::board::ports::{BoardRepositoryError, BoardRepositoryResult};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use tracing::info;

/// Migrations in application order, keyed by directory name.
const MIGRATIONS: &[(&str, &str)] = &[(
    "2026-10-01-000000_create_board_tables",
    include_str!("../../../../migrations/2026-10-01-000000_create_board_tables/up.sql"),
)];

const CREATE_TRACKING_TABLE: &str = "CREATE TABLE IF NOT EXISTS board_schema_migrations (\
     version VARCHAR(255) PRIMARY KEY, \
     run_on TIMESTAMPTZ NOT NULL DEFAULT now())";

/// Applies pending migrations and returns the versions that ran.
///
/// # Errors
///
/// Returns [`BoardRepositoryError::Persistence`] when a connection cannot be
/// obtained or a migration fails; the failing migration is rolled back.
pub async fn apply_migrations(pool: &BoardPgPool) -> BoardRepositoryResult<Vec<&'static str>> {
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
        run_pending(&mut connection)
    })
    .await
    .map_err(BoardRepositoryError::persistence)?
}

/// Applies pending migrations on an open connection.
///
/// # Errors
///
/// Returns [`BoardRepositoryError::Persistence`] when a migration fails.
pub fn run_pending(connection: &mut PgConnection) -> BoardRepositoryResult<Vec<&'static str>> {
    connection.batch_execute(CREATE_TRACKING_TABLE)?;

    let mut applied = Vec::new();
    for &(version, sql) in MIGRATIONS {
        let ran = connection.transaction::<_, BoardRepositoryError, _>(|tx| {
            let recorded = board_schema_migrations::table
                .filter(board_schema_migrations::version.eq(version))
                .count()
                .get_result::<i64>(tx)?;
            if recorded > 0 {
                return Ok(false);
            }
            tx.batch_execute(sql)?;
            diesel::insert_into(board_schema_migrations::table)
                .values(board_schema_migrations::version.eq(version))
                .execute(tx)?;
            Ok(true)
        })?;
        if ran {
            info!(version, "Applied migration");
            applied.push(version);
        }
    }
    Ok(applied)
}
