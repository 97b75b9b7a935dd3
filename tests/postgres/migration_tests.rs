//! Schema migration and constraint checks.

use crate::postgres::helpers::prepared_board;
use diesel::connection::SimpleConnection;
use kanban_board::board::adapters::postgres::{apply_migrations, run_pending};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reapplying_migrations_is_a_no_op() {
    let Some(board) = prepared_board().await.expect("database setup") else {
        return;
    };

    let applied = apply_migrations(&board.pool).await.expect("migrate");

    assert!(applied.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn negative_sort_order_is_rejected_by_schema() {
    let Some(board) = prepared_board().await.expect("database setup") else {
        return;
    };
    let pool = board.pool.clone();

    let result = tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().expect("connection");
        let rerun = run_pending(&mut conn).expect("migrate");
        let insert = conn.batch_execute(
            "INSERT INTO board_columns (id, title, sort_order, created_at, updated_at) \
             VALUES (gen_random_uuid(), 'Bad', -1, now(), now())",
        );
        (rerun, insert)
    })
    .await
    .expect("join");

    let (rerun, insert) = result;
    assert!(rerun.is_empty());
    assert!(insert.is_err());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_priority_is_rejected_by_schema() {
    let Some(board) = prepared_board().await.expect("database setup") else {
        return;
    };
    let column = board.column("Todo").await.expect("create column");
    let pool = board.pool.clone();
    let sql = format!(
        "INSERT INTO board_tasks \
         (id, title, column_id, sort_order, priority, status, created_at, updated_at) \
         VALUES (gen_random_uuid(), 'Bad', '{}', 0, 'urgent', 'todo', now(), now())",
        column.id()
    );

    let insert = tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().expect("connection");
        conn.batch_execute(&sql)
    })
    .await
    .expect("join");

    assert!(insert.is_err());
}
