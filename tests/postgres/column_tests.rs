//! Column behaviour against `PostgreSQL`.

use crate::postgres::helpers::{PgBoard, orders, prepared_board, titles};
use kanban_board::board::{
    domain::ColumnId,
    services::{BoardServiceError, ErrorKind},
    validation::ColumnForm,
};
use rstest::rstest;
use std::collections::BTreeSet;
use std::sync::Arc;

async fn board() -> Option<PgBoard> {
    prepared_board().await.expect("database setup should succeed")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn columns_list_in_append_order() {
    let Some(board) = board().await else {
        return;
    };
    for title in ["Todo", "Doing", "Done"] {
        board.column(title).await.expect("create column");
    }

    let listed = board.actions.columns().list().await.expect("list");

    let summary: Vec<(u32, String)> = listed
        .iter()
        .map(|column| (column.order().value(), column.title().to_string()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, "Todo".to_owned()),
            (1, "Doing".to_owned()),
            (2, "Done".to_owned())
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_round_trips_description() {
    let Some(board) = board().await else {
        return;
    };
    let column = board.column("Todo").await.expect("create column");

    let described = board
        .actions
        .columns()
        .update(
            column.id(),
            &ColumnForm::new("Backlog").with_description("Not started"),
        )
        .await
        .expect("update");
    let cleared = board
        .actions
        .columns()
        .update(column.id(), &ColumnForm::new("Backlog"))
        .await
        .expect("update");

    assert_eq!(described.description(), Some("Not started"));
    assert_eq!(cleared.description(), None);
    assert_eq!(cleared.order(), column.order());
    assert!(cleared.updated_at() >= column.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_cascades_to_tasks() {
    let Some(board) = board().await else {
        return;
    };
    let todo = board.column("Todo").await.expect("create column");
    let done = board.column("Done").await.expect("create column");
    let hidden = board.task(&todo, "A").await.expect("create task");
    board.task(&todo, "B").await.expect("create task");
    board.task(&done, "C").await.expect("create task");

    board.actions.columns().delete(todo.id()).await.expect("delete");

    let remaining = board.actions.tasks().list().await.expect("list");
    assert_eq!(titles(&remaining), vec!["C"]);
    assert!(matches!(
        board.actions.tasks().get(hidden.id()).await,
        Err(BoardServiceError::TaskNotFound(_))
    ));
    let columns = board.actions.columns().list().await.expect("list");
    assert_eq!(columns.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_column_rejects_further_changes() {
    let Some(board) = board().await else {
        return;
    };
    let column = board.column("Todo").await.expect("create column");
    board
        .actions
        .columns()
        .delete(column.id())
        .await
        .expect("delete");

    let again = board.actions.delete_column(&column.id().to_string()).await;
    let renamed = board
        .actions
        .update_column(&column.id().to_string(), &ColumnForm::new("X"))
        .await;
    let unknown = board
        .actions
        .delete_column(&ColumnId::new().to_string())
        .await;

    for response in [again.failure(), unknown.failure()] {
        let failure = response.expect("delete should fail");
        assert_eq!(failure.message, "Column not found");
        assert_eq!(failure.kind, ErrorKind::NotFound);
    }
    assert_eq!(
        renamed.failure().map(|failure| failure.message.as_str()),
        Some("Column not found")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_column_creates_get_distinct_orders() {
    let Some(board) = board().await else {
        return;
    };
    let board = Arc::new(board);
    let handles: Vec<_> = (0..8)
        .map(|n| {
            let shared = Arc::clone(&board);
            tokio::spawn(async move { shared.column(&format!("C{n}")).await.map(|_| ()) })
        })
        .collect();
    for handle in handles {
        handle
            .await
            .expect("join")
            .expect("create column");
    }

    let orders_seen: BTreeSet<u32> = board
        .actions
        .columns()
        .list()
        .await
        .expect("list")
        .iter()
        .map(|column| column.order().value())
        .collect();
    assert_eq!(orders_seen, (0..8).collect::<BTreeSet<u32>>());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_task_creates_get_distinct_orders() {
    let Some(board) = board().await else {
        return;
    };
    let board = Arc::new(board);
    let column = board.column("Todo").await.expect("create column");
    let handles: Vec<_> = (0..8)
        .map(|n| {
            let shared = Arc::clone(&board);
            let target = column.clone();
            tokio::spawn(async move { shared.task(&target, &format!("T{n}")).await.map(|_| ()) })
        })
        .collect();
    for handle in handles {
        handle
            .await
            .expect("join")
            .expect("create task");
    }

    let listed = board
        .actions
        .tasks()
        .list_by_column(column.id())
        .await
        .expect("list");
    assert_eq!(orders(&listed), (0..8).collect::<Vec<u32>>());
}
