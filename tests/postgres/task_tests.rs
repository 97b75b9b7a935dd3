//! Task behaviour against `PostgreSQL`.

use crate::postgres::helpers::{PgBoard, orders, prepared_board, titles};
use kanban_board::board::{
    domain::{TaskId, TaskPriority, TaskStatus},
    validation::{TaskForm, TaskPatchForm},
};
use rstest::rstest;

async fn board() -> Option<PgBoard> {
    prepared_board().await.expect("database setup should succeed")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_fields_round_trip() {
    let Some(board) = board().await else {
        return;
    };
    let column = board.column("Todo").await.expect("create column");
    let form = TaskForm::new("Design landing page", column.id().to_string())
        .with_description("Wireframes first")
        .with_priority("high")
        .with_status("in_progress")
        .with_assignee("1");

    let created = board
        .actions
        .tasks()
        .create(&form)
        .await
        .expect("create task");
    let found = board
        .actions
        .tasks()
        .get(created.id())
        .await
        .expect("get task");

    assert_eq!(found, created);
    assert_eq!(found.priority(), TaskPriority::High);
    assert_eq!(found.status(), TaskStatus::InProgress);
    assert_eq!(found.assignee_id().map(|id| id.as_str()), Some("1"));
    assert_eq!(found.description(), Some("Wireframes first"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn patch_clears_and_keeps_fields() {
    let Some(board) = board().await else {
        return;
    };
    let column = board.column("Todo").await.expect("create column");
    let created = board
        .actions
        .tasks()
        .create(
            &TaskForm::new("A", column.id().to_string())
                .with_description("notes")
                .with_assignee("2"),
        )
        .await
        .expect("create task");

    let patched = board
        .actions
        .tasks()
        .update(
            created.id(),
            &TaskPatchForm::new().with_assignee("").with_priority("low"),
        )
        .await
        .expect("update task");

    assert_eq!(patched.assignee_id(), None);
    assert_eq!(patched.priority(), TaskPriority::Low);
    assert_eq!(patched.description(), Some("notes"));
    assert_eq!(patched.order(), created.order());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn move_appends_and_leaves_gap() {
    let Some(board) = board().await else {
        return;
    };
    let todo = board.column("Todo").await.expect("create column");
    let doing = board.column("Doing").await.expect("create column");
    let first = board.task(&todo, "A").await.expect("create task");
    board.task(&todo, "B").await.expect("create task");
    board.task(&doing, "C").await.expect("create task");

    let moved = board
        .actions
        .tasks()
        .move_to_column(first.id(), doing.id())
        .await
        .expect("move task");

    assert_eq!(moved.column_id(), doing.id());
    assert_eq!(moved.order().value(), 1);
    let source = board
        .actions
        .tasks()
        .list_by_column(todo.id())
        .await
        .expect("list");
    let target = board
        .actions
        .tasks()
        .list_by_column(doing.id())
        .await
        .expect("list");
    assert_eq!(orders(&source), vec![1]);
    assert_eq!(titles(&target), vec!["C", "A"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn move_within_column_goes_to_end() {
    let Some(board) = board().await else {
        return;
    };
    let todo = board.column("Todo").await.expect("create column");
    let first = board.task(&todo, "A").await.expect("create task");
    board.task(&todo, "B").await.expect("create task");

    let moved = board
        .actions
        .tasks()
        .move_to_column(first.id(), todo.id())
        .await
        .expect("move task");

    assert_eq!(moved.order().value(), 2);
    let listed = board
        .actions
        .tasks()
        .list_by_column(todo.id())
        .await
        .expect("list");
    assert_eq!(titles(&listed), vec!["B", "A"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn move_into_deleted_column_is_rejected() {
    let Some(board) = board().await else {
        return;
    };
    let todo = board.column("Todo").await.expect("create column");
    let gone = board.column("Gone").await.expect("create column");
    let task = board.task(&todo, "A").await.expect("create task");
    board
        .actions
        .columns()
        .delete(gone.id())
        .await
        .expect("delete column");

    let response = board
        .actions
        .move_task(&task.id().to_string(), &gone.id().to_string())
        .await;
    let missing = board
        .actions
        .move_task(&TaskId::new().to_string(), &todo.id().to_string())
        .await;

    assert_eq!(
        response.failure().map(|failure| failure.message.as_str()),
        Some("Target column not found")
    );
    assert_eq!(
        missing.failure().map(|failure| failure.message.as_str()),
        Some("Task not found")
    );
    let unchanged = board.actions.tasks().get(task.id()).await.expect("get");
    assert_eq!(unchanged, task);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_is_hidden_and_not_renumbered() {
    let Some(board) = board().await else {
        return;
    };
    let todo = board.column("Todo").await.expect("create column");
    let first = board.task(&todo, "A").await.expect("create task");
    board.task(&todo, "B").await.expect("create task");

    board
        .actions
        .tasks()
        .delete(first.id())
        .await
        .expect("delete task");
    let appended = board.task(&todo, "C").await.expect("create task");

    // One live sibling, so "C" reuses order 1 next to "B".
    assert_eq!(appended.order().value(), 1);
    let listed = board
        .actions
        .tasks()
        .list_by_column(todo.id())
        .await
        .expect("list");
    assert_eq!(titles(&listed), vec!["B", "C"]);
    assert_eq!(
        board
            .actions
            .delete_task(&first.id().to_string())
            .await
            .failure()
            .map(|failure| failure.message.clone()),
        Some("Task not found".to_owned())
    );
}
