//! Repository port behaviour of the in-memory adapter.

use crate::in_memory::helpers::{column_draft, repo, task_draft};
use chrono::Utc;
use kanban_board::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{ColumnChanges, ColumnId, ColumnTitle, TaskId, TaskPatch, TaskStatus},
    ports::{BoardRepositoryError, ColumnRepository, TaskRepository},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reappending_a_draft_is_rejected(repo: InMemoryBoardRepository) {
    let draft = column_draft("Todo");
    repo.append_column(draft.clone()).await.expect("append");

    let duplicate = repo.append_column(draft).await;

    assert!(matches!(
        duplicate,
        Err(BoardRepositoryError::DuplicateColumn(_))
    ));
    assert_eq!(repo.list_columns().await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cascade_stamps_column_and_live_tasks(repo: InMemoryBoardRepository) {
    let column = repo.append_column(column_draft("Todo")).await.expect("append");
    let kept = repo
        .append_task(task_draft("A", column.id()))
        .await
        .expect("append");
    let earlier = repo
        .append_task(task_draft("B", column.id()))
        .await
        .expect("append");
    let first_delete = Utc::now();
    repo.delete_task(earlier.id(), first_delete)
        .await
        .expect("delete");

    repo.delete_column_cascade(column.id(), Utc::now())
        .await
        .expect("cascade");

    assert_eq!(repo.find_column(column.id()).await.expect("find"), None);
    assert_eq!(repo.find_task(kept.id()).await.expect("find"), None);
    assert!(repo.list_tasks().await.expect("list").is_empty());
    assert!(matches!(
        repo.delete_column_cascade(column.id(), Utc::now()).await,
        Err(BoardRepositoryError::ColumnNotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_cannot_join_deleted_columns(repo: InMemoryBoardRepository) {
    let column = repo.append_column(column_draft("Todo")).await.expect("append");
    repo.delete_column_cascade(column.id(), Utc::now())
        .await
        .expect("cascade");

    let appended = repo.append_task(task_draft("A", column.id())).await;

    assert!(matches!(
        appended,
        Err(BoardRepositoryError::ColumnNotFound(id)) if id == column.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_column_replaces_title_and_description(repo: InMemoryBoardRepository) {
    let column = repo.append_column(column_draft("Todo")).await.expect("append");
    let at = Utc::now();

    let updated = repo
        .update_column(
            column.id(),
            ColumnChanges {
                title: ColumnTitle::new("Backlog").expect("valid title"),
                description: Some("Ideas".to_owned()),
            },
            at,
        )
        .await
        .expect("update");

    assert_eq!(updated.title().as_str(), "Backlog");
    assert_eq!(updated.description(), Some("Ideas"));
    assert_eq!(updated.updated_at(), at);
    assert_eq!(updated.created_at(), column.created_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_rows_are_reported_by_identifier(repo: InMemoryBoardRepository) {
    let task_id = TaskId::new();
    let column_id = ColumnId::new();

    let patched = repo
        .update_task(task_id, TaskPatch::default(), Utc::now())
        .await;
    let moved = repo.move_task(task_id, column_id, Utc::now()).await;

    assert!(matches!(patched, Err(BoardRepositoryError::TaskNotFound(id)) if id == task_id));
    assert!(matches!(moved, Err(BoardRepositoryError::TaskNotFound(id)) if id == task_id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn all_tasks_sort_by_order_across_columns(repo: InMemoryBoardRepository) {
    let todo = repo.append_column(column_draft("Todo")).await.expect("append");
    let done = repo.append_column(column_draft("Done")).await.expect("append");
    for (title, column) in [("A", todo.id()), ("B", todo.id()), ("C", done.id())] {
        repo.append_task(task_draft(title, column))
            .await
            .expect("append");
    }

    let listed = repo.list_tasks().await.expect("list");

    let orders: Vec<u32> = listed.iter().map(|task| task.order().value()).collect();
    assert_eq!(orders, vec![0, 0, 1]);
    assert_eq!(
        listed.last().map(|task| task.title().as_str()),
        Some("B")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn patch_status_preserves_placement(repo: InMemoryBoardRepository) {
    let column = repo.append_column(column_draft("Todo")).await.expect("append");
    let task = repo
        .append_task(task_draft("A", column.id()))
        .await
        .expect("append");

    let patched = repo
        .update_task(
            task.id(),
            TaskPatch {
                status: Some(TaskStatus::Done),
                ..TaskPatch::default()
            },
            Utc::now(),
        )
        .await
        .expect("update");

    assert_eq!(patched.status(), TaskStatus::Done);
    assert_eq!(patched.column_id(), column.id());
    assert_eq!(patched.order(), task.order());
}
