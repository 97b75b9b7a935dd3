//! Shared fixtures for in-memory integration tests.

use kanban_board::board::{
    actions::BoardActions,
    adapters::memory::InMemoryBoardRepository,
    domain::{ColumnDraft, ColumnId, ColumnTitle, TaskDraft, TaskTitle},
};
use kanban_board::client::{BoardCache, BoardClient};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Action boundary over the in-memory adapter.
pub type MemoryActions = BoardActions<InMemoryBoardRepository, DefaultClock>;

/// Provides a fresh repository for each test.
#[fixture]
pub fn repo() -> InMemoryBoardRepository {
    InMemoryBoardRepository::new()
}

/// Provides a client over a fresh in-memory board.
#[fixture]
pub fn client() -> BoardClient<MemoryActions> {
    let actions = BoardActions::new(
        Arc::new(InMemoryBoardRepository::new()),
        Arc::new(DefaultClock),
    );
    BoardClient::new(Arc::new(actions), Arc::new(BoardCache::default()))
}

/// Builds a column draft.
///
/// # Panics
///
/// Panics if `title` is not a valid column title.
#[must_use]
pub fn column_draft(title: &str) -> ColumnDraft {
    ColumnDraft::new(
        ColumnTitle::new(title).expect("valid column title"),
        None,
        &DefaultClock,
    )
}

/// Builds a task draft for `column_id`.
///
/// # Panics
///
/// Panics if `title` is not a valid task title.
#[must_use]
pub fn task_draft(title: &str, column_id: ColumnId) -> TaskDraft {
    TaskDraft::new(
        TaskTitle::new(title).expect("valid task title"),
        column_id,
        &DefaultClock,
    )
}
