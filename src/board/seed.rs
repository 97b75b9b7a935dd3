//! Demo board used by `kanban seed`.
//!
//! Rows are appended through the services, so orders are assigned exactly as
//! for user-created entities.

use crate::board::{
    domain::{Column, Task},
    ports::{ColumnRepository, TaskRepository},
    services::{BoardServiceResult, ColumnService, TaskService},
    validation::{ColumnForm, TaskForm},
};
use mockable::Clock;
use tracing::info;

struct SeedTask {
    title: &'static str,
    description: &'static str,
    priority: &'static str,
    status: &'static str,
    assignee: Option<&'static str>,
}

struct SeedColumn {
    title: &'static str,
    tasks: &'static [SeedTask],
}

const DEMO_BOARD: &[SeedColumn] = &[
    SeedColumn {
        title: "Todo",
        tasks: &[
            SeedTask {
                title: "Design landing page",
                description: "Create wireframes and mockups for the new landing page",
                priority: "high",
                status: "todo",
                assignee: Some("1"),
            },
            SeedTask {
                title: "Set up authentication",
                description: "Implement user login and registration",
                priority: "medium",
                status: "todo",
                assignee: Some("2"),
            },
            SeedTask {
                title: "Review code quality",
                description: "Audit codebase for performance improvements",
                priority: "medium",
                status: "todo",
                assignee: None,
            },
        ],
    },
    SeedColumn {
        title: "In Progress",
        tasks: &[SeedTask {
            title: "Database migration",
            description: "Update user table schema",
            priority: "low",
            status: "in_progress",
            assignee: Some("3"),
        }],
    },
    SeedColumn {
        title: "Done",
        tasks: &[SeedTask {
            title: "Deploy to production",
            description: "Set up CI/CD pipeline",
            priority: "high",
            status: "done",
            assignee: Some("4"),
        }],
    },
];

/// Rows created by [`seed_demo_board`].
#[derive(Debug, Clone, Default)]
pub struct SeededBoard {
    /// Created columns in board order.
    pub columns: Vec<Column>,
    /// Created tasks in creation order.
    pub tasks: Vec<Task>,
}

/// Appends the demo columns and tasks after whatever the board already holds.
///
/// # Errors
///
/// Returns the first service error; rows created before it are kept.
pub async fn seed_demo_board<R, C>(
    columns: &ColumnService<R, C>,
    tasks: &TaskService<R, C>,
) -> BoardServiceResult<SeededBoard>
where
    R: ColumnRepository + TaskRepository,
    C: Clock + Send + Sync,
{
    let mut seeded = SeededBoard::default();
    for seed_column in DEMO_BOARD {
        let column = columns.create(&ColumnForm::new(seed_column.title)).await?;
        for seed_task in seed_column.tasks {
            let mut form = TaskForm::new(seed_task.title, column.id().to_string())
                .with_description(seed_task.description)
                .with_priority(seed_task.priority)
                .with_status(seed_task.status);
            if let Some(assignee) = seed_task.assignee {
                form = form.with_assignee(assignee);
            }
            seeded.tasks.push(tasks.create(&form).await?);
        }
        seeded.columns.push(column);
    }
    info!(
        columns = seeded.columns.len(),
        tasks = seeded.tasks.len(),
        "Seeded demo board"
    );
    Ok(seeded)
}
