//! Operator CLI for the board store.
//!
//! Usage:
//!
//! ```text
//! kanban [--config kanban.toml] <command>
//! ```
//!
//! `migrate` applies the schema, `seed` appends the demo board, and `show`
//! prints the board as read through a client cache. The mutation commands
//! print the action response as JSON and exit non-zero when it reports a
//! failure.

use clap::{Parser, Subcommand};
use kanban_board::{
    board::{
        actions::{ActionResponse, BoardActions},
        adapters::postgres::{PostgresBoardRepository, apply_migrations, connect},
        domain::AssigneeRoster,
        seed::seed_demo_board,
        validation::{ColumnForm, TaskForm},
    },
    client::{BoardCache, BoardClient, TaskScope},
    config::{BoardConfig, CacheConfig},
    telemetry::init_tracing,
};
use mockable::DefaultClock;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

type PgActions = BoardActions<PostgresBoardRepository, DefaultClock>;

/// Kanban board maintenance commands.
#[derive(Parser, Debug)]
#[command(name = "kanban", version, about = "Maintain a PostgreSQL-backed kanban board")]
struct Cli {
    /// Configuration file; defaults to `kanban.toml` when present.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending schema migrations.
    Migrate,

    /// Append the demo columns and tasks.
    Seed,

    /// Print columns and their tasks.
    Show,

    /// Append a column.
    AddColumn {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Append a task to a column.
    AddTask {
        #[arg(long)]
        column: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
    },

    /// Move a task to the end of another column.
    MoveTask {
        #[arg(long)]
        task: String,
        #[arg(long = "to")]
        target_column: String,
    },

    /// Soft-delete a column and its tasks.
    DeleteColumn {
        #[arg(long)]
        column: String,
    },

    /// Soft-delete a task.
    DeleteTask {
        #[arg(long)]
        task: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, BoxError> {
    let Cli { config, command } = Cli::parse();
    let settings = BoardConfig::load(config.as_deref())?;
    init_tracing(&settings.logging.filter);

    let pool = connect(&settings.database.url, settings.database.pool_max_size)?;
    if matches!(command, Command::Migrate) {
        let applied = apply_migrations(&pool).await?;
        let mut out = io::stdout().lock();
        if applied.is_empty() {
            writeln!(out, "schema is up to date")?;
        }
        for version in applied {
            writeln!(out, "applied {version}")?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let actions = Arc::new(BoardActions::new(
        Arc::new(PostgresBoardRepository::new(pool)),
        Arc::new(DefaultClock),
    ));
    run(&actions, &settings.cache, command).await
}

async fn run(
    actions: &Arc<PgActions>,
    cache: &CacheConfig,
    command: Command,
) -> Result<ExitCode, BoxError> {
    match command {
        Command::Migrate => Ok(ExitCode::SUCCESS),
        Command::Seed => {
            let seeded = seed_demo_board(actions.columns(), actions.tasks()).await?;
            writeln!(
                io::stdout().lock(),
                "seeded {} columns and {} tasks",
                seeded.columns.len(),
                seeded.tasks.len()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Show => {
            let client = BoardClient::new(
                Arc::clone(actions),
                Arc::new(BoardCache::from_config(cache)),
            );
            show(&client).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::AddColumn { title, description } => {
            let mut form = ColumnForm::new(title);
            form.description = description;
            print_response(&actions.create_column(&form).await)
        }
        Command::AddTask {
            column,
            title,
            description,
            priority,
            status,
            assignee,
        } => {
            let form = TaskForm {
                title,
                description,
                priority,
                status,
                assignee_id: assignee,
                column_id: column,
            };
            print_response(&actions.create_task(&form).await)
        }
        Command::MoveTask {
            task,
            target_column,
        } => print_response(&actions.move_task(&task, &target_column).await),
        Command::DeleteColumn { column } => {
            print_response(&actions.delete_column(&column).await)
        }
        Command::DeleteTask { task } => print_response(&actions.delete_task(&task).await),
    }
}

async fn show(client: &BoardClient<PgActions>) -> Result<(), BoxError> {
    let roster = AssigneeRoster::builtin();
    let columns = client.fetch_columns().await?;
    for column in columns {
        client.fetch_tasks(TaskScope::Column(column.id())).await?;
    }

    let mut out = io::stdout().lock();
    for column in client.cache().columns().unwrap_or_default() {
        writeln!(out, "{} [{}] {}", column.order(), column.id(), column.title())?;
        let tasks = client
            .cache()
            .tasks(TaskScope::Column(column.id()))
            .unwrap_or_default();
        for task in tasks {
            writeln!(
                out,
                "  {} [{}] {} ({}, {}) {}",
                task.order(),
                task.id(),
                task.title(),
                task.priority(),
                task.status(),
                roster.display_name(task.assignee_id()),
            )?;
        }
    }
    Ok(())
}

fn print_response<T: Serialize>(response: &ActionResponse<T>) -> Result<ExitCode, BoxError> {
    let rendered = serde_json::to_string_pretty(response)?;
    writeln!(io::stdout().lock(), "{rendered}")?;
    if response.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
