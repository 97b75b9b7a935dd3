//! When steps for board ordering scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use kanban_board::board::validation::TaskForm;
use rstest_bdd_macros::when;

#[when(r#"task "{task}" is created in "{column}""#)]
fn task_is_created(world: &mut BoardWorld, task: String, column: String) -> Result<(), eyre::Report> {
    let column_id = world.column_id(&column)?;
    let created = run_async(
        world
            .actions
            .create_task(&TaskForm::new(task.clone(), column_id.to_string())),
    )
    .into_result()
    .wrap_err("create task")?;
    world.tasks.insert(task, created.id());
    Ok(())
}

#[when(r#"task "{task}" is moved to "{column}""#)]
fn task_is_moved(world: &mut BoardWorld, task: String, column: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&task)?;
    let column_id = world.column_id(&column)?;
    let response = run_async(
        world
            .actions
            .move_task(&task_id.to_string(), &column_id.to_string()),
    );
    world.last_failure = response.failure().map(|failure| failure.message.clone());
    Ok(())
}

#[when(r#"column "{column}" is deleted"#)]
fn column_is_deleted(world: &mut BoardWorld, column: String) -> Result<(), eyre::Report> {
    let column_id = world.column_id(&column)?;
    run_async(world.actions.delete_column(&column_id.to_string()))
        .into_result()
        .wrap_err("delete column")?;
    Ok(())
}
