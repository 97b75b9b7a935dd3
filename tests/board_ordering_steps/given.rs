//! Given steps for board ordering scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use kanban_board::board::validation::{ColumnForm, TaskForm};
use rstest_bdd_macros::given;

#[given(r#"a column "{title}""#)]
fn a_column(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let column = run_async(world.actions.create_column(&ColumnForm::new(title.clone())))
        .into_result()
        .wrap_err("create column in scenario setup")?;
    world.columns.insert(title, column.id());
    Ok(())
}

#[given(r#"a task "{task}" in "{column}""#)]
fn a_task_in(world: &mut BoardWorld, task: String, column: String) -> Result<(), eyre::Report> {
    let column_id = world.column_id(&column)?;
    let created = run_async(
        world
            .actions
            .create_task(&TaskForm::new(task.clone(), column_id.to_string())),
    )
    .into_result()
    .wrap_err("create task in scenario setup")?;
    world.tasks.insert(task, created.id());
    Ok(())
}
