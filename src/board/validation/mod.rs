//! Form validation for column and task payloads.
//!
//! Rules are pure functions in [`rules`]; [`validator`] composes them per
//! form and reports the first violation.

mod error;
mod forms;
pub mod rules;
pub mod validator;

pub use error::ValidationError;
pub use forms::{ColumnForm, TaskForm, TaskPatchForm};
pub use validator::{
    ValidColumn, ValidTask, validate_column_form, validate_task_form, validate_task_patch,
};
