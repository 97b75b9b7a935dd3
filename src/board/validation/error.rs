//! Validation failure type.

use thiserror::Error;

/// First rule violated by a submitted form.
///
/// The display text is the message shown to the person who filled in the form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The title is blank.
    #[error("Title is required")]
    TitleRequired,

    /// The title exceeds the entity's character limit.
    #[error("Title must be less than {max} characters")]
    TitleTooLong {
        /// Maximum number of characters allowed.
        max: usize,
    },

    /// The priority is not one of the enumerated values.
    #[error("Priority must be one of: low, medium, high")]
    InvalidPriority(String),

    /// The status is not one of the enumerated values.
    #[error("Status must be one of: todo, in_progress, done")]
    InvalidStatus(String),

    /// A task form did not name its column.
    #[error("Column ID is required")]
    ColumnIdRequired,

    /// The column reference is not a well-formed identifier.
    #[error("Invalid column ID")]
    InvalidColumnId(String),
}
