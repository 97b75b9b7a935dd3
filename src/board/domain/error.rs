//! Error types for board domain construction and parsing.

use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The title exceeds the entity's character limit.
    #[error("title has {actual} characters, limit is {max}")]
    TitleTooLong {
        /// Maximum number of characters allowed.
        max: usize,
        /// Number of characters supplied.
        actual: usize,
    },

    /// A persisted order value is negative.
    #[error("order must be non-negative, found {0}")]
    NegativeOrder(i64),

    /// A sibling count does not fit in the order range.
    #[error("order {0} exceeds the storable range")]
    OrderOverflow(u64),
}

/// Error returned while parsing a task priority.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing a task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
