//! Service-level errors and the failure taxonomy shared with callers.

use crate::board::{
    domain::{ColumnId, TaskId},
    ports::BoardRepositoryError,
    validation::ValidationError,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Coarse failure category reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The submitted form was rejected.
    Validation,
    /// The referenced entity is missing or deleted.
    NotFound,
    /// The store failed.
    Store,
}

impl ErrorKind {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Store => "store",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by board services.
#[derive(Debug, Clone, Error)]
pub enum BoardServiceError {
    /// The form failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The column is missing or deleted.
    #[error("Column not found")]
    ColumnNotFound(ColumnId),

    /// The column named by a new task is missing or deleted.
    #[error("Invalid column ID")]
    UnknownTaskColumn(ColumnId),

    /// The destination of a move is missing or deleted.
    #[error("Target column not found")]
    TargetColumnNotFound(ColumnId),

    /// The task is missing or deleted.
    #[error("Task not found")]
    TaskNotFound(TaskId),

    /// The store failed; the message is passed through unchanged.
    #[error(transparent)]
    Store(BoardRepositoryError),
}

impl BoardServiceError {
    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::ColumnNotFound(_)
            | Self::UnknownTaskColumn(_)
            | Self::TargetColumnNotFound(_)
            | Self::TaskNotFound(_) => ErrorKind::NotFound,
            Self::Store(_) => ErrorKind::Store,
        }
    }
}

impl From<BoardRepositoryError> for BoardServiceError {
    fn from(err: BoardRepositoryError) -> Self {
        match err {
            BoardRepositoryError::ColumnNotFound(id) => Self::ColumnNotFound(id),
            BoardRepositoryError::TaskNotFound(id) => Self::TaskNotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;
