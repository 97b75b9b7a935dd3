//! Client error type.

use crate::board::{actions::ActionFailure, services::ErrorKind, validation::ValidationError};
use thiserror::Error;

/// Errors surfaced by [`super::BoardClient`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The form failed local validation and was not sent.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The backend rejected the request.
    #[error("{message}")]
    Rejected {
        /// Failure category reported by the backend.
        kind: ErrorKind,
        /// Message reported by the backend.
        message: String,
    },
}

impl From<ActionFailure> for ClientError {
    fn from(failure: ActionFailure) -> Self {
        Self::Rejected {
            kind: failure.kind,
            message: failure.message,
        }
    }
}
