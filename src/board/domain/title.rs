//! Validated title values for columns and tasks.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enforces the non-empty and length rules. The title is kept as given;
/// only the emptiness check ignores surrounding whitespace.
fn checked(value: &str, max: usize) -> Result<String, BoardDomainError> {
    if value.trim().is_empty() {
        return Err(BoardDomainError::EmptyTitle);
    }
    let actual = value.chars().count();
    if actual > max {
        return Err(BoardDomainError::TitleTooLong { max, actual });
    }
    Ok(value.to_owned())
}

/// Column heading, at most [`ColumnTitle::MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnTitle(String);

impl ColumnTitle {
    /// Maximum number of characters in a column title.
    pub const MAX_CHARS: usize = 50;

    /// Creates a validated column title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] for blank input and
    /// [`BoardDomainError::TitleTooLong`] past the character limit.
    pub fn new(value: impl AsRef<str>) -> Result<Self, BoardDomainError> {
        checked(value.as_ref(), Self::MAX_CHARS).map(Self)
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ColumnTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ColumnTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task card title, at most [`TaskTitle::MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Maximum number of characters in a task title.
    pub const MAX_CHARS: usize = 100;

    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] for blank input and
    /// [`BoardDomainError::TitleTooLong`] past the character limit.
    pub fn new(value: impl AsRef<str>) -> Result<Self, BoardDomainError> {
        checked(value.as_ref(), Self::MAX_CHARS).map(Self)
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
