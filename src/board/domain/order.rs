//! Display ordering within a scope.
//!
//! Columns share one global scope; tasks are scoped by their column. New
//! entities are appended with `order = count(live siblings)`, and deletions
//! leave gaps that are never compacted.

use super::BoardDomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Non-negative position of an entity among its live siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortOrder(u32);

impl SortOrder {
    /// Largest order representable by the `INTEGER` storage column.
    const MAX_PERSISTED_VALUE: u32 = i32::MAX.unsigned_abs();

    /// Position of the first entity in an empty scope.
    pub const FIRST: Self = Self(0);

    /// Returns the order that appends after `count` live siblings.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::OrderOverflow`] when the count does not
    /// fit in the persisted range.
    pub fn after_siblings(count: u64) -> Result<Self, BoardDomainError> {
        u32::try_from(count)
            .ok()
            .filter(|value| *value <= Self::MAX_PERSISTED_VALUE)
            .map(Self)
            .ok_or(BoardDomainError::OrderOverflow(count))
    }

    /// Reconstructs an order from its storage representation.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NegativeOrder`] for negative values.
    pub fn from_persisted(value: i32) -> Result<Self, BoardDomainError> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| BoardDomainError::NegativeOrder(i64::from(value)))
    }

    /// Returns the storage representation.
    #[must_use]
    pub fn to_persisted(self) -> i32 {
        i32::try_from(self.0).unwrap_or(i32::MAX)
    }

    /// Returns the numeric position.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entities that can be listed in display order.
pub trait Positioned {
    /// Primary ordering key.
    fn order(&self) -> SortOrder;

    /// Creation timestamp, used to break ties between equal orders.
    fn created_at(&self) -> DateTime<Utc>;

    /// Stable identifier, used as the final tie-breaker.
    fn stable_id(&self) -> Uuid;
}

/// Sorts entities ascending by order, then creation time, then identifier.
///
/// Equal orders can appear in rows written by other tools; the tie-breakers
/// keep listings deterministic.
pub fn sort_by_position<T: Positioned>(items: &mut [T]) {
    items.sort_by(|a, b| {
        a.order()
            .cmp(&b.order())
            .then_with(|| a.created_at().cmp(&b.created_at()))
            .then_with(|| a.stable_id().cmp(&b.stable_id()))
    });
}
