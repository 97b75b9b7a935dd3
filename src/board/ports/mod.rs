//! Port contracts for board persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the board
//! services. Stores own order assignment so that the sibling count and the
//! write happen under one lock.

pub mod repository;

pub use repository::{
    BoardRepositoryError, BoardRepositoryResult, ColumnRepository, TaskRepository,
};
