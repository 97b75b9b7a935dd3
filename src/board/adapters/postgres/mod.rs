//! `PostgreSQL` adapters for board persistence.

mod migrations;
mod models;
mod repository;
mod schema;

pub use migrations::{apply_migrations, run_pending};
pub use repository::{BoardPgPool, PostgresBoardRepository, connect};
