//! Application services for board operations.

mod columns;
mod error;
mod tasks;

pub use columns::ColumnService;
pub use error::{BoardServiceError, BoardServiceResult, ErrorKind};
pub use tasks::TaskService;
