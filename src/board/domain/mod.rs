//! Domain model for the board.
//!
//! Columns and tasks, their identifiers and validated values, and the
//! ordering rules shared by every store. Infrastructure concerns stay outside
//! this boundary.

mod assignee;
mod column;
mod error;
mod ids;
mod order;
mod task;
mod title;

pub use assignee::{Assignee, AssigneeRoster, UNASSIGNED, UNKNOWN_ASSIGNEE};
pub use column::{Column, ColumnChanges, ColumnDraft, PersistedColumnData};
pub use error::{BoardDomainError, ParsePriorityError, ParseTaskStatusError};
pub use ids::{AssigneeId, ColumnId, TaskId};
pub use order::{Positioned, SortOrder, sort_by_position};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
pub use title::{ColumnTitle, TaskTitle};
