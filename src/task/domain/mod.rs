//! Domain model for canonical tasks.
//!
//! The task domain models the user-owned task records held by the task
//! store, including the categorisation dimensions shared with draft
//! proposals, while keeping all infrastructure concerns outside of the
//! domain boundary.

mod error;
mod fields;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use fields::{Energy, EstimatedMinutes, Workspace};
pub use ids::TaskId;
pub use task::{NewTask, PersistedTaskData, Recurrence, Task, TaskStatus};
