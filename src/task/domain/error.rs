//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is not a positive integer.
    #[error("invalid task identifier {0}, expected a positive integer")]
    InvalidTaskId(i64),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The workspace value is unsupported.
    #[error("unsupported workspace: {0}")]
    InvalidWorkspace(String),

    /// The energy level value is unsupported.
    #[error("unsupported energy level: {0}")]
    InvalidEnergy(String),

    /// The time estimate is zero minutes.
    #[error("estimated time must be at least one minute")]
    InvalidEstimatedMinutes,

    /// The task status value is unsupported.
    #[error("unknown task status: {0}")]
    InvalidStatus(String),

    /// The recurrence rule value is unsupported.
    #[error("unknown recurrence rule: {0}")]
    InvalidRecurrence(String),
}
