//! Store port for canonical task persistence and lookup.

use crate::task::domain::{NewTask, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Canonical task persistence contract.
///
/// The primary store lives behind a remote HTTP API; implementations are
/// expected to assign identifiers on creation.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Creates a new canonical task and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Upstream`] when the store rejects the
    /// write.
    async fn create(&self, task: &NewTask) -> TaskStoreResult<Task>;

    /// Returns all tasks owned by the authenticated user.
    async fn list(&self) -> TaskStoreResult<Vec<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Marks a task complete and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn complete(&self, id: TaskId) -> TaskStoreResult<Task>;

    /// Replaces the stored task list with the given records.
    async fn sync(&self, tasks: &[Task]) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The remote store or transport failed.
    #[error("task store upstream error: {0}")]
    Upstream(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps an upstream error.
    pub fn upstream(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Upstream(Arc::new(err))
    }
}
