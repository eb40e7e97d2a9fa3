//! Repository port for draft persistence, lookup, and review transitions.

use crate::draft::domain::{DraftId, DraftStatus, DraftTask, NewDraft};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for draft repository operations.
pub type DraftRepositoryResult<T> = Result<T, DraftRepositoryError>;

/// Draft persistence contract.
#[async_trait]
pub trait DraftRepository: Send + Sync {
    /// Stores an unsaved draft, assigning its identifier, and returns the
    /// stored aggregate with `pending` status.
    async fn create(&self, draft: &NewDraft) -> DraftRepositoryResult<DraftTask>;

    /// Persists changes to an existing draft (field edits, status,
    /// timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`DraftRepositoryError::NotFound`] when the draft does not
    /// exist.
    async fn update(&self, draft: &DraftTask) -> DraftRepositoryResult<()>;

    /// Finds a draft by identifier.
    ///
    /// Returns `None` when the draft does not exist.
    async fn find_by_id(&self, id: DraftId) -> DraftRepositoryResult<Option<DraftTask>>;

    /// Returns drafts filtered by status, newest first.
    ///
    /// `None` lists every draft regardless of status.
    async fn list_by_status(
        &self,
        status: Option<DraftStatus>,
    ) -> DraftRepositoryResult<Vec<DraftTask>>;

    /// Deletes a draft.
    ///
    /// # Errors
    ///
    /// Returns [`DraftRepositoryError::NotFound`] when the draft does not
    /// exist.
    async fn delete(&self, id: DraftId) -> DraftRepositoryResult<()>;
}

/// Errors returned by draft repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DraftRepositoryError {
    /// The draft was not found.
    #[error("draft not found: {0}")]
    NotFound(DraftId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DraftRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
