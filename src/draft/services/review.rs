//! Service layer mediating between draft proposals and the canonical
//! task list.

use crate::draft::{
    domain::{DraftDomainError, DraftEdit, DraftId, DraftStatus, DraftTask},
    ports::{DraftRepository, DraftRepositoryError},
};
use crate::task::{
    domain::{NewTask, Task},
    ports::{TaskStore, TaskStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Service-level errors for draft review operations.
#[derive(Debug, Error)]
pub enum DraftReviewError {
    /// The draft does not exist.
    #[error("draft not found: {0}")]
    NotFound(DraftId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] DraftDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(DraftRepositoryError),

    /// Canonical task store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

impl From<DraftRepositoryError> for DraftReviewError {
    fn from(err: DraftRepositoryError) -> Self {
        match err {
            DraftRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for draft review service operations.
pub type DraftReviewResult<T> = Result<T, DraftReviewError>;

/// Outcome of approving a single draft.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovedDraft {
    /// The draft after its transition to `approved`.
    pub draft: DraftTask,
    /// The canonical task created from the draft's effective fields.
    pub task: Task,
}

/// Per-id outcome within a bulk operation.
#[derive(Debug)]
pub struct BulkEntry {
    /// Identifier the operation was attempted on.
    pub id: DraftId,
    /// Success or the error that made this id fail.
    pub outcome: Result<(), DraftReviewError>,
}

/// Best-effort report for a bulk operation.
///
/// Every requested id is attempted; one failing id never aborts the rest.
#[derive(Debug, Default)]
pub struct BulkReport {
    entries: Vec<BulkEntry>,
}

impl BulkReport {
    /// Returns the per-id entries in request order.
    #[must_use]
    pub fn entries(&self) -> &[BulkEntry] {
        &self.entries
    }

    /// Returns the ids that succeeded.
    #[must_use]
    pub fn succeeded(&self) -> Vec<DraftId> {
        self.entries
            .iter()
            .filter(|entry| entry.outcome.is_ok())
            .map(|entry| entry.id)
            .collect()
    }

    /// Returns the ids that failed.
    #[must_use]
    pub fn failed(&self) -> Vec<DraftId> {
        self.entries
            .iter()
            .filter(|entry| entry.outcome.is_err())
            .map(|entry| entry.id)
            .collect()
    }

    fn push(&mut self, id: DraftId, outcome: Result<(), DraftReviewError>) {
        self.entries.push(BulkEntry { id, outcome });
    }
}

/// Draft review orchestration service.
pub struct DraftReviewService<R, S, C>
where
    R: DraftRepository,
    S: TaskStore,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    store: Arc<S>,
    clock: Arc<C>,
}

impl<R, S, C> Clone for DraftReviewService<R, S, C>
where
    R: DraftRepository,
    S: TaskStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, S, C> DraftReviewService<R, S, C>
where
    R: DraftRepository,
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new draft review service.
    #[must_use]
    pub const fn new(repository: Arc<R>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            repository,
            store,
            clock,
        }
    }

    /// Returns drafts filtered by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DraftReviewError::Repository`] when the lookup fails.
    pub async fn list_drafts(
        &self,
        status: Option<DraftStatus>,
    ) -> DraftReviewResult<Vec<DraftTask>> {
        Ok(self.repository.list_by_status(status).await?)
    }

    /// Returns a single draft.
    ///
    /// # Errors
    ///
    /// Returns [`DraftReviewError::NotFound`] when the id is unknown.
    pub async fn get_draft(&self, id: DraftId) -> DraftReviewResult<DraftTask> {
        self.load(id).await
    }

    /// Applies a partial edit to a pending draft.
    ///
    /// # Errors
    ///
    /// Returns [`DraftReviewError::NotFound`] for unknown ids and
    /// [`DraftDomainError::NotPending`] for drafts already reviewed.
    pub async fn edit_draft(&self, id: DraftId, edit: DraftEdit) -> DraftReviewResult<DraftTask> {
        let mut draft = self.load(id).await?;
        draft.edit(&edit, &*self.clock)?;
        self.repository.update(&draft).await?;
        Ok(draft)
    }

    /// Approves a pending draft, applying optional field overrides, and
    /// creates exactly one canonical task from the effective fields.
    ///
    /// A draft that is already approved or rejected fails with
    /// [`DraftDomainError::NotPending`]; no second task is ever created.
    /// When the task store rejects the write the draft is restored to
    /// `pending` so the approval can be retried.
    ///
    /// # Errors
    ///
    /// Returns [`DraftReviewError::NotFound`] for unknown ids,
    /// [`DraftReviewError::Domain`] for non-pending drafts or invalid
    /// overrides, and [`DraftReviewError::Store`] when task creation
    /// fails upstream.
    pub async fn approve_draft(
        &self,
        id: DraftId,
        edits: Option<DraftEdit>,
    ) -> DraftReviewResult<ApprovedDraft> {
        let mut draft = self.load(id).await?;
        if let Some(edit) = edits {
            draft.edit(&edit, &*self.clock)?;
        }
        let reviewable = draft.clone();
        draft.approve(&*self.clock)?;
        let new_task = self.task_from(&draft)?;
        self.repository.update(&draft).await?;

        let task = match self.store.create(&new_task).await {
            Ok(task) => task,
            Err(err) => {
                // Restore the pending draft so approval can be retried.
                if let Err(revert) = self.repository.update(&reviewable).await {
                    warn!(draft = %id, error = %revert, "failed to restore pending draft after store failure");
                }
                return Err(err.into());
            }
        };
        debug!(draft = %id, task = %task.id(), "draft approved into canonical task");
        Ok(ApprovedDraft { draft, task })
    }

    /// Rejects a pending draft. Terminal; no canonical task is created.
    ///
    /// # Errors
    ///
    /// Returns [`DraftReviewError::NotFound`] for unknown ids and
    /// [`DraftDomainError::NotPending`] for drafts already reviewed.
    pub async fn reject_draft(&self, id: DraftId) -> DraftReviewResult<DraftTask> {
        let mut draft = self.load(id).await?;
        draft.reject(&*self.clock)?;
        self.repository.update(&draft).await?;
        Ok(draft)
    }

    /// Deletes a draft outright.
    ///
    /// # Errors
    ///
    /// Returns [`DraftReviewError::NotFound`] when the id is unknown.
    pub async fn delete_draft(&self, id: DraftId) -> DraftReviewResult<()> {
        Ok(self.repository.delete(id).await?)
    }

    /// Approves each id best-effort and reports per-id outcomes.
    ///
    /// The call itself never fails; failures are carried per id in the
    /// returned report.
    pub async fn bulk_approve(&self, ids: Vec<DraftId>) -> BulkReport {
        let mut report = BulkReport::default();
        for id in ids {
            let outcome = self.approve_draft(id, None).await.map(|_| ());
            if let Err(ref err) = outcome {
                warn!(draft = %id, error = %err, "bulk approve entry failed");
            }
            report.push(id, outcome);
        }
        report
    }

    /// Rejects each id best-effort and reports per-id outcomes.
    pub async fn bulk_reject(&self, ids: Vec<DraftId>) -> BulkReport {
        let mut report = BulkReport::default();
        for id in ids {
            let outcome = self.reject_draft(id).await.map(|_| ());
            if let Err(ref err) = outcome {
                warn!(draft = %id, error = %err, "bulk reject entry failed");
            }
            report.push(id, outcome);
        }
        report
    }

    async fn load(&self, id: DraftId) -> DraftReviewResult<DraftTask> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(DraftReviewError::NotFound(id))
    }

    fn task_from(&self, draft: &DraftTask) -> DraftReviewResult<NewTask> {
        let fields = draft.fields();
        let mut task = NewTask::new(fields.title(), &*self.clock)
            .map_err(DraftDomainError::from)?
            .with_tags(fields.tags().to_vec());
        if let Some(description) = fields.description() {
            task = task.with_description(description);
        }
        if let Some(workspace) = fields.workspace() {
            task = task.with_workspace(workspace);
        }
        if let Some(energy) = fields.energy() {
            task = task.with_energy(energy);
        }
        if let Some(estimate) = fields.estimated_minutes() {
            task = task.with_estimated_minutes(estimate);
        }
        if let Some(due_date) = fields.due_date() {
            task = task.with_due_date(due_date);
        }
        Ok(task)
    }
}
