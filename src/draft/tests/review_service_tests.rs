//! Unit tests for the draft review service.

use super::new_gmail_draft;
use crate::draft::adapters::memory::InMemoryDraftRepository;
use crate::draft::domain::{DraftDomainError, DraftEdit, DraftId, DraftStatus, DraftTask};
use crate::draft::ports::DraftRepository;
use crate::draft::services::{DraftReviewError, DraftReviewService};
use crate::task::adapters::memory::InMemoryTaskStore;
use crate::task::domain::{EstimatedMinutes, NewTask, Task, TaskId, TaskStatus, Workspace};
use crate::task::ports::{TaskStore, TaskStoreError, TaskStoreResult};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestService =
    DraftReviewService<InMemoryDraftRepository, InMemoryTaskStore<DefaultClock>, DefaultClock>;

struct Harness {
    service: TestService,
    repository: Arc<InMemoryDraftRepository>,
    store: Arc<InMemoryTaskStore<DefaultClock>>,
}

#[fixture]
fn harness() -> Harness {
    let clock = Arc::new(DefaultClock);
    let repository = Arc::new(InMemoryDraftRepository::new());
    let store = Arc::new(InMemoryTaskStore::new(Arc::clone(&clock)));
    let service = DraftReviewService::new(Arc::clone(&repository), Arc::clone(&store), clock);
    Harness {
        service,
        repository,
        store,
    }
}

impl Harness {
    async fn seed_draft(&self, title: &str) -> eyre::Result<DraftTask> {
        Ok(self.repository.create(&new_gmail_draft(title)).await?)
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approve_creates_exactly_one_task(harness: Harness) -> eyre::Result<()> {
    let draft = harness.seed_draft("Reply to accountant").await?;

    let approved = harness.service.approve_draft(draft.id(), None).await?;

    ensure!(approved.draft.status() == DraftStatus::Approved);
    ensure!(approved.task.title() == "Reply to accountant");
    ensure!(approved.task.status() == TaskStatus::Pending);
    ensure!(harness.store.list().await?.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approve_applies_overrides_to_the_created_task(harness: Harness) -> eyre::Result<()> {
    let draft = harness.seed_draft("Original title").await?;
    let edit = DraftEdit::new()
        .with_title("Reviewed title")
        .with_workspace(Workspace::Job)
        .with_estimated_minutes(EstimatedMinutes::new(45)?);

    let approved = harness.service.approve_draft(draft.id(), Some(edit)).await?;

    ensure!(approved.task.title() == "Reviewed title");
    ensure!(approved.task.workspace() == Some(Workspace::Job));
    ensure!(approved.task.estimated_minutes() == Some(EstimatedMinutes::new(45)?));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn double_approval_fails_without_a_second_task(harness: Harness) -> eyre::Result<()> {
    let draft = harness.seed_draft("One task only").await?;
    harness.service.approve_draft(draft.id(), None).await?;

    let second = harness.service.approve_draft(draft.id(), None).await;

    ensure!(matches!(
        second,
        Err(DraftReviewError::Domain(DraftDomainError::NotPending {
            status: DraftStatus::Approved,
            ..
        }))
    ));
    ensure!(harness.store.list().await?.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reject_is_terminal_and_creates_nothing(harness: Harness) -> eyre::Result<()> {
    let draft = harness.seed_draft("Not actionable").await?;

    let rejected = harness.service.reject_draft(draft.id()).await?;

    ensure!(rejected.status() == DraftStatus::Rejected);
    ensure!(harness.store.list().await?.is_empty());

    let approve_after = harness.service.approve_draft(draft.id(), None).await;
    ensure!(matches!(
        approve_after,
        Err(DraftReviewError::Domain(DraftDomainError::NotPending { .. }))
    ));
    ensure!(harness.store.list().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_persists_only_supplied_fields(harness: Harness) -> eyre::Result<()> {
    let draft = harness.seed_draft("Keep description").await?;

    let edited = harness
        .service
        .edit_draft(draft.id(), DraftEdit::new().with_title("New title"))
        .await?;

    ensure!(edited.fields().title() == "New title");
    let reloaded = harness.service.get_draft(draft.id()).await?;
    ensure!(reloaded.fields().title() == "New title");
    ensure!(reloaded.status() == DraftStatus::Pending);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_after_review_is_refused(harness: Harness) -> eyre::Result<()> {
    let draft = harness.seed_draft("Already reviewed").await?;
    harness.service.reject_draft(draft.id()).await?;

    let result = harness
        .service
        .edit_draft(draft.id(), DraftEdit::new().with_title("Too late"))
        .await;

    ensure!(matches!(
        result,
        Err(DraftReviewError::Domain(DraftDomainError::NotPending {
            status: DraftStatus::Rejected,
            ..
        }))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_draft_reports_not_found(harness: Harness) -> eyre::Result<()> {
    let id = DraftId::new(999)?;

    let result = harness.service.get_draft(id).await;

    ensure!(matches!(
        result,
        Err(DraftReviewError::NotFound(missing)) if missing == id
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_status_newest_first(harness: Harness) -> eyre::Result<()> {
    let first = harness.seed_draft("First").await?;
    let second = harness.seed_draft("Second").await?;
    let third = harness.seed_draft("Third").await?;
    harness.service.reject_draft(second.id()).await?;

    let pending = harness
        .service
        .list_drafts(Some(DraftStatus::Pending))
        .await?;
    let everything = harness.service.list_drafts(None).await?;

    let pending_ids: Vec<_> = pending.iter().map(DraftTask::id).collect();
    ensure!(pending_ids == [third.id(), first.id()]);
    ensure!(everything.len() == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_the_draft(harness: Harness) -> eyre::Result<()> {
    let draft = harness.seed_draft("Ephemeral").await?;

    harness.service.delete_draft(draft.id()).await?;

    let result = harness.service.get_draft(draft.id()).await;
    ensure!(matches!(result, Err(DraftReviewError::NotFound(_))));
    Ok(())
}

mockall::mock! {
    Store {}

    #[async_trait::async_trait]
    impl TaskStore for Store {
        async fn create(&self, task: &NewTask) -> TaskStoreResult<Task>;
        async fn list(&self) -> TaskStoreResult<Vec<Task>>;
        async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;
        async fn complete(&self, id: TaskId) -> TaskStoreResult<Task>;
        async fn sync(&self, tasks: &[Task]) -> TaskStoreResult<()>;
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_failure_surfaces_as_a_store_error() -> eyre::Result<()> {
    let clock = Arc::new(DefaultClock);
    let repository = Arc::new(InMemoryDraftRepository::new());
    let mut store = MockStore::new();
    store
        .expect_create()
        .returning(|_| Err(TaskStoreError::upstream(std::io::Error::other("store down"))));
    let service = DraftReviewService::new(Arc::clone(&repository), Arc::new(store), clock);

    let draft = repository.create(&new_gmail_draft("Doomed")).await?;
    let result = service.approve_draft(draft.id(), None).await;

    ensure!(matches!(result, Err(DraftReviewError::Store(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_failure_leaves_the_draft_pending_for_retry() -> eyre::Result<()> {
    let clock = Arc::new(DefaultClock);
    let repository = Arc::new(InMemoryDraftRepository::new());
    let mut store = MockStore::new();
    store
        .expect_create()
        .returning(|_| Err(TaskStoreError::upstream(std::io::Error::other("store down"))));
    let service = DraftReviewService::new(Arc::clone(&repository), Arc::new(store), clock);

    let draft = repository.create(&new_gmail_draft("Retryable")).await?;
    let result = service.approve_draft(draft.id(), None).await;

    ensure!(matches!(result, Err(DraftReviewError::Store(_))));
    let stored = repository.find_by_id(draft.id()).await?;
    ensure!(stored.is_some_and(|d| d.status() == DraftStatus::Pending));
    Ok(())
}
