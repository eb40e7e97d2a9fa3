//! Shared world state for draft review BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskflow::draft::{
    adapters::memory::InMemoryDraftRepository,
    domain::{DraftId, DraftTask},
    services::{ApprovedDraft, BulkReport, DraftReviewError, DraftReviewService},
};
use taskflow::task::adapters::memory::InMemoryTaskStore;

/// Service type used by the BDD world.
pub type TestReviewService =
    DraftReviewService<InMemoryDraftRepository, InMemoryTaskStore<DefaultClock>, DefaultClock>;

/// Scenario world for draft review behaviour tests.
pub struct DraftReviewWorld {
    pub service: TestReviewService,
    pub repository: Arc<InMemoryDraftRepository>,
    pub store: Arc<InMemoryTaskStore<DefaultClock>>,
    pub seeded_ids: Vec<DraftId>,
    pub last_approval: Option<Result<ApprovedDraft, DraftReviewError>>,
    pub last_draft: Option<DraftTask>,
    pub bulk_report: Option<BulkReport>,
}

impl DraftReviewWorld {
    /// Creates a world with empty pending scenario state.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let repository = Arc::new(InMemoryDraftRepository::new());
        let store = Arc::new(InMemoryTaskStore::new(Arc::clone(&clock)));
        let service =
            DraftReviewService::new(Arc::clone(&repository), Arc::clone(&store), clock);

        Self {
            service,
            repository,
            store,
            seeded_ids: Vec::new(),
            last_approval: None,
            last_draft: None,
            bulk_report: None,
        }
    }

    /// Returns the most recently seeded draft id.
    pub fn current_id(&self) -> Result<DraftId, eyre::Report> {
        self.seeded_ids
            .last()
            .copied()
            .ok_or_else(|| eyre::eyre!("no draft seeded in scenario world"))
    }
}

impl Default for DraftReviewWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DraftReviewWorld {
    DraftReviewWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
