//! One scan: fetch, classify, draft.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::UserId;
use crate::draft::{
    domain::{NewDraft, Source},
    ports::{DraftRepository, DraftRepositoryError},
};
use crate::ingest::ports::{
    IntegrationStateError, IntegrationStateRepository, MessageSource, SourceError, TaskClassifier,
};

/// Errors aborting a scan run.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Fetching from the channel failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A proposal produced invalid draft fields.
    #[error(transparent)]
    Domain(#[from] crate::draft::domain::DraftDomainError),

    /// Storing a draft failed.
    #[error(transparent)]
    Repository(#[from] DraftRepositoryError),

    /// Reading or writing integration state failed.
    #[error(transparent)]
    State(#[from] IntegrationStateError),
}

/// Result type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Counts from one completed scan run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Messages fetched from the channel.
    pub fetched: usize,
    /// Pending drafts created from positive classifications.
    pub drafted: usize,
    /// Messages skipped: non-actionable or failed classification.
    pub skipped: usize,
}

/// A scan job the scheduler can run repeatedly.
#[async_trait]
pub trait ScanJob: Send + Sync {
    /// Runs one scan.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] when the run aborts; partial progress (drafts
    /// already created) is kept.
    async fn run_once(&self) -> ScanResult<ScanReport>;
}

/// Scans one channel for one user: fetches a bounded batch of new
/// messages, classifies each, and stores a pending draft per positive
/// classification.
pub struct Scanner<M, T, R, S, C>
where
    M: MessageSource,
    T: TaskClassifier,
    R: DraftRepository,
    S: IntegrationStateRepository,
    C: Clock + Send + Sync,
{
    user: UserId,
    source: Arc<M>,
    classifier: Arc<T>,
    drafts: Arc<R>,
    states: Arc<S>,
    clock: Arc<C>,
    batch_limit: usize,
}

impl<M, T, R, S, C> Scanner<M, T, R, S, C>
where
    M: MessageSource,
    T: TaskClassifier,
    R: DraftRepository,
    S: IntegrationStateRepository,
    C: Clock + Send + Sync,
{
    /// Creates a scanner for one `(user, source)` pair.
    #[must_use]
    pub const fn new(
        user: UserId,
        source: Arc<M>,
        classifier: Arc<T>,
        drafts: Arc<R>,
        states: Arc<S>,
        clock: Arc<C>,
        batch_limit: usize,
    ) -> Self {
        Self {
            user,
            source,
            classifier,
            drafts,
            states,
            clock,
            batch_limit,
        }
    }

    /// Returns the channel this scanner reads from.
    #[must_use]
    pub fn channel(&self) -> Source {
        self.source.source()
    }

    async fn fetch_batch(
        &self,
        since: Option<chrono::DateTime<chrono::Utc>>,
    ) -> ScanResult<Vec<crate::ingest::domain::InboundMessage>> {
        match self.source.fetch_new(since, self.batch_limit).await {
            Ok(messages) => Ok(messages),
            Err(SourceError::AuthExpired(source)) => {
                // Flip the connection flag so the status surface shows the
                // integration needs reconnecting; the scheduler retries on
                // the next tick.
                let mut state = self.states.get(self.user, source).await?;
                state.disconnect();
                self.states.put(self.user, source, state).await?;
                warn!(user = %self.user, %source, "channel credentials expired, integration disconnected");
                Err(SourceError::AuthExpired(source).into())
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl<M, T, R, S, C> ScanJob for Scanner<M, T, R, S, C>
where
    M: MessageSource,
    T: TaskClassifier,
    R: DraftRepository,
    S: IntegrationStateRepository,
    C: Clock + Send + Sync,
{
    async fn run_once(&self) -> ScanResult<ScanReport> {
        let source = self.source.source();
        let state = self.states.get(self.user, source).await?;
        if !state.settings().enabled() {
            // A disabled integration keeps its job ticking so re-enabling
            // takes effect without rescheduling; each tick is a no-op.
            debug!(user = %self.user, %source, "scanning disabled, run skipped");
            return Ok(ScanReport::default());
        }
        let messages = self.fetch_batch(state.last_scan_at()).await?;

        let mut report = ScanReport {
            fetched: messages.len(),
            ..ScanReport::default()
        };
        for message in &messages {
            match self.classifier.classify(message).await {
                Ok(Some(proposal)) => {
                    let fields = proposal.draft_fields()?;
                    let draft =
                        NewDraft::new(source, fields, proposal.confidence(), &*self.clock);
                    self.drafts.create(&draft).await?;
                    report.drafted += 1;
                }
                Ok(None) => {
                    debug!(user = %self.user, %source, message = message.external_id(), "message classified as non-actionable");
                    report.skipped += 1;
                }
                Err(err) => {
                    // One bad message never aborts the batch.
                    warn!(user = %self.user, %source, message = message.external_id(), error = %err, "classification failed, message skipped");
                    report.skipped += 1;
                }
            }
        }

        // Record the scan even when nothing was drafted so the next run
        // starts from this point.
        let mut updated = self.states.get(self.user, source).await?;
        updated.record_scan(self.clock.utc());
        self.states.put(self.user, source, updated).await?;

        debug!(
            user = %self.user,
            %source,
            fetched = report.fetched,
            drafted = report.drafted,
            skipped = report.skipped,
            "scan finished"
        );
        Ok(report)
    }
}
