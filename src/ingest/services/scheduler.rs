//! Explicit, cancellable scan scheduling.
//!
//! Each `(user, source)` pair gets one owned job task driven by an
//! interval tick, an on-demand trigger, and a shutdown channel. Runs for
//! one pair execute sequentially inside the job loop, so a slow scan can
//! never overlap the next one. Everything is deterministic under tokio's
//! paused test clock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, warn};

use crate::auth::UserId;
use crate::draft::domain::Source;
use crate::ingest::services::ScanJob;

struct JobHandle {
    trigger: mpsc::Sender<()>,
    period: watch::Sender<Duration>,
    _shutdown: watch::Sender<bool>,
    _task: JoinHandle<()>,
}

/// Owns the recurring scan jobs.
#[derive(Default)]
pub struct ScanScheduler {
    jobs: Mutex<HashMap<(UserId, Source), JobHandle>>,
}

impl ScanScheduler {
    /// Creates a scheduler with no jobs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a recurring scan for `(user, source)` at the given
    /// period, replacing any existing job for the pair.
    ///
    /// The first run happens one period after scheduling; [`Self::scan_now`]
    /// forces an earlier one.
    pub fn schedule(&self, user: UserId, source: Source, job: Arc<dyn ScanJob>, every: Duration) {
        let (trigger, mut trigger_rx) = mpsc::channel::<()>(1);
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let (period, mut period_rx) = watch::channel(every);

        let task = tokio::spawn(async move {
            let mut ticker = new_ticker(every).await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => run(user, source, &job).await,
                    received = trigger_rx.recv() => match received {
                        Some(()) => run(user, source, &job).await,
                        None => break,
                    },
                    changed = period_rx.changed() => match changed {
                        Ok(()) => {
                            let updated = *period_rx.borrow_and_update();
                            ticker = new_ticker(updated).await;
                            debug!(%user, %source, period_secs = updated.as_secs(), "scan period changed");
                        }
                        Err(_) => break,
                    },
                    _ = shutdown_rx.changed() => break,
                }
            }
            debug!(%user, %source, "scan job stopped");
        });

        let replaced = {
            let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
            jobs.insert(
                (user, source),
                JobHandle {
                    trigger,
                    period,
                    _shutdown: shutdown,
                    _task: task,
                },
            )
        };
        if replaced.is_some() {
            debug!(%user, %source, "replaced existing scan job");
        }
    }

    /// Forces a scan on the existing job for `(user, source)`.
    ///
    /// Returns `false` when no job is scheduled for the pair. A trigger
    /// already queued behind a running scan is collapsed into it.
    #[must_use]
    pub fn scan_now(&self, user: UserId, source: Source) -> bool {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        jobs.get(&(user, source))
            .is_some_and(|handle| match handle.trigger.try_send(()) {
                Ok(()) | Err(mpsc::error::TrySendError::Full(())) => true,
                Err(mpsc::error::TrySendError::Closed(())) => false,
            })
    }

    /// Changes the period of the job for `(user, source)`.
    ///
    /// The new cadence applies from the job's next select; the elapsed
    /// part of the old period is discarded. Returns `false` when no job
    /// is scheduled for the pair.
    #[must_use]
    pub fn update_frequency(&self, user: UserId, source: Source, every: Duration) -> bool {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        jobs.get(&(user, source))
            .is_some_and(|handle| handle.period.send(every).is_ok())
    }

    /// Cancels the job for `(user, source)`.
    ///
    /// Returns `false` when no job was scheduled for the pair.
    #[must_use]
    pub fn cancel(&self, user: UserId, source: Source) -> bool {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        // Dropping the handle closes both channels; the job loop exits on
        // its next select.
        jobs.remove(&(user, source)).is_some()
    }

    /// Returns whether a job is scheduled for `(user, source)`.
    #[must_use]
    pub fn is_scheduled(&self, user: UserId, source: Source) -> bool {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        jobs.contains_key(&(user, source))
    }

    /// Cancels every job.
    pub fn shutdown(&self) {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        jobs.clear();
    }
}

async fn new_ticker(every: Duration) -> tokio::time::Interval {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick fires immediately; consume it so the next
    // run waits a full period.
    ticker.tick().await;
    ticker
}

async fn run(user: UserId, source: Source, job: &Arc<dyn ScanJob>) {
    match job.run_once().await {
        Ok(report) => debug!(
            %user,
            %source,
            fetched = report.fetched,
            drafted = report.drafted,
            skipped = report.skipped,
            "scheduled scan completed"
        ),
        Err(err) => warn!(%user, %source, error = %err, "scheduled scan failed"),
    }
}
