//! Unit tests for the scan scheduler under tokio's paused clock.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::sleep;

use crate::auth::UserId;
use crate::draft::domain::Source;
use crate::ingest::services::{ScanJob, ScanReport, ScanResult, ScanScheduler};

const USER: UserId = UserId::new(1);
const PERIOD: Duration = Duration::from_secs(60);

#[derive(Default)]
struct CountingJob {
    runs: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    run_duration: Duration,
}

impl CountingJob {
    fn with_run_duration(run_duration: Duration) -> Self {
        Self {
            run_duration,
            ..Self::default()
        }
    }

    fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScanJob for CountingJob {
    async fn run_once(&self) -> ScanResult<ScanReport> {
        let concurrent = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(concurrent, Ordering::SeqCst);
        if !self.run_duration.is_zero() {
            sleep(self.run_duration).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(ScanReport::default())
    }
}

fn scan_job(job: &Arc<CountingJob>) -> Arc<dyn ScanJob> {
    Arc::clone(job) as Arc<dyn ScanJob>
}

#[tokio::test(start_paused = true)]
async fn scheduled_job_runs_once_per_period() {
    let scheduler = ScanScheduler::new();
    let job = Arc::new(CountingJob::default());
    scheduler.schedule(USER, Source::Gmail, scan_job(&job), PERIOD);

    sleep(PERIOD + Duration::from_millis(1)).await;
    assert_eq!(job.runs(), 1);

    sleep(PERIOD * 2).await;
    assert_eq!(job.runs(), 3);
}

#[tokio::test(start_paused = true)]
async fn scan_now_forces_an_immediate_run() {
    let scheduler = ScanScheduler::new();
    let job = Arc::new(CountingJob::default());
    scheduler.schedule(USER, Source::Slack, scan_job(&job), Duration::from_secs(3600));

    assert!(scheduler.scan_now(USER, Source::Slack));
    sleep(Duration::from_millis(1)).await;

    assert_eq!(job.runs(), 1);
}

#[tokio::test(start_paused = true)]
async fn scan_now_without_a_job_reports_false() {
    let scheduler = ScanScheduler::new();

    assert!(!scheduler.scan_now(USER, Source::Telegram));
}

#[tokio::test(start_paused = true)]
async fn cancelled_job_stops_ticking() {
    let scheduler = ScanScheduler::new();
    let job = Arc::new(CountingJob::default());
    scheduler.schedule(USER, Source::Gmail, scan_job(&job), PERIOD);
    sleep(PERIOD + Duration::from_millis(1)).await;
    assert_eq!(job.runs(), 1);

    assert!(scheduler.cancel(USER, Source::Gmail));
    assert!(!scheduler.is_scheduled(USER, Source::Gmail));
    sleep(PERIOD * 10).await;

    assert_eq!(job.runs(), 1);
}

#[tokio::test(start_paused = true)]
async fn rescheduling_replaces_the_previous_job() {
    let scheduler = ScanScheduler::new();
    let slow = Arc::new(CountingJob::default());
    let fast = Arc::new(CountingJob::default());
    scheduler.schedule(USER, Source::Gmail, scan_job(&slow), Duration::from_secs(3600));

    scheduler.schedule(USER, Source::Gmail, scan_job(&fast), PERIOD);
    sleep(PERIOD + Duration::from_millis(1)).await;

    assert_eq!(slow.runs(), 0);
    assert_eq!(fast.runs(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_runs_never_overlap_for_one_pair() {
    let scheduler = ScanScheduler::new();
    // Each run takes longer than the period.
    let job = Arc::new(CountingJob::with_run_duration(Duration::from_secs(90)));
    scheduler.schedule(USER, Source::Gmail, scan_job(&job), PERIOD);

    sleep(Duration::from_secs(400)).await;

    assert!(job.runs() >= 2);
    assert_eq!(job.max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn updated_frequency_applies_from_the_next_tick() {
    let scheduler = ScanScheduler::new();
    let job = Arc::new(CountingJob::default());
    assert!(!scheduler.update_frequency(USER, Source::Gmail, PERIOD));

    scheduler.schedule(USER, Source::Gmail, scan_job(&job), PERIOD);
    sleep(PERIOD + Duration::from_millis(1)).await;
    assert_eq!(job.runs(), 1);

    assert!(scheduler.update_frequency(USER, Source::Gmail, PERIOD * 10));
    // The old cadence would have run five more times by now.
    sleep(PERIOD * 5).await;
    assert_eq!(job.runs(), 1);

    sleep(PERIOD * 6).await;
    assert_eq!(job.runs(), 2);
}

#[tokio::test(start_paused = true)]
async fn jobs_are_independent_per_source() {
    let scheduler = ScanScheduler::new();
    let gmail = Arc::new(CountingJob::default());
    let slack = Arc::new(CountingJob::default());
    scheduler.schedule(USER, Source::Gmail, scan_job(&gmail), PERIOD);
    scheduler.schedule(USER, Source::Slack, scan_job(&slack), PERIOD * 2);

    sleep(PERIOD * 2 + Duration::from_millis(1)).await;

    assert_eq!(gmail.runs(), 2);
    assert_eq!(slack.runs(), 1);

    scheduler.shutdown();
    assert!(!scheduler.is_scheduled(USER, Source::Gmail));
    assert!(!scheduler.is_scheduled(USER, Source::Slack));
}
