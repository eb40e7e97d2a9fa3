//! Unit tests for the scanner service.

use super::email;
use crate::auth::UserId;
use crate::draft::adapters::memory::InMemoryDraftRepository;
use crate::draft::domain::{DraftStatus, Source};
use crate::draft::ports::DraftRepository;
use crate::ingest::adapters::memory::{
    InMemoryIntegrationStateRepository, QueueMessageSource, ScriptedClassifier,
};
use crate::ingest::domain::{IntegrationState, ScanSettings, TaskProposal};
use crate::ingest::ports::{ClassifierError, IntegrationStateRepository, SourceError};
use crate::ingest::services::{ScanError, ScanJob, Scanner};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

const USER: UserId = UserId::new(1);
const BATCH_LIMIT: usize = 10;

struct Harness {
    source: Arc<QueueMessageSource>,
    classifier: Arc<ScriptedClassifier>,
    drafts: Arc<InMemoryDraftRepository>,
    states: Arc<InMemoryIntegrationStateRepository>,
    scanner: Scanner<
        QueueMessageSource,
        ScriptedClassifier,
        InMemoryDraftRepository,
        InMemoryIntegrationStateRepository,
        DefaultClock,
    >,
}

#[fixture]
fn harness() -> Harness {
    let source = Arc::new(QueueMessageSource::new(Source::Gmail));
    let classifier = Arc::new(ScriptedClassifier::new());
    let drafts = Arc::new(InMemoryDraftRepository::new());
    let states = Arc::new(InMemoryIntegrationStateRepository::new());
    let scanner = Scanner::new(
        USER,
        Arc::clone(&source),
        Arc::clone(&classifier),
        Arc::clone(&drafts),
        Arc::clone(&states),
        Arc::new(DefaultClock),
        BATCH_LIMIT,
    );
    Harness {
        source,
        classifier,
        drafts,
        states,
        scanner,
    }
}

fn proposal(title: &str) -> TaskProposal {
    TaskProposal::new(title).expect("test titles are non-empty")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn two_positive_classifications_out_of_three_emails_create_two_drafts(
    harness: Harness,
) -> eyre::Result<()> {
    harness.source.push(email("m1", "Invoice", "Pay by Friday"));
    harness.source.push(email("m2", "Newsletter", "This week in Rust"));
    harness.source.push(email("m3", "Dentist", "Confirm your appointment"));
    harness.classifier.propose("m1", proposal("Pay invoice"));
    harness.classifier.propose("m3", proposal("Confirm dentist appointment"));

    let report = harness.scanner.run_once().await?;

    ensure!(report.fetched == 3);
    ensure!(report.drafted == 2);
    ensure!(report.skipped == 1);
    let pending = harness
        .drafts
        .list_by_status(Some(DraftStatus::Pending))
        .await?;
    ensure!(pending.len() == 2);
    ensure!(pending.iter().all(|draft| draft.source() == Source::Gmail));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn one_failed_classification_skips_only_that_message(harness: Harness) -> eyre::Result<()> {
    harness.source.push(email("m1", "Broken", "This one fails"));
    harness.source.push(email("m2", "Rent", "Transfer the rent"));
    harness.classifier.fail(
        "m1",
        ClassifierError::upstream(std::io::Error::other("model timeout")),
    );
    harness.classifier.propose("m2", proposal("Transfer rent"));

    let report = harness.scanner.run_once().await?;

    ensure!(report.fetched == 2);
    ensure!(report.drafted == 1);
    ensure!(report.skipped == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_credentials_disconnect_the_integration(harness: Harness) -> eyre::Result<()> {
    harness
        .states
        .put(USER, Source::Gmail, IntegrationState::connected("me@example.com"))
        .await?;
    harness
        .source
        .fail_next(SourceError::AuthExpired(Source::Gmail));

    let result = harness.scanner.run_once().await;

    ensure!(matches!(
        result,
        Err(ScanError::Source(SourceError::AuthExpired(Source::Gmail)))
    ));
    let state = harness.states.get(USER, Source::Gmail).await?;
    ensure!(!state.is_connected());
    ensure!(state.account_label() == Some("me@example.com"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_scan_still_records_the_scan_time(harness: Harness) -> eyre::Result<()> {
    let report = harness.scanner.run_once().await?;

    ensure!(report.fetched == 0);
    ensure!(report.drafted == 0);
    let state = harness.states.get(USER, Source::Gmail).await?;
    ensure!(state.last_scan_at().is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_fetch_records_no_scan_time(harness: Harness) -> eyre::Result<()> {
    harness
        .source
        .fail_next(SourceError::fetch(std::io::Error::other("network down")));

    let result = harness.scanner.run_once().await;

    ensure!(matches!(result, Err(ScanError::Source(SourceError::Fetch(_)))));
    let state = harness.states.get(USER, Source::Gmail).await?;
    ensure!(state.last_scan_at().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn disabled_settings_skip_the_run_entirely(harness: Harness) -> eyre::Result<()> {
    let mut state = IntegrationState::connected("me@example.com");
    state.update_settings(ScanSettings::new(15, false)?);
    harness.states.put(USER, Source::Gmail, state).await?;
    harness.source.push(email("m1", "Invoice", "Pay by Friday"));
    harness.classifier.propose("m1", proposal("Pay invoice"));

    let report = harness.scanner.run_once().await?;

    ensure!(report.fetched == 0);
    ensure!(report.drafted == 0);
    let drafts = harness.drafts.list_by_status(None).await?;
    ensure!(drafts.is_empty());
    let stored = harness.states.get(USER, Source::Gmail).await?;
    ensure!(stored.last_scan_at().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fetch_is_bounded_by_the_batch_limit(harness: Harness) -> eyre::Result<()> {
    let bounded = Scanner::new(
        USER,
        Arc::clone(&harness.source),
        Arc::clone(&harness.classifier),
        Arc::clone(&harness.drafts),
        Arc::clone(&harness.states),
        Arc::new(DefaultClock),
        2,
    );
    for n in 0..5 {
        harness
            .source
            .push(email(&format!("m{n}"), "Subject", "Body"));
    }

    let report = bounded.run_once().await?;

    ensure!(report.fetched == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drafted_fields_carry_the_proposal_confidence(harness: Harness) -> eyre::Result<()> {
    let confident =
        proposal("Pay invoice").with_confidence(crate::draft::domain::Confidence::new(0.9)?);
    harness.source.push(email("m1", "Invoice", "Pay by Friday"));
    harness.classifier.propose("m1", confident);

    harness.scanner.run_once().await?;

    let drafts = harness.drafts.list_by_status(None).await?;
    let Some(draft) = drafts.first() else {
        eyre::bail!("expected one draft");
    };
    ensure!(draft.confidence().is_some_and(|c| c.value() > 0.8));
    Ok(())
}
