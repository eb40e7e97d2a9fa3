//! TaskFlow API server.
//!
//! Wires the adapters and services, starts the scan scheduler, probes
//! the remote task store with backoff, and serves the HTTP API until
//! interrupted.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use tokio::net::TcpListener;
use tracing::{info, warn};

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

use taskflow::api::{AppState, AuthState, router};
use taskflow::auth::{TokenCodec, UserId};
use taskflow::config::TaskFlowConfig;
use taskflow::draft::adapters::memory::InMemoryDraftRepository;
use taskflow::draft::adapters::postgres::PostgresDraftRepository;
use taskflow::draft::ports::DraftRepository;
use taskflow::draft::services::DraftReviewService;
use taskflow::ingest::adapters::http::{ClassifierConfig, HttpTaskClassifier};
use taskflow::ingest::adapters::memory::{InMemoryIntegrationStateRepository, QueueMessageSource};
use taskflow::ingest::services::{ScanScheduler, Scanner};
use taskflow::task::adapters::remote::{RemoteStoreConfig, RemoteTaskStore};
use taskflow::task::ports::TaskStore;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Attempts before the startup probe gives up.
const PROBE_ATTEMPTS: u32 = 5;

/// Initial delay between probe attempts; doubles each retry.
const PROBE_INITIAL_DELAY: Duration = Duration::from_millis(500);

/// User the single-tenant server schedules scans for.
const DEFAULT_USER: UserId = UserId::new(1);

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned()))
        .init();

    let config = TaskFlowConfig::from_env()?;
    let store = RemoteTaskStore::new(
        reqwest::Client::new(),
        RemoteStoreConfig {
            base_url: config.store_base_url.clone(),
            token: config.store_token.clone(),
        },
    );
    probe_store(&store).await?;

    match std::env::var("TASKFLOW_DATABASE_URL")
        .ok()
        .filter(|url| !url.is_empty())
    {
        Some(url) => {
            let manager = ConnectionManager::<PgConnection>::new(url);
            let pool = Pool::builder().build(manager)?;
            run(Arc::new(PostgresDraftRepository::new(pool)), store, config).await
        }
        None => {
            warn!("TASKFLOW_DATABASE_URL not set, drafts are held in memory");
            run(Arc::new(InMemoryDraftRepository::new()), store, config).await
        }
    }
}

/// Probes the remote store, retrying with doubling delays.
async fn probe_store(store: &RemoteTaskStore) -> Result<(), BoxError> {
    let mut delay = PROBE_INITIAL_DELAY;
    let mut last_error: Option<BoxError> = None;
    for attempt in 1..=PROBE_ATTEMPTS {
        match store.list().await {
            Ok(tasks) => {
                info!(tasks = tasks.len(), "remote task store reachable");
                return Ok(());
            }
            Err(err) => {
                warn!(attempt, error = %err, "remote task store probe failed");
                last_error = Some(Box::new(err));
            }
        }
        if attempt < PROBE_ATTEMPTS {
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
    Err(last_error.unwrap_or_else(|| "remote task store unreachable".into()))
}

/// Builds the services over the chosen draft repository and serves the
/// API until interrupted.
async fn run<R>(drafts: Arc<R>, store: RemoteTaskStore, config: TaskFlowConfig) -> Result<(), BoxError>
where
    R: DraftRepository + 'static,
{
    let clock = Arc::new(DefaultClock);
    let store = Arc::new(store);
    let states = Arc::new(InMemoryIntegrationStateRepository::new());
    let scheduler = Arc::new(ScanScheduler::new());
    let classifier = Arc::new(HttpTaskClassifier::new(
        reqwest::Client::new(),
        ClassifierConfig {
            endpoint: config.classifier_endpoint.clone(),
            token: config.classifier_token.clone(),
        },
    ));

    if config.default_scan_settings.enabled() {
        for source in taskflow::draft::domain::Source::ALL {
            let scanner = Scanner::new(
                DEFAULT_USER,
                Arc::new(QueueMessageSource::new(source)),
                Arc::clone(&classifier),
                Arc::clone(&drafts),
                Arc::clone(&states),
                Arc::clone(&clock),
                config.batch_limit,
            );
            scheduler.schedule(
                DEFAULT_USER,
                source,
                Arc::new(scanner),
                config.default_scan_settings.frequency(),
            );
        }
        info!(
            frequency_minutes = config.default_scan_settings.frequency_minutes(),
            "scan scheduler started"
        );
    }

    let state = AppState {
        review: DraftReviewService::new(drafts, store, Arc::clone(&clock)),
        states,
        scheduler: Arc::clone(&scheduler),
        connect_urls: config.connect_urls.clone(),
    };
    let auth_state = AuthState {
        codec: TokenCodec::new(config.token_secret.clone()),
        clock,
    };
    let app = router(state, auth_state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(scheduler))
        .await?;
    Ok(())
}

/// Resolves on Ctrl-C and stops the scheduled scans first.
async fn shutdown_signal(scheduler: Arc<ScanScheduler>) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutting down");
    scheduler.shutdown();
}
