//! HTTP surface for TaskFlow.
//!
//! All routes speak JSON and require a valid bearer token. Handlers
//! translate between wire payloads and domain values at the boundary;
//! the services behind them never see raw JSON.

pub mod auth;
pub mod drafts;
pub mod error;
pub mod integrations;

pub use auth::AuthState;
pub use error::ApiError;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use mockable::Clock;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ConnectUrls;
use crate::draft::ports::DraftRepository;
use crate::draft::services::DraftReviewService;
use crate::ingest::ports::IntegrationStateRepository;
use crate::ingest::services::ScanScheduler;
use crate::task::ports::TaskStore;

/// Shared state handed to every handler.
pub struct AppState<R, S, C>
where
    R: DraftRepository,
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Draft review orchestration.
    pub review: DraftReviewService<R, S, C>,
    /// Integration state per user and source.
    pub states: Arc<dyn IntegrationStateRepository>,
    /// Recurring scan jobs.
    pub scheduler: Arc<ScanScheduler>,
    /// OAuth connect URLs per source.
    pub connect_urls: ConnectUrls,
}

impl<R, S, C> Clone for AppState<R, S, C>
where
    R: DraftRepository,
    S: TaskStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            review: self.review.clone(),
            states: Arc::clone(&self.states),
            scheduler: Arc::clone(&self.scheduler),
            connect_urls: self.connect_urls.clone(),
        }
    }
}

/// Builds the API router over the given state.
pub fn router<R, S, C>(state: AppState<R, S, C>, auth_state: AuthState<C>) -> Router
where
    R: DraftRepository + 'static,
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/draft-tasks", get(drafts::list_drafts))
        .route("/draft-tasks/bulk-approve", post(drafts::bulk_approve))
        .route("/draft-tasks/bulk-reject", post(drafts::bulk_reject))
        .route(
            "/draft-tasks/{id}",
            get(drafts::get_draft)
                .put(drafts::edit_draft)
                .delete(drafts::delete_draft),
        )
        .route("/draft-tasks/{id}/approve", post(drafts::approve_draft))
        .route("/draft-tasks/{id}/reject", post(drafts::reject_draft))
        .route("/integrations/{source}/status", get(integrations::status))
        .route("/integrations/{source}/connect", post(integrations::connect))
        .route(
            "/integrations/{source}/disconnect",
            post(integrations::disconnect),
        )
        .route(
            "/integrations/{source}/scan-now",
            post(integrations::scan_now),
        )
        .route(
            "/integrations/{source}/settings",
            get(integrations::get_settings).put(integrations::put_settings),
        )
        .layer(from_fn_with_state(auth_state, auth::require_bearer::<C>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
