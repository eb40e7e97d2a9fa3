//! Integration status, connection, and settings endpoints.

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::AppState;
use super::error::ApiError;
use crate::auth::UserId;
use crate::draft::domain::Source;
use crate::draft::ports::DraftRepository;
use crate::ingest::domain::{IntegrationStatus, ScanSettings};
use crate::task::ports::TaskStore;

/// Response for the connect endpoint.
#[derive(Debug, Serialize)]
pub struct ConnectResponse {
    url: String,
}

/// Body shape for settings updates.
#[derive(Debug, Deserialize)]
pub struct SettingsBody {
    frequency_minutes: u32,
    enabled: bool,
}

fn parse_source(raw: &str) -> Result<Source, ApiError> {
    Source::try_from(raw).map_err(|err| ApiError::Validation(err.to_string()))
}

/// `GET /integrations/{source}/status` — source-tagged status payload.
pub async fn status<R, S, C>(
    State(state): State<AppState<R, S, C>>,
    Extension(user): Extension<UserId>,
    Path(source): Path<String>,
) -> Result<Json<IntegrationStatus>, ApiError>
where
    R: DraftRepository + 'static,
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let source = parse_source(&source)?;
    let integration = state.states.get(user, source).await?;
    Ok(Json(integration.status(source)))
}

/// `POST /integrations/{source}/connect` — returns the OAuth URL to
/// visit. The integration flips to connected once the provider calls
/// back, which is outside this surface.
pub async fn connect<R, S, C>(
    State(state): State<AppState<R, S, C>>,
    Path(source): Path<String>,
) -> Result<Json<ConnectResponse>, ApiError>
where
    R: DraftRepository + 'static,
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let source = parse_source(&source)?;
    Ok(Json(ConnectResponse {
        url: state.connect_urls.for_source(source).to_owned(),
    }))
}

/// `POST /integrations/{source}/disconnect` — disconnects the
/// integration and cancels its scheduled scans.
pub async fn disconnect<R, S, C>(
    State(state): State<AppState<R, S, C>>,
    Extension(user): Extension<UserId>,
    Path(source): Path<String>,
) -> Result<StatusCode, ApiError>
where
    R: DraftRepository + 'static,
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let source = parse_source(&source)?;
    let mut integration = state.states.get(user, source).await?;
    integration.disconnect();
    state.states.put(user, source, integration).await?;
    if state.scheduler.cancel(user, source) {
        tracing::debug!(%user, %source, "cancelled scheduled scans on disconnect");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /integrations/{source}/scan-now` — forces a scan on the
/// scheduled job.
pub async fn scan_now<R, S, C>(
    State(state): State<AppState<R, S, C>>,
    Extension(user): Extension<UserId>,
    Path(source): Path<String>,
) -> Result<StatusCode, ApiError>
where
    R: DraftRepository + 'static,
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let source = parse_source(&source)?;
    if state.scheduler.scan_now(user, source) {
        Ok(StatusCode::ACCEPTED)
    } else {
        Err(ApiError::NotFound(format!(
            "no scan scheduled for {source}"
        )))
    }
}

/// `GET /integrations/{source}/settings` — current scan settings.
pub async fn get_settings<R, S, C>(
    State(state): State<AppState<R, S, C>>,
    Extension(user): Extension<UserId>,
    Path(source): Path<String>,
) -> Result<Json<ScanSettings>, ApiError>
where
    R: DraftRepository + 'static,
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let source = parse_source(&source)?;
    let integration = state.states.get(user, source).await?;
    Ok(Json(integration.settings()))
}

/// `PUT /integrations/{source}/settings` — replaces the scan settings.
///
/// A frequency change is pushed to the running job and applies from its
/// next tick. Disabling keeps the job ticking but every run is skipped
/// until re-enabled.
pub async fn put_settings<R, S, C>(
    State(state): State<AppState<R, S, C>>,
    Extension(user): Extension<UserId>,
    Path(source): Path<String>,
    Json(body): Json<SettingsBody>,
) -> Result<Json<ScanSettings>, ApiError>
where
    R: DraftRepository + 'static,
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let source = parse_source(&source)?;
    let settings = ScanSettings::new(body.frequency_minutes, body.enabled)
        .map_err(|err| ApiError::Validation(err.to_string()))?;
    let mut integration = state.states.get(user, source).await?;
    integration.update_settings(settings);
    state.states.put(user, source, integration).await?;
    if settings.enabled() && state.scheduler.update_frequency(user, source, settings.frequency()) {
        tracing::debug!(%user, %source, "scan frequency pushed to the running job");
    }
    Ok(Json(settings))
}
