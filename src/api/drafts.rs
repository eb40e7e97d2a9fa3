//! Draft review endpoints.
//!
//! Request bodies arrive as raw JSON and are converted into domain
//! values through the validating constructors, so invalid payloads are
//! rejected at the boundary with a 422 instead of reaching the service.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::AppState;
use super::error::ApiError;
use crate::draft::domain::{DraftEdit, DraftId, DraftStatus, DraftTask};
use crate::draft::ports::DraftRepository;
use crate::draft::services::BulkReport;
use crate::task::domain::{Energy, EstimatedMinutes, Task, Workspace};
use crate::task::ports::TaskStore;

/// Partial draft fields accepted by edit and approve requests.
#[derive(Debug, Default, Deserialize)]
pub struct DraftEditBody {
    title: Option<String>,
    description: Option<String>,
    workspace: Option<String>,
    energy: Option<String>,
    estimated_minutes: Option<u32>,
    tags: Option<Vec<String>>,
    due_date: Option<DateTime<Utc>>,
}

impl DraftEditBody {
    fn into_edit(self) -> Result<DraftEdit, ApiError> {
        let mut edit = DraftEdit::new();
        if let Some(title) = self.title {
            edit = edit.with_title(title);
        }
        if let Some(description) = self.description {
            edit = edit.with_description(description);
        }
        if let Some(workspace) = self.workspace {
            let workspace = Workspace::try_from(workspace.as_str())
                .map_err(|err| ApiError::Validation(err.to_string()))?;
            edit = edit.with_workspace(workspace);
        }
        if let Some(energy) = self.energy {
            let energy = Energy::try_from(energy.as_str())
                .map_err(|err| ApiError::Validation(err.to_string()))?;
            edit = edit.with_energy(energy);
        }
        if let Some(minutes) = self.estimated_minutes {
            let estimate = EstimatedMinutes::new(minutes)
                .map_err(|err| ApiError::Validation(err.to_string()))?;
            edit = edit.with_estimated_minutes(estimate);
        }
        if let Some(tags) = self.tags {
            edit = edit.with_tags(tags);
        }
        if let Some(due_date) = self.due_date {
            edit = edit.with_due_date(due_date);
        }
        Ok(edit)
    }
}

/// Query parameters for the draft list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    status: Option<String>,
}

/// Body shape for bulk operations.
#[derive(Debug, Deserialize)]
pub struct BulkBody {
    #[serde(rename = "draftIds")]
    draft_ids: Vec<i64>,
}

/// Response for a successful approval.
#[derive(Debug, Serialize)]
pub struct ApprovedResponse {
    draft: DraftTask,
    task: Task,
}

/// Per-id outcome summary for bulk operations.
#[derive(Debug, Serialize)]
pub struct BulkResponse {
    succeeded: Vec<DraftId>,
    failed: Vec<DraftId>,
}

impl From<BulkReport> for BulkResponse {
    fn from(report: BulkReport) -> Self {
        Self {
            succeeded: report.succeeded(),
            failed: report.failed(),
        }
    }
}

fn parse_id(raw: i64) -> Result<DraftId, ApiError> {
    DraftId::new(raw).map_err(|err| ApiError::Validation(err.to_string()))
}

fn parse_ids(raw: Vec<i64>) -> Result<Vec<DraftId>, ApiError> {
    raw.into_iter().map(parse_id).collect()
}

fn parse_status(raw: Option<&str>) -> Result<Option<DraftStatus>, ApiError> {
    raw.map(|value| {
        DraftStatus::try_from(value).map_err(|err| ApiError::Validation(err.to_string()))
    })
    .transpose()
}

/// `GET /draft-tasks?status=` — lists drafts, newest first.
pub async fn list_drafts<R, S, C>(
    State(state): State<AppState<R, S, C>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<DraftTask>>, ApiError>
where
    R: DraftRepository + 'static,
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let status = parse_status(params.status.as_deref())?;
    Ok(Json(state.review.list_drafts(status).await?))
}

/// `GET /draft-tasks/{id}` — fetches one draft.
pub async fn get_draft<R, S, C>(
    State(state): State<AppState<R, S, C>>,
    Path(id): Path<i64>,
) -> Result<Json<DraftTask>, ApiError>
where
    R: DraftRepository + 'static,
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(state.review.get_draft(parse_id(id)?).await?))
}

/// `PUT /draft-tasks/{id}` — applies a partial edit.
pub async fn edit_draft<R, S, C>(
    State(state): State<AppState<R, S, C>>,
    Path(id): Path<i64>,
    Json(body): Json<DraftEditBody>,
) -> Result<Json<DraftTask>, ApiError>
where
    R: DraftRepository + 'static,
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let edit = body.into_edit()?;
    Ok(Json(state.review.edit_draft(parse_id(id)?, edit).await?))
}

/// `POST /draft-tasks/{id}/approve` — approves with optional overrides.
pub async fn approve_draft<R, S, C>(
    State(state): State<AppState<R, S, C>>,
    Path(id): Path<i64>,
    body: Option<Json<DraftEditBody>>,
) -> Result<Json<ApprovedResponse>, ApiError>
where
    R: DraftRepository + 'static,
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let edits = body.map(|Json(body)| body.into_edit()).transpose()?;
    let approved = state.review.approve_draft(parse_id(id)?, edits).await?;
    Ok(Json(ApprovedResponse {
        draft: approved.draft,
        task: approved.task,
    }))
}

/// `POST /draft-tasks/{id}/reject` — rejects a pending draft.
pub async fn reject_draft<R, S, C>(
    State(state): State<AppState<R, S, C>>,
    Path(id): Path<i64>,
) -> Result<Json<DraftTask>, ApiError>
where
    R: DraftRepository + 'static,
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(state.review.reject_draft(parse_id(id)?).await?))
}

/// `DELETE /draft-tasks/{id}` — deletes a draft outright.
pub async fn delete_draft<R, S, C>(
    State(state): State<AppState<R, S, C>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
    R: DraftRepository + 'static,
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    state.review.delete_draft(parse_id(id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /draft-tasks/bulk-approve` — best-effort approval of many ids.
pub async fn bulk_approve<R, S, C>(
    State(state): State<AppState<R, S, C>>,
    Json(body): Json<BulkBody>,
) -> Result<Json<BulkResponse>, ApiError>
where
    R: DraftRepository + 'static,
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let ids = parse_ids(body.draft_ids)?;
    Ok(Json(state.review.bulk_approve(ids).await.into()))
}

/// `POST /draft-tasks/bulk-reject` — best-effort rejection of many ids.
pub async fn bulk_reject<R, S, C>(
    State(state): State<AppState<R, S, C>>,
    Json(body): Json<BulkBody>,
) -> Result<Json<BulkResponse>, ApiError>
where
    R: DraftRepository + 'static,
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let ids = parse_ids(body.draft_ids)?;
    Ok(Json(state.review.bulk_reject(ids).await.into()))
}
