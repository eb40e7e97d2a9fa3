//! API error taxonomy and response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::draft::services::DraftReviewError;
use crate::ingest::ports::IntegrationStateError;
use crate::task::ports::TaskStoreError;

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The addressed resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// An upstream dependency failed.
    #[error("{0}")]
    Upstream(String),

    /// The bearer token is missing or invalid.
    #[error("authentication required")]
    Auth,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Auth => StatusCode::UNAUTHORIZED,
        }
    }

    const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation",
            Self::Upstream(_) => "upstream",
            Self::Auth => "auth",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                message: self.to_string(),
            },
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<DraftReviewError> for ApiError {
    fn from(err: DraftReviewError) -> Self {
        match err {
            DraftReviewError::NotFound(id) => Self::NotFound(format!("draft not found: {id}")),
            DraftReviewError::Domain(domain) => Self::Validation(domain.to_string()),
            DraftReviewError::Repository(repo) => Self::Upstream(repo.to_string()),
            DraftReviewError::Store(store) => Self::Upstream(store.to_string()),
        }
    }
}

impl From<IntegrationStateError> for ApiError {
    fn from(err: IntegrationStateError) -> Self {
        Self::Upstream(err.to_string())
    }
}

impl From<TaskStoreError> for ApiError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::NotFound(id) => Self::NotFound(format!("task not found: {id}")),
            TaskStoreError::Upstream(upstream) => Self::Upstream(upstream.to_string()),
        }
    }
}
