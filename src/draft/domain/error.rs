//! Error types for draft domain validation and parsing.

use super::{DraftId, DraftStatus};
use crate::task::domain::TaskDomainError;
use thiserror::Error;

/// Errors returned while constructing or mutating domain draft values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DraftDomainError {
    /// The draft identifier is not a positive integer.
    #[error("invalid draft identifier {0}, expected a positive integer")]
    InvalidDraftId(i64),

    /// The draft title is empty after trimming.
    #[error("draft title must not be empty")]
    EmptyTitle,

    /// The classifier confidence is outside `[0, 1]`.
    #[error("confidence {0} is outside the closed interval [0, 1]")]
    InvalidConfidence(f32),

    /// The draft is no longer pending, so mutation is refused.
    #[error("draft {id} is {status} and can no longer be modified", status = .status.as_str())]
    NotPending {
        /// Identifier of the non-pending draft.
        id: DraftId,
        /// Status that blocks the mutation.
        status: DraftStatus,
    },

    /// The requested status transition is not allowed.
    #[error(
        "invalid draft status transition for {id}: {from} -> {to}",
        from = .from.as_str(),
        to = .to.as_str()
    )]
    InvalidStatusTransition {
        /// Identifier of the draft.
        id: DraftId,
        /// Status before the attempted transition.
        from: DraftStatus,
        /// Requested target status.
        to: DraftStatus,
    },

    /// A shared task-field scalar failed validation.
    #[error(transparent)]
    Field(#[from] TaskDomainError),
}

/// Error returned while parsing draft statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown draft status: {0}")]
pub struct ParseDraftStatusError(pub String);

/// Error returned while parsing source channels from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown source channel: {0}")]
pub struct ParseSourceError(pub String);
