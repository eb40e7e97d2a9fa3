//! Port for per-user, per-source integration state.

use crate::auth::UserId;
use crate::draft::domain::Source;
use crate::ingest::domain::IntegrationState;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for integration state operations.
pub type IntegrationStateResult<T> = Result<T, IntegrationStateError>;

/// Contract for storing integration state keyed by user and source.
#[async_trait]
pub trait IntegrationStateRepository: Send + Sync {
    /// Returns the state for `(user, source)`, or the disconnected
    /// default when none has been stored.
    async fn get(&self, user: UserId, source: Source) -> IntegrationStateResult<IntegrationState>;

    /// Stores the state for `(user, source)`, replacing any previous
    /// value.
    async fn put(
        &self,
        user: UserId,
        source: Source,
        state: IntegrationState,
    ) -> IntegrationStateResult<()>;
}

/// Errors returned by integration state implementations.
#[derive(Debug, Clone, Error)]
pub enum IntegrationStateError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IntegrationStateError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
