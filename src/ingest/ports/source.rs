//! Port for fetching new messages from an external channel.

use crate::draft::domain::Source;
use crate::ingest::domain::InboundMessage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for message source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Contract for pulling new messages out of one channel.
///
/// Implementations wrap the provider API (Gmail, Slack, Telegram) for a
/// single connected account.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Returns the channel this source reads from.
    fn source(&self) -> Source;

    /// Fetches messages received after `since`, newest last, bounded by
    /// `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::AuthExpired`] when the channel credentials
    /// are no longer valid, and [`SourceError::Fetch`] for transient
    /// provider or transport failures.
    async fn fetch_new(
        &self,
        since: Option<DateTime<Utc>>,
        limit: usize,
    ) -> SourceResult<Vec<InboundMessage>>;
}

/// Errors returned by message source implementations.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// Channel credentials expired; the integration must be reconnected.
    #[error("authentication expired for {0}")]
    AuthExpired(Source),

    /// Transient provider or transport failure.
    #[error("fetch failed: {0}")]
    Fetch(Arc<dyn std::error::Error + Send + Sync>),
}

impl SourceError {
    /// Wraps a transient fetch error.
    pub fn fetch(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Fetch(Arc::new(err))
    }
}
