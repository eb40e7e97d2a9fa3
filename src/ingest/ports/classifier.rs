//! Port for the AI task classifier.

use crate::ingest::domain::{InboundMessage, TaskProposal};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for classifier operations.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Contract for deciding whether a message contains an actionable task.
///
/// `None` means the classifier judged the message non-actionable; a
/// proposal carries the suggested task fields. How the judgement is made
/// (which model, which prompt) is an implementation concern.
#[async_trait]
pub trait TaskClassifier: Send + Sync {
    /// Classifies one inbound message.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::Upstream`] when the classifier call
    /// fails or its reply cannot be interpreted.
    async fn classify(&self, message: &InboundMessage) -> ClassifierResult<Option<TaskProposal>>;
}

/// Errors returned by classifier implementations.
#[derive(Debug, Clone, Error)]
pub enum ClassifierError {
    /// The classifier call failed or returned an uninterpretable reply.
    #[error("classifier failure: {0}")]
    Upstream(Arc<dyn std::error::Error + Send + Sync>),
}

impl ClassifierError {
    /// Wraps an upstream classifier error.
    pub fn upstream(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Upstream(Arc::new(err))
    }
}
