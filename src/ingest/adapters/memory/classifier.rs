//! Scripted classifier for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::ingest::{
    domain::{InboundMessage, TaskProposal},
    ports::{ClassifierError, ClassifierResult, TaskClassifier},
};

/// Outcome scripted for one message.
#[derive(Debug, Clone)]
enum ScriptedOutcome {
    Proposal(TaskProposal),
    Failure(ClassifierError),
}

/// Classifier that replays pre-scripted outcomes keyed by external
/// message id. Unscripted messages classify as non-actionable.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClassifier {
    outcomes: Arc<Mutex<HashMap<String, ScriptedOutcome>>>,
}

impl ScriptedClassifier {
    /// Creates a classifier with no scripted outcomes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a positive classification for the given message id.
    pub fn propose(&self, external_id: impl Into<String>, proposal: TaskProposal) {
        let mut outcomes = self.outcomes.lock().unwrap_or_else(PoisonError::into_inner);
        outcomes.insert(external_id.into(), ScriptedOutcome::Proposal(proposal));
    }

    /// Scripts a classifier failure for the given message id.
    pub fn fail(&self, external_id: impl Into<String>, error: ClassifierError) {
        let mut outcomes = self.outcomes.lock().unwrap_or_else(PoisonError::into_inner);
        outcomes.insert(external_id.into(), ScriptedOutcome::Failure(error));
    }
}

#[async_trait]
impl TaskClassifier for ScriptedClassifier {
    async fn classify(&self, message: &InboundMessage) -> ClassifierResult<Option<TaskProposal>> {
        let outcomes = self.outcomes.lock().unwrap_or_else(PoisonError::into_inner);
        match outcomes.get(message.external_id()) {
            Some(ScriptedOutcome::Proposal(proposal)) => Ok(Some(proposal.clone())),
            Some(ScriptedOutcome::Failure(error)) => Err(error.clone()),
            None => Ok(None),
        }
    }
}
