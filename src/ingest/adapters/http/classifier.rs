//! Classifier adapter calling an LLM endpoint over HTTP.
//!
//! The endpoint receives the message text and context as JSON and
//! replies with a structured verdict: whether the message contains an
//! actionable task and, if so, the proposed fields. Replies are
//! validated through the domain constructors so a misbehaving model
//! cannot smuggle invalid fields into a draft.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::draft::domain::Confidence;
use crate::ingest::{
    domain::{InboundMessage, MessageContext, TaskProposal},
    ports::{ClassifierError, ClassifierResult, TaskClassifier},
};
use crate::task::domain::{Energy, EstimatedMinutes, Workspace};

/// Connection settings for the classifier endpoint.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// URL of the classification endpoint.
    pub endpoint: String,
    /// Bearer token presented on every request.
    pub token: String,
}

/// Task classifier backed by an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpTaskClassifier {
    http: reqwest::Client,
    config: ClassifierConfig,
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    source: &'a str,
    text: &'a str,
    context: &'a MessageContext,
}

#[derive(Debug, Deserialize)]
struct ClassifyReply {
    task_detected: bool,
    title: Option<String>,
    #[serde(default = "Option::default")]
    description: Option<String>,
    #[serde(default = "Option::default")]
    workspace: Option<String>,
    #[serde(default = "Option::default")]
    energy: Option<String>,
    #[serde(default = "Option::default")]
    estimated_minutes: Option<u32>,
    #[serde(default = "Vec::new")]
    tags: Vec<String>,
    #[serde(default = "Option::default")]
    confidence: Option<f32>,
}

impl HttpTaskClassifier {
    /// Creates a classifier over the given HTTP client and settings.
    #[must_use]
    pub const fn new(http: reqwest::Client, config: ClassifierConfig) -> Self {
        Self { http, config }
    }

    fn to_proposal(reply: ClassifyReply) -> ClassifierResult<Option<TaskProposal>> {
        if !reply.task_detected {
            return Ok(None);
        }
        let title = reply.title.ok_or_else(|| {
            ClassifierError::upstream(std::io::Error::other(
                "classifier detected a task but returned no title",
            ))
        })?;
        let mut proposal = TaskProposal::new(title)
            .map_err(ClassifierError::upstream)?
            .with_tags(reply.tags);
        if let Some(description) = reply.description {
            proposal = proposal.with_description(description);
        }
        if let Some(workspace) = reply.workspace {
            let workspace =
                Workspace::try_from(workspace.as_str()).map_err(ClassifierError::upstream)?;
            proposal = proposal.with_workspace(workspace);
        }
        if let Some(energy) = reply.energy {
            let energy = Energy::try_from(energy.as_str()).map_err(ClassifierError::upstream)?;
            proposal = proposal.with_energy(energy);
        }
        if let Some(minutes) = reply.estimated_minutes {
            let estimate = EstimatedMinutes::new(minutes).map_err(ClassifierError::upstream)?;
            proposal = proposal.with_estimated_minutes(estimate);
        }
        if let Some(confidence) = reply.confidence {
            let confidence = Confidence::new(confidence).map_err(ClassifierError::upstream)?;
            proposal = proposal.with_confidence(confidence);
        }
        Ok(Some(proposal))
    }
}

#[async_trait]
impl TaskClassifier for HttpTaskClassifier {
    async fn classify(&self, message: &InboundMessage) -> ClassifierResult<Option<TaskProposal>> {
        let request = ClassifyRequest {
            source: message.source().as_str(),
            text: message.body(),
            context: message.context(),
        };
        let reply: ClassifyReply = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.token)
            .json(&request)
            .send()
            .await
            .map_err(ClassifierError::upstream)?
            .error_for_status()
            .map_err(ClassifierError::upstream)?
            .json()
            .await
            .map_err(ClassifierError::upstream)?;
        Self::to_proposal(reply)
    }
}
