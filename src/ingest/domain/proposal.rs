//! Classifier output proposing a draft task.

use crate::draft::domain::{Confidence, DraftDomainError, DraftFields};
use crate::task::domain::{Energy, EstimatedMinutes, Workspace};
use chrono::{DateTime, Utc};

/// Maximum number of tags carried over from a proposal.
pub const MAX_PROPOSAL_TAGS: usize = 5;

/// A positive classification: the classifier believes the message
/// contains an actionable task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskProposal {
    title: String,
    description: Option<String>,
    workspace: Option<Workspace>,
    energy: Option<Energy>,
    estimated_minutes: Option<EstimatedMinutes>,
    tags: Vec<String>,
    due_date: Option<DateTime<Utc>>,
    confidence: Option<Confidence>,
}

impl TaskProposal {
    /// Creates a proposal with a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`DraftDomainError::EmptyTitle`] when the title is empty
    /// after trimming.
    pub fn new(title: impl Into<String>) -> Result<Self, DraftDomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DraftDomainError::EmptyTitle);
        }
        Ok(Self {
            title,
            description: None,
            workspace: None,
            energy: None,
            estimated_minutes: None,
            tags: Vec::new(),
            due_date: None,
            confidence: None,
        })
    }

    /// Sets the proposed description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the proposed workspace.
    #[must_use]
    pub const fn with_workspace(mut self, workspace: Workspace) -> Self {
        self.workspace = Some(workspace);
        self
    }

    /// Sets the proposed energy level.
    #[must_use]
    pub const fn with_energy(mut self, energy: Energy) -> Self {
        self.energy = Some(energy);
        self
    }

    /// Sets the proposed time estimate.
    #[must_use]
    pub const fn with_estimated_minutes(mut self, estimate: EstimatedMinutes) -> Self {
        self.estimated_minutes = Some(estimate);
        self
    }

    /// Sets the proposed tags, keeping at most [`MAX_PROPOSAL_TAGS`].
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().take(MAX_PROPOSAL_TAGS).collect();
        self
    }

    /// Sets the proposed due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the classifier confidence.
    #[must_use]
    pub const fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Returns the proposed title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the classifier confidence, if any.
    #[must_use]
    pub const fn confidence(&self) -> Option<Confidence> {
        self.confidence
    }

    /// Returns the time estimate, falling back to the default when the
    /// classifier gave none.
    #[must_use]
    pub fn effective_estimate(&self) -> EstimatedMinutes {
        self.estimated_minutes.unwrap_or(EstimatedMinutes::DEFAULT)
    }

    /// Converts the proposal into a draft field set.
    ///
    /// # Errors
    ///
    /// Returns [`DraftDomainError::EmptyTitle`] when the title fails the
    /// draft-field validation.
    pub fn draft_fields(&self) -> Result<DraftFields, DraftDomainError> {
        let mut fields = DraftFields::new(self.title.clone())?
            .with_estimated_minutes(self.effective_estimate())
            .with_tags(self.tags.clone());
        if let Some(description) = &self.description {
            fields = fields.with_description(description.clone());
        }
        if let Some(workspace) = self.workspace {
            fields = fields.with_workspace(workspace);
        }
        if let Some(energy) = self.energy {
            fields = fields.with_energy(energy);
        }
        if let Some(due_date) = self.due_date {
            fields = fields.with_due_date(due_date);
        }
        Ok(fields)
    }
}
