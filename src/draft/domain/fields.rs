//! Source channel, confidence, and editable field set for drafts.

use super::{DraftDomainError, ParseSourceError};
use crate::task::domain::{Energy, EstimatedMinutes, Workspace};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// External channel a draft was ingested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Gmail inbox scanning.
    Gmail,
    /// Slack mention scanning.
    Slack,
    /// Telegram message scanning.
    Telegram,
}

impl Source {
    /// Every supported source channel.
    pub const ALL: [Self; 3] = [Self::Gmail, Self::Slack, Self::Telegram];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gmail => "gmail",
            Self::Slack => "slack",
            Self::Telegram => "telegram",
        }
    }
}

impl TryFrom<&str> for Source {
    type Error = ParseSourceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "gmail" => Ok(Self::Gmail),
            "slack" => Ok(Self::Slack),
            "telegram" => Ok(Self::Telegram),
            _ => Err(ParseSourceError(value.to_owned())),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier confidence in the closed interval `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f32);

impl Confidence {
    /// Creates a validated confidence value.
    ///
    /// # Errors
    ///
    /// Returns [`DraftDomainError::InvalidConfidence`] when the value is
    /// not a finite number in `[0, 1]`.
    pub fn new(value: f32) -> Result<Self, DraftDomainError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(DraftDomainError::InvalidConfidence(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Editable field set carried by every draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftFields {
    title: String,
    description: Option<String>,
    workspace: Option<Workspace>,
    energy: Option<Energy>,
    estimated_minutes: Option<EstimatedMinutes>,
    tags: Vec<String>,
    due_date: Option<DateTime<Utc>>,
}

impl DraftFields {
    /// Creates a field set with a validated title.
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
        })
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the workspace suggestion.
    #[must_use]
    pub const fn with_workspace(mut self, workspace: Workspace) -> Self {
        self.workspace = Some(workspace);
        self
    }

    /// Sets the energy estimate.
    #[must_use]
    pub const fn with_energy(mut self, energy: Energy) -> Self {
        self.energy = Some(energy);
        self
    }

    /// Sets the time estimate.
    #[must_use]
    pub const fn with_estimated_minutes(mut self, estimate: EstimatedMinutes) -> Self {
        self.estimated_minutes = Some(estimate);
        self
    }

    /// Sets the ordered tag list.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the workspace suggestion, if any.
    #[must_use]
    pub const fn workspace(&self) -> Option<Workspace> {
        self.workspace
    }

    /// Returns the energy estimate, if any.
    #[must_use]
    pub const fn energy(&self) -> Option<Energy> {
        self.energy
    }

    /// Returns the time estimate, if any.
    #[must_use]
    pub const fn estimated_minutes(&self) -> Option<EstimatedMinutes> {
        self.estimated_minutes
    }

    /// Returns the ordered tag list.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Applies a partial edit, leaving absent fields unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DraftDomainError::EmptyTitle`] when the edit supplies a
    /// title that is empty after trimming.
    pub fn apply(&mut self, edit: &DraftEdit) -> Result<(), DraftDomainError> {
        if let Some(title) = edit.title() {
            if title.trim().is_empty() {
                return Err(DraftDomainError::EmptyTitle);
            }
            self.title = title.to_owned();
        }
        if let Some(description) = edit.description() {
            self.description = Some(description.to_owned());
        }
        if let Some(workspace) = edit.workspace() {
            self.workspace = Some(workspace);
        }
        if let Some(energy) = edit.energy() {
            self.energy = Some(energy);
        }
        if let Some(estimate) = edit.estimated_minutes() {
            self.estimated_minutes = Some(estimate);
        }
        if let Some(tags) = edit.tags() {
            self.tags = tags.to_vec();
        }
        if let Some(due_date) = edit.due_date() {
            self.due_date = Some(due_date);
        }
        Ok(())
    }
}

/// Partial field overlay supplied by edit and approval requests.
///
/// Absent fields leave the draft unchanged; present fields replace the
/// draft's value wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftEdit {
    title: Option<String>,
    description: Option<String>,
    workspace: Option<Workspace>,
    energy: Option<Energy>,
    estimated_minutes: Option<EstimatedMinutes>,
    tags: Option<Vec<String>>,
    due_date: Option<DateTime<Utc>>,
}

impl DraftEdit {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the workspace suggestion.
    #[must_use]
    pub const fn with_workspace(mut self, workspace: Workspace) -> Self {
        self.workspace = Some(workspace);
        self
    }

    /// Replaces the energy estimate.
    #[must_use]
    pub const fn with_energy(mut self, energy: Energy) -> Self {
        self.energy = Some(energy);
        self
    }

    /// Replaces the time estimate.
    #[must_use]
    pub const fn with_estimated_minutes(mut self, estimate: EstimatedMinutes) -> Self {
        self.estimated_minutes = Some(estimate);
        self
    }

    /// Replaces the tag list.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns the replacement title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the replacement description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the replacement workspace, if any.
    #[must_use]
    pub const fn workspace(&self) -> Option<Workspace> {
        self.workspace
    }

    /// Returns the replacement energy estimate, if any.
    #[must_use]
    pub const fn energy(&self) -> Option<Energy> {
        self.energy
    }

    /// Returns the replacement time estimate, if any.
    #[must_use]
    pub const fn estimated_minutes(&self) -> Option<EstimatedMinutes> {
        self.estimated_minutes
    }

    /// Returns the replacement tag list, if any.
    #[must_use]
    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }

    /// Returns the replacement due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }
}
