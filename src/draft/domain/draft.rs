//! Draft task aggregate root and related lifecycle types.

use super::{Confidence, DraftDomainError, DraftEdit, DraftFields, DraftId, DraftStatus, Source};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Unsaved draft produced by a scanner and classifier pair.
///
/// The draft store assigns the identifier and initial `pending` status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDraft {
    source: Source,
    fields: DraftFields,
    confidence: Option<Confidence>,
    created_at: DateTime<Utc>,
}

impl NewDraft {
    /// Creates an unsaved draft from classified fields.
    #[must_use]
    pub fn new(
        source: Source,
        fields: DraftFields,
        confidence: Option<Confidence>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            source,
            fields,
            confidence,
            created_at: clock.utc(),
        }
    }

    /// Returns the source channel.
    #[must_use]
    pub const fn source(&self) -> Source {
        self.source
    }

    /// Returns the proposed field set.
    #[must_use]
    pub const fn fields(&self) -> &DraftFields {
        &self.fields
    }

    /// Returns the classifier confidence, if any.
    #[must_use]
    pub const fn confidence(&self) -> Option<Confidence> {
        self.confidence
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Parameter object for reconstructing a persisted draft aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedDraftData {
    /// Persisted draft identifier.
    pub id: DraftId,
    /// Persisted source channel.
    pub source: Source,
    /// Persisted field set.
    pub fields: DraftFields,
    /// Persisted classifier confidence, if any.
    pub confidence: Option<Confidence>,
    /// Persisted review status.
    pub status: DraftStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Draft task aggregate root.
///
/// Belongs to exactly one source channel and yields at most one canonical
/// task, created at the moment of approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftTask {
    id: DraftId,
    source: Source,
    fields: DraftFields,
    confidence: Option<Confidence>,
    status: DraftStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DraftTask {
    /// Materialises a stored draft from an unsaved payload and the
    /// store-assigned identifier.
    #[must_use]
    pub fn from_new(id: DraftId, new_draft: NewDraft) -> Self {
        Self {
            id,
            source: new_draft.source,
            fields: new_draft.fields,
            confidence: new_draft.confidence,
            status: DraftStatus::Pending,
            created_at: new_draft.created_at,
            updated_at: new_draft.created_at,
        }
    }

    /// Reconstructs a draft from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedDraftData) -> Self {
        Self {
            id: data.id,
            source: data.source,
            fields: data.fields,
            confidence: data.confidence,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the draft identifier.
    #[must_use]
    pub const fn id(&self) -> DraftId {
        self.id
    }

    /// Returns the source channel.
    #[must_use]
    pub const fn source(&self) -> Source {
        self.source
    }

    /// Returns the editable field set.
    #[must_use]
    pub const fn fields(&self) -> &DraftFields {
        &self.fields
    }

    /// Returns the classifier confidence, if any.
    #[must_use]
    pub const fn confidence(&self) -> Option<Confidence> {
        self.confidence
    }

    /// Returns the review status.
    #[must_use]
    pub const fn status(&self) -> DraftStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial edit while the draft is still pending.
    ///
    /// # Errors
    ///
    /// Returns [`DraftDomainError::NotPending`] when the draft has already
    /// been approved or rejected, or [`DraftDomainError::EmptyTitle`] when
    /// the edit blanks the title.
    pub fn edit(&mut self, edit: &DraftEdit, clock: &impl Clock) -> Result<(), DraftDomainError> {
        self.ensure_pending()?;
        self.fields.apply(edit)?;
        self.touch(clock);
        Ok(())
    }

    /// Transitions the draft to `approved`.
    ///
    /// # Errors
    ///
    /// Returns [`DraftDomainError::NotPending`] when the draft is already
    /// terminal.
    pub fn approve(&mut self, clock: &impl Clock) -> Result<(), DraftDomainError> {
        self.transition_to(DraftStatus::Approved, clock)
    }

    /// Transitions the draft to `rejected`.
    ///
    /// # Errors
    ///
    /// Returns [`DraftDomainError::NotPending`] when the draft is already
    /// terminal.
    pub fn reject(&mut self, clock: &impl Clock) -> Result<(), DraftDomainError> {
        self.transition_to(DraftStatus::Rejected, clock)
    }

    fn transition_to(
        &mut self,
        target: DraftStatus,
        clock: &impl Clock,
    ) -> Result<(), DraftDomainError> {
        self.ensure_pending()?;
        if !self.status.can_transition_to(target) {
            return Err(DraftDomainError::InvalidStatusTransition {
                id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    fn ensure_pending(&self) -> Result<(), DraftDomainError> {
        if self.status.is_terminal() {
            return Err(DraftDomainError::NotPending {
                id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
