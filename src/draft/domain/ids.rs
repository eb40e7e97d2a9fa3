//! Identifier types for the draft domain.

use super::DraftDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a draft task.
///
/// Identifiers are positive integers assigned by the draft store on
/// creation; the domain never mints them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(i64);

impl DraftId {
    /// Creates a validated draft identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DraftDomainError::InvalidDraftId`] when the value is zero
    /// or negative.
    pub const fn new(value: i64) -> Result<Self, DraftDomainError> {
        if value <= 0 {
            return Err(DraftDomainError::InvalidDraftId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
