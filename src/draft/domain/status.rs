//! Draft review status machine.

use super::ParseDraftStatusError;
use serde::{Deserialize, Serialize};

/// Review status of a draft task.
///
/// Transitions are one-way: a pending draft moves to `approved` or
/// `rejected` and both outcomes are terminal. Re-pending never occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    /// Awaiting a human decision.
    Pending,
    /// Accepted; a canonical task was created from this draft.
    Approved,
    /// Dismissed; no canonical task exists for this draft.
    Rejected,
}

impl DraftStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Reports whether the status permits a transition to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }

    /// Reports whether the status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl TryFrom<&str> for DraftStatus {
    type Error = ParseDraftStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseDraftStatusError(value.to_owned())),
        }
    }
}
