//! Validated categorisation field types shared by tasks and drafts.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task categorisation dimension separating areas of life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Workspace {
    /// Personal errands and projects.
    Personal,
    /// Employment work.
    Job,
    /// Independent client work.
    Freelance,
}

impl Workspace {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Job => "job",
            Self::Freelance => "freelance",
        }
    }
}

impl TryFrom<&str> for Workspace {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "personal" => Ok(Self::Personal),
            "job" => Ok(Self::Job),
            "freelance" => Ok(Self::Freelance),
            _ => Err(TaskDomainError::InvalidWorkspace(value.to_owned())),
        }
    }
}

impl fmt::Display for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative estimate of the cognitive effort a task requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Energy {
    /// Routine, low-effort work.
    Low,
    /// Ordinary focused work.
    Medium,
    /// Demanding deep work.
    High,
}

impl Energy {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Energy {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(TaskDomainError::InvalidEnergy(value.to_owned())),
        }
    }
}

impl fmt::Display for Energy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positive time estimate in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimatedMinutes(u32);

impl EstimatedMinutes {
    /// Fallback estimate applied when a classifier gives no estimate.
    pub const DEFAULT: Self = Self(15);

    /// Creates a validated time estimate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidEstimatedMinutes`] when the value
    /// is zero.
    pub const fn new(minutes: u32) -> Result<Self, TaskDomainError> {
        if minutes == 0 {
            return Err(TaskDomainError::InvalidEstimatedMinutes);
        }
        Ok(Self(minutes))
    }

    /// Returns the estimate in minutes.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EstimatedMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}
