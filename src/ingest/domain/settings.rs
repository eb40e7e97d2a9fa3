//! Per-integration scan settings.

use super::IngestDomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How often, and whether, a source is scanned for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSettings {
    frequency_minutes: u32,
    enabled: bool,
}

impl ScanSettings {
    /// Default scan cadence: every fifteen minutes, enabled.
    pub const DEFAULT: Self = Self {
        frequency_minutes: 15,
        enabled: true,
    };

    /// Creates validated scan settings.
    ///
    /// # Errors
    ///
    /// Returns [`IngestDomainError::InvalidScanFrequency`] when the
    /// frequency is zero minutes.
    pub const fn new(frequency_minutes: u32, enabled: bool) -> Result<Self, IngestDomainError> {
        if frequency_minutes == 0 {
            return Err(IngestDomainError::InvalidScanFrequency);
        }
        Ok(Self {
            frequency_minutes,
            enabled,
        })
    }

    /// Returns the scan frequency in minutes.
    #[must_use]
    pub const fn frequency_minutes(&self) -> u32 {
        self.frequency_minutes
    }

    /// Returns whether scanning is enabled.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the scan frequency as a duration.
    #[must_use]
    pub fn frequency(&self) -> Duration {
        Duration::from_secs(u64::from(self.frequency_minutes) * 60)
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
