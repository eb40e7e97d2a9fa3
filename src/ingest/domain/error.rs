//! Error types for ingestion domain validation.

use thiserror::Error;

/// Errors returned while constructing ingestion domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IngestDomainError {
    /// The scan frequency is zero minutes.
    #[error("scan frequency must be a positive number of minutes")]
    InvalidScanFrequency,
}
