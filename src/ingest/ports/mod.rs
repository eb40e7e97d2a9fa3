//! Port contracts for message ingestion.
//!
//! Ports define infrastructure-agnostic interfaces used by the scanner
//! and scheduler services.

pub mod classifier;
pub mod source;
pub mod state;

pub use classifier::{ClassifierError, ClassifierResult, TaskClassifier};
pub use source::{MessageSource, SourceError, SourceResult};
pub use state::{IntegrationStateError, IntegrationStateRepository, IntegrationStateResult};
