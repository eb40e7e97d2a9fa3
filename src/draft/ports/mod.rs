//! Port contracts for draft review.
//!
//! Ports define infrastructure-agnostic interfaces used by the review
//! service.

pub mod repository;

pub use repository::{DraftRepository, DraftRepositoryError, DraftRepositoryResult};
