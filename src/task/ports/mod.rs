//! Port contracts for canonical task storage.
//!
//! Ports define infrastructure-agnostic interfaces used by the review
//! workflow and the API layer.

pub mod store;

pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
