//! Canonical task storage for TaskFlow.
//!
//! This module models the user-owned task records that draft approval
//! feeds into: the task aggregate with its categorisation dimensions, the
//! store port, an in-memory adapter, and the HTTP client for the remote
//! store's action-parameter API. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
