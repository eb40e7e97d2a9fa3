//! Draft review workflow for TaskFlow.
//!
//! This module implements the core of the system: AI-proposed draft tasks
//! held for human review, with list / edit / approve / reject / bulk
//! operations. Approval creates exactly one canonical task from the
//! draft's effective fields; rejection is terminal and creates nothing.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
