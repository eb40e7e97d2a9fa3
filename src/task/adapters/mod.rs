//! Store adapters for the task module.
//!
//! This module provides concrete implementations of the [`TaskStore`]
//! port, following hexagonal architecture principles. Adapters handle all
//! infrastructure concerns while the domain remains pure.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryTaskStore`]: Thread-safe in-memory storage for unit
//!   testing and local runs
//! - [`remote::RemoteTaskStore`]: HTTP client for the remote task store's
//!   action-parameter API
//!
//! [`TaskStore`]: crate::task::ports::store::TaskStore

pub mod memory;
pub mod remote;
