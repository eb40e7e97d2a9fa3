//! Adapters for message ingestion.
//!
//! # Available Adapters
//!
//! - [`memory`]: queue-backed source, scripted classifier, and in-memory
//!   integration state for unit testing and local runs
//! - [`http`]: classifier adapter calling an LLM endpoint over HTTP

pub mod http;
pub mod memory;
