//! Persistence adapters for the draft module.
//!
//! This module provides concrete implementations of the
//! [`DraftRepository`] port, following hexagonal architecture principles.
//! Adapters handle all infrastructure concerns while the domain remains
//! pure.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryDraftRepository`]: Thread-safe in-memory storage
//!   for unit testing and local runs
//! - [`postgres::PostgresDraftRepository`]: `PostgreSQL` persistence using
//!   Diesel ORM
//!
//! [`DraftRepository`]: crate::draft::ports::repository::DraftRepository

pub mod memory;
pub mod postgres;
