//! TaskFlow: draft-task ingestion and approval backend.
//!
//! This crate provides the core of a personal task-management backend:
//! scanning connected channels for new messages, classifying them into
//! task proposals, holding the proposals as pending drafts, and turning
//! an approved draft into exactly one canonical task.
//!
//! # Architecture
//!
//! TaskFlow follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`draft`]: Draft review workflow (edit, approve, reject, bulk)
//! - [`task`]: Canonical task model and stores
//! - [`ingest`]: Scanners, classifier contract, and scan scheduling
//! - [`auth`]: Signed bearer-token codec
//! - [`api`]: HTTP surface
//! - [`config`]: Explicit runtime configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod draft;
pub mod ingest;
pub mod task;
