//! `PostgreSQL` persistence adapter for draft review.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{DraftPgPool, PostgresDraftRepository};
