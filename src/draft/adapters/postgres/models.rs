//! Diesel row models for draft persistence.

use super::schema::draft_tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for draft records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = draft_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DraftRow {
    /// Store-assigned draft identifier.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub id: i64,
    /// Source channel.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub source: String,
    /// Editable field payload.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub fields: Value,
    /// Classifier confidence, if reported.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Float4>)]
    pub confidence: Option<f32>,
    /// Review status.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for draft records; the database assigns the identifier.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = draft_tasks)]
pub struct NewDraftRow {
    /// Source channel.
    pub source: String,
    /// Editable field payload.
    pub fields: Value,
    /// Classifier confidence, if reported.
    pub confidence: Option<f32>,
    /// Review status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}
