//! `PostgreSQL` repository implementation for draft review storage.

use super::{
    models::{DraftRow, NewDraftRow},
    schema::draft_tasks,
};
use crate::draft::{
    domain::{
        Confidence, DraftFields, DraftId, DraftStatus, DraftTask, NewDraft, PersistedDraftData,
        Source,
    },
    ports::{DraftRepository, DraftRepositoryError, DraftRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by draft adapters.
pub type DraftPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed draft repository.
#[derive(Debug, Clone)]
pub struct PostgresDraftRepository {
    pool: DraftPgPool,
}

impl PostgresDraftRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DraftPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DraftRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DraftRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DraftRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(DraftRepositoryError::persistence)?
    }
}

#[async_trait]
impl DraftRepository for PostgresDraftRepository {
    async fn create(&self, draft: &NewDraft) -> DraftRepositoryResult<DraftTask> {
        let new_row = to_new_row(draft)?;
        self.run_blocking(move |connection| {
            let row: DraftRow = diesel::insert_into(draft_tasks::table)
                .values(&new_row)
                .returning(DraftRow::as_returning())
                .get_result(connection)
                .map_err(DraftRepositoryError::persistence)?;
            row_to_draft(row)
        })
        .await
    }

    async fn update(&self, draft: &DraftTask) -> DraftRepositoryResult<()> {
        let draft_id = draft.id();
        let fields = serde_json::to_value(draft.fields()).map_err(DraftRepositoryError::persistence)?;
        let status = draft.status().as_str().to_owned();
        let updated_at = draft.updated_at();

        self.run_blocking(move |connection| {
            let affected = diesel::update(draft_tasks::table.find(draft_id.value()))
                .set((
                    draft_tasks::fields.eq(fields),
                    draft_tasks::status.eq(status),
                    draft_tasks::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(DraftRepositoryError::persistence)?;
            if affected == 0 {
                return Err(DraftRepositoryError::NotFound(draft_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: DraftId) -> DraftRepositoryResult<Option<DraftTask>> {
        self.run_blocking(move |connection| {
            let row = draft_tasks::table
                .find(id.value())
                .select(DraftRow::as_select())
                .first::<DraftRow>(connection)
                .optional()
                .map_err(DraftRepositoryError::persistence)?;
            row.map(row_to_draft).transpose()
        })
        .await
    }

    async fn list_by_status(
        &self,
        status: Option<DraftStatus>,
    ) -> DraftRepositoryResult<Vec<DraftTask>> {
        self.run_blocking(move |connection| {
            let mut query = draft_tasks::table
                .select(DraftRow::as_select())
                .order((draft_tasks::created_at.desc(), draft_tasks::id.desc()))
                .into_boxed();
            if let Some(wanted) = status {
                query = query.filter(draft_tasks::status.eq(wanted.as_str()));
            }
            let rows = query
                .load::<DraftRow>(connection)
                .map_err(DraftRepositoryError::persistence)?;
            rows.into_iter().map(row_to_draft).collect()
        })
        .await
    }

    async fn delete(&self, id: DraftId) -> DraftRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(draft_tasks::table.find(id.value()))
                .execute(connection)
                .map_err(DraftRepositoryError::persistence)?;
            if affected == 0 {
                return Err(DraftRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(draft: &NewDraft) -> DraftRepositoryResult<NewDraftRow> {
    let fields = serde_json::to_value(draft.fields()).map_err(DraftRepositoryError::persistence)?;
    Ok(NewDraftRow {
        source: draft.source().as_str().to_owned(),
        fields,
        confidence: draft.confidence().map(Confidence::value),
        status: DraftStatus::Pending.as_str().to_owned(),
        created_at: draft.created_at(),
        updated_at: draft.created_at(),
    })
}

fn row_to_draft(row: DraftRow) -> DraftRepositoryResult<DraftTask> {
    let DraftRow {
        id,
        source: persisted_source,
        fields: persisted_fields,
        confidence: persisted_confidence,
        status: persisted_status,
        created_at,
        updated_at,
    } = row;

    let fields = serde_json::from_value::<DraftFields>(persisted_fields)
        .map_err(DraftRepositoryError::persistence)?;
    let source = Source::try_from(persisted_source.as_str())
        .map_err(DraftRepositoryError::persistence)?;
    let status = DraftStatus::try_from(persisted_status.as_str())
        .map_err(DraftRepositoryError::persistence)?;
    let confidence = persisted_confidence
        .map(Confidence::new)
        .transpose()
        .map_err(DraftRepositoryError::persistence)?;
    let id = DraftId::new(id).map_err(DraftRepositoryError::persistence)?;

    Ok(DraftTask::from_persisted(PersistedDraftData {
        id,
        source,
        fields,
        confidence,
        status,
        created_at,
        updated_at,
    }))
}
