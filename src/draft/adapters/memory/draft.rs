//! In-memory repository for draft review tests and local runs.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::draft::{
    domain::{DraftId, DraftStatus, DraftTask, NewDraft},
    ports::{DraftRepository, DraftRepositoryError, DraftRepositoryResult},
};

/// Thread-safe in-memory draft repository with sequential id assignment.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDraftRepository {
    state: Arc<RwLock<InMemoryDraftState>>,
}

#[derive(Debug)]
struct InMemoryDraftState {
    drafts: BTreeMap<i64, DraftTask>,
    next_id: i64,
}

impl Default for InMemoryDraftState {
    fn default() -> Self {
        Self {
            drafts: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl InMemoryDraftRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> DraftRepositoryError {
    DraftRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl DraftRepository for InMemoryDraftRepository {
    async fn create(&self, draft: &NewDraft) -> DraftRepositoryResult<DraftTask> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let raw_id = state.next_id;
        state.next_id += 1;
        let id = DraftId::new(raw_id).map_err(DraftRepositoryError::persistence)?;
        let stored = DraftTask::from_new(id, draft.clone());
        state.drafts.insert(raw_id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, draft: &DraftTask) -> DraftRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let key = draft.id().value();
        if !state.drafts.contains_key(&key) {
            return Err(DraftRepositoryError::NotFound(draft.id()));
        }
        state.drafts.insert(key, draft.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: DraftId) -> DraftRepositoryResult<Option<DraftTask>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.drafts.get(&id.value()).cloned())
    }

    async fn list_by_status(
        &self,
        status: Option<DraftStatus>,
    ) -> DraftRepositoryResult<Vec<DraftTask>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut drafts: Vec<DraftTask> = state
            .drafts
            .values()
            .filter(|draft| status.is_none_or(|wanted| draft.status() == wanted))
            .cloned()
            .collect();
        // Newest first: creation time, then id as a stable tie-break.
        drafts.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then(b.id().cmp(&a.id()))
        });
        Ok(drafts)
    }

    async fn delete(&self, id: DraftId) -> DraftRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.drafts.remove(&id.value()).is_none() {
            return Err(DraftRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
