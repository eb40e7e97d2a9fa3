//! In-memory integration state repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::auth::UserId;
use crate::draft::domain::Source;
use crate::ingest::{
    domain::IntegrationState,
    ports::{IntegrationStateError, IntegrationStateRepository, IntegrationStateResult},
};

/// Thread-safe in-memory integration state keyed by user and source.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIntegrationStateRepository {
    state: Arc<RwLock<HashMap<(UserId, Source), IntegrationState>>>,
}

impl InMemoryIntegrationStateRepository {
    /// Creates an empty state repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> IntegrationStateError {
    IntegrationStateError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl IntegrationStateRepository for InMemoryIntegrationStateRepository {
    async fn get(&self, user: UserId, source: Source) -> IntegrationStateResult<IntegrationState> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.get(&(user, source)).cloned().unwrap_or_default())
    }

    async fn put(
        &self,
        user: UserId,
        source: Source,
        value: IntegrationState,
    ) -> IntegrationStateResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.insert((user, source), value);
        Ok(())
    }
}
