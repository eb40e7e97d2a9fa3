//! In-memory store for canonical task tests and local runs.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{NewTask, Task, TaskId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store with sequential id assignment.
#[derive(Debug, Clone)]
pub struct InMemoryTaskStore<C> {
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<i64, Task>,
    next_id: i64,
}

impl<C> InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState {
                tasks: BTreeMap::new(),
                next_id: 1,
            })),
            clock,
        }
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskStoreError {
    TaskStoreError::upstream(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C> TaskStore for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn create(&self, task: &NewTask) -> TaskStoreResult<Task> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let raw_id = state.next_id;
        state.next_id += 1;
        let id = TaskId::new(raw_id).map_err(TaskStoreError::upstream)?;
        let stored = Task::from_new(id, task.clone());
        state.tasks.insert(raw_id, stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.tasks.get(&id.value()).cloned())
    }

    async fn complete(&self, id: TaskId) -> TaskStoreResult<Task> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let task = state
            .tasks
            .get_mut(&id.value())
            .ok_or(TaskStoreError::NotFound(id))?;
        task.complete(&*self.clock);
        Ok(task.clone())
    }

    async fn sync(&self, tasks: &[Task]) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.tasks = tasks
            .iter()
            .map(|task| (task.id().value(), task.clone()))
            .collect();
        let highest_id = state.tasks.keys().next_back().copied().unwrap_or(0);
        state.next_id = state.next_id.max(highest_id + 1);
        Ok(())
    }
}
