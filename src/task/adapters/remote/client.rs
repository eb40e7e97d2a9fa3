//! HTTP client for the remote task store's action-parameter API.
//!
//! The remote store exposes a single endpoint keyed by an `action` query
//! parameter (`get_tasks`, `create_task`, `complete_task`, `sync_tasks`).
//! All payloads are JSON and requests authenticate with a bearer token.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Error code the remote store uses for unknown identifiers.
const NOT_FOUND_CODE: &str = "not_found";

/// Connection settings for the remote task store.
#[derive(Debug, Clone)]
pub struct RemoteStoreConfig {
    /// Endpoint URL of the action-parameter API.
    pub base_url: String,
    /// Bearer token presented on every request.
    pub token: String,
}

/// Remote task store client.
#[derive(Debug, Clone)]
pub struct RemoteTaskStore {
    http: reqwest::Client,
    config: RemoteStoreConfig,
}

/// Response envelope returned by every store action.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    #[serde(default = "Option::default")]
    data: Option<T>,
    #[serde(default = "Option::default")]
    error: Option<String>,
}

impl RemoteTaskStore {
    /// Creates a client over the given HTTP client and connection settings.
    #[must_use]
    pub const fn new(http: reqwest::Client, config: RemoteStoreConfig) -> Self {
        Self { http, config }
    }

    fn get(&self, action: &str) -> reqwest::RequestBuilder {
        self.http
            .get(&self.config.base_url)
            .query(&[("action", action)])
            .bearer_auth(&self.config.token)
    }

    fn post(&self, action: &str) -> reqwest::RequestBuilder {
        self.http
            .post(&self.config.base_url)
            .query(&[("action", action)])
            .bearer_auth(&self.config.token)
    }

    async fn unwrap_envelope<T>(
        response: reqwest::Response,
        id_for_not_found: Option<TaskId>,
    ) -> TaskStoreResult<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let envelope: Envelope<T> = response
            .error_for_status()
            .map_err(TaskStoreError::upstream)?
            .json()
            .await
            .map_err(TaskStoreError::upstream)?;

        if envelope.success {
            return Ok(envelope.data);
        }
        let code = envelope.error.unwrap_or_else(|| "unknown error".to_owned());
        match id_for_not_found {
            Some(id) if code == NOT_FOUND_CODE => Err(TaskStoreError::NotFound(id)),
            _ => Err(TaskStoreError::upstream(std::io::Error::other(code))),
        }
    }

    fn require_task(data: Option<PersistedTaskData>) -> TaskStoreResult<Task> {
        data.map(Task::from_persisted).ok_or_else(|| {
            TaskStoreError::upstream(std::io::Error::other("store returned no task payload"))
        })
    }
}

fn to_persisted(task: &Task) -> PersistedTaskData {
    PersistedTaskData {
        id: task.id(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        workspace: task.workspace(),
        energy: task.energy(),
        tags: task.tags().to_vec(),
        estimated_minutes: task.estimated_minutes(),
        due_date: task.due_date(),
        status: task.status(),
        created_at: task.created_at(),
        completed_at: task.completed_at(),
        snoozed_until: task.snoozed_until(),
        recurrence: task.recurrence(),
        depends_on: task.depends_on().to_vec(),
    }
}

#[async_trait]
impl TaskStore for RemoteTaskStore {
    async fn create(&self, task: &NewTask) -> TaskStoreResult<Task> {
        let response = self
            .post("create_task")
            .json(task)
            .send()
            .await
            .map_err(TaskStoreError::upstream)?;
        let data = Self::unwrap_envelope::<PersistedTaskData>(response, None).await?;
        Self::require_task(data)
    }

    async fn list(&self) -> TaskStoreResult<Vec<Task>> {
        let response = self
            .get("get_tasks")
            .send()
            .await
            .map_err(TaskStoreError::upstream)?;
        let data = Self::unwrap_envelope::<Vec<PersistedTaskData>>(response, None).await?;
        Ok(data
            .unwrap_or_default()
            .into_iter()
            .map(Task::from_persisted)
            .collect())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let tasks = self.list().await?;
        Ok(tasks.into_iter().find(|task| task.id() == id))
    }

    async fn complete(&self, id: TaskId) -> TaskStoreResult<Task> {
        let response = self
            .post("complete_task")
            .json(&json!({ "id": id }))
            .send()
            .await
            .map_err(TaskStoreError::upstream)?;
        let data = Self::unwrap_envelope::<PersistedTaskData>(response, Some(id)).await?;
        Self::require_task(data)
    }

    async fn sync(&self, tasks: &[Task]) -> TaskStoreResult<()> {
        let rows: Vec<PersistedTaskData> = tasks.iter().map(to_persisted).collect();
        let response = self
            .post("sync_tasks")
            .json(&json!({ "tasks": rows }))
            .send()
            .await
            .map_err(TaskStoreError::upstream)?;
        Self::unwrap_envelope::<serde_json::Value>(response, None).await?;
        Ok(())
    }
}
