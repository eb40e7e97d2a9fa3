//! Canonical task aggregate and related lifecycle types.

use super::{Energy, EstimatedMinutes, TaskDomainError, TaskId, Workspace};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Canonical task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is actionable.
    Pending,
    /// Task is blocked on someone or something else.
    Waiting,
    /// Task has been completed.
    Done,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Waiting => "waiting",
            Self::Done => "done",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "waiting" => Ok(Self::Waiting),
            "done" => Ok(Self::Done),
            _ => Err(TaskDomainError::InvalidStatus(value.to_owned())),
        }
    }
}

/// Recurrence rule applied when a task completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    /// Repeats every day.
    Daily,
    /// Repeats every week.
    Weekly,
    /// Repeats every month.
    Monthly,
}

impl Recurrence {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl TryFrom<&str> for Recurrence {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(TaskDomainError::InvalidRecurrence(value.to_owned())),
        }
    }
}

/// Unsaved task payload submitted to the task store.
///
/// Built either directly from user input or from an approved draft's
/// effective fields. The store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    title: String,
    description: Option<String>,
    workspace: Option<Workspace>,
    energy: Option<Energy>,
    tags: Vec<String>,
    estimated_minutes: Option<EstimatedMinutes>,
    due_date: Option<DateTime<Utc>>,
    recurrence: Option<Recurrence>,
    depends_on: Vec<TaskId>,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates an unsaved task with a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty after
    /// trimming.
    pub fn new(title: impl Into<String>, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self {
            title,
            description: None,
            workspace: None,
            energy: None,
            tags: Vec::new(),
            estimated_minutes: None,
            due_date: None,
            recurrence: None,
            depends_on: Vec::new(),
            created_at: clock.utc(),
        })
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the workspace.
    #[must_use]
    pub const fn with_workspace(mut self, workspace: Workspace) -> Self {
        self.workspace = Some(workspace);
        self
    }

    /// Sets the energy level.
    #[must_use]
    pub const fn with_energy(mut self, energy: Energy) -> Self {
        self.energy = Some(energy);
        self
    }

    /// Sets the ordered tag list.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the time estimate.
    #[must_use]
    pub const fn with_estimated_minutes(mut self, estimate: EstimatedMinutes) -> Self {
        self.estimated_minutes = Some(estimate);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the recurrence rule.
    #[must_use]
    pub const fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    /// Sets the dependency list.
    #[must_use]
    pub fn with_dependencies(mut self, depends_on: impl IntoIterator<Item = TaskId>) -> Self {
        self.depends_on = depends_on.into_iter().collect();
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the workspace, if any.
    #[must_use]
    pub const fn workspace(&self) -> Option<Workspace> {
        self.workspace
    }

    /// Returns the energy level, if any.
    #[must_use]
    pub const fn energy(&self) -> Option<Energy> {
        self.energy
    }

    /// Returns the ordered tag list.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the time estimate, if any.
    #[must_use]
    pub const fn estimated_minutes(&self) -> Option<EstimatedMinutes> {
        self.estimated_minutes
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the recurrence rule, if any.
    #[must_use]
    pub const fn recurrence(&self) -> Option<Recurrence> {
        self.recurrence
    }

    /// Returns the dependency list.
    #[must_use]
    pub fn depends_on(&self) -> &[TaskId] {
        &self.depends_on
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted workspace, if any.
    pub workspace: Option<Workspace>,
    /// Persisted energy level, if any.
    pub energy: Option<Energy>,
    /// Persisted ordered tag list.
    pub tags: Vec<String>,
    /// Persisted time estimate, if any.
    pub estimated_minutes: Option<EstimatedMinutes>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted completion timestamp, if completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted snooze deadline, if snoozed.
    pub snoozed_until: Option<DateTime<Utc>>,
    /// Persisted recurrence rule, if any.
    pub recurrence: Option<Recurrence>,
    /// Persisted dependency list.
    pub depends_on: Vec<TaskId>,
}

/// Canonical task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    workspace: Option<Workspace>,
    energy: Option<Energy>,
    tags: Vec<String>,
    estimated_minutes: Option<EstimatedMinutes>,
    due_date: Option<DateTime<Utc>>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    snoozed_until: Option<DateTime<Utc>>,
    recurrence: Option<Recurrence>,
    depends_on: Vec<TaskId>,
}

impl Task {
    /// Materialises a stored task from an unsaved payload and the
    /// store-assigned identifier.
    #[must_use]
    pub fn from_new(id: TaskId, new_task: NewTask) -> Self {
        Self {
            id,
            title: new_task.title,
            description: new_task.description,
            workspace: new_task.workspace,
            energy: new_task.energy,
            tags: new_task.tags,
            estimated_minutes: new_task.estimated_minutes,
            due_date: new_task.due_date,
            status: TaskStatus::Pending,
            created_at: new_task.created_at,
            completed_at: None,
            snoozed_until: None,
            recurrence: new_task.recurrence,
            depends_on: new_task.depends_on,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            workspace: data.workspace,
            energy: data.energy,
            tags: data.tags,
            estimated_minutes: data.estimated_minutes,
            due_date: data.due_date,
            status: data.status,
            created_at: data.created_at,
            completed_at: data.completed_at,
            snoozed_until: data.snoozed_until,
            recurrence: data.recurrence,
            depends_on: data.depends_on,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the workspace, if any.
    #[must_use]
    pub const fn workspace(&self) -> Option<Workspace> {
        self.workspace
    }

    /// Returns the energy level, if any.
    #[must_use]
    pub const fn energy(&self) -> Option<Energy> {
        self.energy
    }

    /// Returns the ordered tag list.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the time estimate, if any.
    #[must_use]
    pub const fn estimated_minutes(&self) -> Option<EstimatedMinutes> {
        self.estimated_minutes
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, if completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the snooze deadline, if snoozed.
    #[must_use]
    pub const fn snoozed_until(&self) -> Option<DateTime<Utc>> {
        self.snoozed_until
    }

    /// Returns the recurrence rule, if any.
    #[must_use]
    pub const fn recurrence(&self) -> Option<Recurrence> {
        self.recurrence
    }

    /// Returns the dependency list.
    #[must_use]
    pub fn depends_on(&self) -> &[TaskId] {
        &self.depends_on
    }

    /// Marks the task done and records the completion time.
    pub fn complete(&mut self, clock: &impl Clock) {
        self.status = TaskStatus::Done;
        self.completed_at = Some(clock.utc());
    }

    /// Snoozes the task until the given deadline.
    pub fn snooze_until(&mut self, until: DateTime<Utc>) {
        self.snoozed_until = Some(until);
    }
}
