//! Tasks nested under a project.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Error;
use super::ids::{ProjectId, TaskId};
use super::user::UserId;

/// Validation errors raised while building task inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskValidationError {
    /// Title was blank.
    #[error("task title is required")]
    EmptyTitle,
    /// Description was blank.
    #[error("task description is required")]
    EmptyDescription,
    /// Status literal was not recognised.
    #[error("unknown task status: {value}")]
    UnknownStatus {
        /// The rejected input.
        value: String,
    },
}

impl TaskValidationError {
    /// Form field the failure belongs to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyDescription => "description",
            Self::UnknownStatus { .. } => "status",
        }
    }
}

impl From<TaskValidationError> for Error {
    fn from(value: TaskValidationError) -> Self {
        Self::invalid_request(value.to_string()).with_details(json!({ "field": value.field() }))
    }
}

/// Progress state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Waiting for a contributor.
    Open,
    /// Someone is working on it.
    InProgress,
    /// Delivered.
    Completed,
}

impl TaskStatus {
    /// Parse the wire literal.
    pub fn parse(value: &str) -> Result<Self, TaskValidationError> {
        match value {
            "open" => Ok(Self::Open),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(TaskValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }

    /// Wire literal for this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task budget in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budget(u64);

impl Budget {
    /// Wrap an amount of whole currency units.
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Amount in whole currency units.
    pub const fn amount(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Caller-supplied fields for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: String,
    budget: Budget,
    status: TaskStatus,
}

impl NewTask {
    /// Validate the task fields.
    pub fn try_new(
        title: impl Into<String>,
        description: impl Into<String>,
        budget: Budget,
        status: TaskStatus,
    ) -> Result<Self, TaskValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }
        Ok(Self {
            title,
            description,
            budget,
            status,
        })
    }
}

/// A unit of paid work inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    description: String,
    budget: Budget,
    status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    assigned_to: Option<UserId>,
    created_at: DateTime<Utc>,
}

impl Task {
    pub(crate) fn create(
        id: TaskId,
        project_id: ProjectId,
        input: NewTask,
        created_at: DateTime<Utc>,
    ) -> Self {
        let NewTask {
            title,
            description,
            budget,
            status,
        } = input;
        Self {
            id,
            project_id,
            title,
            description,
            budget,
            status,
            assigned_to: None,
            created_at,
        }
    }

    /// Task identifier.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Owning project.
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Task title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Task description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Budget offered for the task.
    pub fn budget(&self) -> Budget {
        self.budget
    }

    /// Current status.
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Assigned contributor, if any.
    pub fn assigned_to(&self) -> Option<&UserId> {
        self.assigned_to.as_ref()
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    pub(crate) fn assign(&mut self, assignee: Option<UserId>) {
        self.assigned_to = assignee;
    }
}
