//! Project aggregate and the input used to create one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Error;
use super::ids::{ProjectId, TaskId};
use super::task::Task;

/// Validation errors raised while building project inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectValidationError {
    /// Title was blank.
    #[error("project title is required")]
    EmptyTitle,
    /// Description was blank.
    #[error("project description is required")]
    EmptyDescription,
    /// Owning client identifier was blank.
    #[error("client id is required")]
    EmptyClientId,
    /// Status literal was not recognised.
    #[error("unknown project status: {value}")]
    UnknownStatus {
        /// The rejected input.
        value: String,
    },
}

impl ProjectValidationError {
    /// Form field the failure belongs to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyDescription => "description",
            Self::EmptyClientId => "clientId",
            Self::UnknownStatus { .. } => "status",
        }
    }
}

impl From<ProjectValidationError> for Error {
    fn from(value: ProjectValidationError) -> Self {
        Self::invalid_request(value.to_string()).with_details(json!({ "field": value.field() }))
    }
}

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    /// Accepting work.
    Active,
    /// All work delivered.
    Completed,
    /// Hidden from day-to-day work but kept for reference.
    Archived,
}

impl ProjectStatus {
    /// Parse the wire literal.
    pub fn parse(value: &str) -> Result<Self, ProjectValidationError> {
        match value {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            other => Err(ProjectValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }

    /// Wire literal for this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of the client that owns a project.
///
/// Free-form rather than a [`UserId`](super::UserId): catalog entries may
/// reference clients that never signed in on this profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Validate a non-blank client identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ProjectValidationError::EmptyClientId);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Caller-supplied fields for a new project.
///
/// The store assigns the identifier, creation timestamp, and an empty task
/// list. Duplicate titles are allowed.
///
/// # Examples
/// ```
/// use dashboard::domain::{NewProject, ProjectStatus};
///
/// let input = NewProject::try_new(
///     "Site Revamp",
///     "Redesign marketing site",
///     "client1",
///     ProjectStatus::Active,
/// )
/// .unwrap();
/// assert_eq!(input.title(), "Site Revamp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    title: String,
    description: String,
    client_id: ClientId,
    status: ProjectStatus,
}

impl NewProject {
    /// Validate the project form fields.
    pub fn try_new(
        title: impl Into<String>,
        description: impl Into<String>,
        client_id: impl Into<String>,
        status: ProjectStatus,
    ) -> Result<Self, ProjectValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ProjectValidationError::EmptyTitle);
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ProjectValidationError::EmptyDescription);
        }
        let client_id = ClientId::new(client_id)?;

        Ok(Self {
            title,
            description,
            client_id,
            status,
        })
    }

    /// Project title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Project description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Owning client.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Initial status.
    pub fn status(&self) -> ProjectStatus {
        self.status
    }
}

/// A project in the catalog together with its ordered tasks.
///
/// ## Invariants
/// - Every task's `project_id` equals this project's `id`.
/// - Task identifiers are unique within the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    id: ProjectId,
    title: String,
    description: String,
    client_id: ClientId,
    status: ProjectStatus,
    created_at: DateTime<Utc>,
    tasks: Vec<Task>,
}

impl Project {
    pub(crate) fn create(id: ProjectId, input: NewProject, created_at: DateTime<Utc>) -> Self {
        let NewProject {
            title,
            description,
            client_id,
            status,
        } = input;
        Self {
            id,
            title,
            description,
            client_id,
            status,
            created_at,
            tasks: Vec::new(),
        }
    }

    /// Catalog identifier.
    pub fn id(&self) -> ProjectId {
        self.id
    }

    /// Project title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Project description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Owning client.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Current status.
    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by identifier.
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    pub(crate) fn task_mut(&mut self, task_id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == task_id)
    }

    pub(crate) fn push_task(&mut self, task: Task) {
        debug_assert_eq!(task.project_id(), self.id);
        self.tasks.push(task);
    }

    pub(crate) fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "desc", "client1", ProjectValidationError::EmptyTitle)]
    #[case("Title", "  ", "client1", ProjectValidationError::EmptyDescription)]
    #[case("Title", "desc", "", ProjectValidationError::EmptyClientId)]
    fn new_project_rejects_blank_fields(
        #[case] title: &str,
        #[case] description: &str,
        #[case] client_id: &str,
        #[case] expected: ProjectValidationError,
    ) {
        let err = NewProject::try_new(title, description, client_id, ProjectStatus::Active)
            .expect_err("blank field");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("active", ProjectStatus::Active)]
    #[case("completed", ProjectStatus::Completed)]
    #[case("archived", ProjectStatus::Archived)]
    fn status_parses_known_literals(#[case] raw: &str, #[case] expected: ProjectStatus) {
        assert_eq!(ProjectStatus::parse(raw), Ok(expected));
        assert_eq!(
            serde_json::to_value(expected).expect("serialise status"),
            serde_json::json!(raw)
        );
    }

    #[rstest]
    fn status_rejects_other_literals() {
        assert!(ProjectStatus::parse("Active").is_err());
        assert!(ProjectStatus::parse("deleted").is_err());
    }
}
