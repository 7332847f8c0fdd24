//! Generated project seed types.
//!
//! These mirror the dashboard's project and task shapes without depending on
//! them, and are converted into domain types at the point of use.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a generated project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatusSeed {
    /// Accepting work.
    #[default]
    Active,
    /// Delivered.
    Completed,
    /// Closed without further work.
    Archived,
}

/// Progress state of a generated task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatusSeed {
    /// Waiting for a contributor.
    #[default]
    Open,
    /// Being worked on.
    InProgress,
    /// Done.
    Completed,
}

/// A generated task belonging to an [`ExampleProjectSeed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleTaskSeed {
    /// Unique identifier for the task.
    pub id: Uuid,
    /// Short task title.
    pub title: String,
    /// What needs doing.
    pub description: String,
    /// Budget in whole currency units.
    pub budget: u64,
    /// Progress state.
    pub status: TaskStatusSeed,
}

/// A generated example project record.
///
/// # Example
///
/// ```
/// use example_data::{ExampleProjectSeed, ProjectStatusSeed};
/// use uuid::Uuid;
///
/// let project = ExampleProjectSeed {
///     id: Uuid::new_v4(),
///     title: "Site Revamp".to_owned(),
///     description: "Redesign marketing site".to_owned(),
///     client_id: "client1".to_owned(),
///     status: ProjectStatusSeed::Active,
///     age_days: 3,
///     tasks: vec![],
/// };
///
/// assert_eq!(project.title, "Site Revamp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleProjectSeed {
    /// Unique identifier for the project.
    pub id: Uuid,
    /// Project title.
    pub title: String,
    /// Project description.
    pub description: String,
    /// Owning client identifier, drawn from the registry.
    pub client_id: String,
    /// Lifecycle state.
    pub status: ProjectStatusSeed,
    /// How many days before seeding the project was created.
    pub age_days: u32,
    /// Tasks in creation order.
    pub tasks: Vec<ExampleTaskSeed>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_serialize_kebab_case() {
        let project = serde_json::to_string(&ProjectStatusSeed::Archived).expect("serialize");
        let task = serde_json::to_string(&TaskStatusSeed::InProgress).expect("serialize");
        assert_eq!(project, "\"archived\"");
        assert_eq!(task, "\"in-progress\"");
    }

    #[test]
    fn example_project_seed_serializes_to_camel_case() {
        let project = ExampleProjectSeed {
            id: Uuid::nil(),
            title: "Test".to_owned(),
            description: "Test project".to_owned(),
            client_id: "client1".to_owned(),
            status: ProjectStatusSeed::Active,
            age_days: 0,
            tasks: vec![],
        };
        let json = serde_json::to_string(&project).expect("serialize");
        assert!(json.contains("clientId"));
        assert!(json.contains("ageDays"));
    }
}
