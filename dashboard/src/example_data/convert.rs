//! Conversion from generated seeds into catalog entities.

use chrono::{DateTime, Duration, Utc};
use example_data::{ExampleProjectSeed, ExampleTaskSeed, ProjectStatusSeed, TaskStatusSeed};

use crate::domain::{
    Budget, NewProject, NewTask, Project, ProjectId, ProjectStatus, ProjectValidationError, Task,
    TaskId, TaskStatus, TaskValidationError,
};

/// Errors raised when a generated seed does not satisfy catalog rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeedConversionError {
    /// The project fields were rejected.
    #[error("invalid seeded project: {0}")]
    Project(#[from] ProjectValidationError),
    /// A task's fields were rejected.
    #[error("invalid seeded task: {0}")]
    Task(#[from] TaskValidationError),
}

/// Build a catalog project from a generated seed.
///
/// `now` anchors the seed's relative age; tasks share the project's creation
/// time.
///
/// # Errors
///
/// Returns [`SeedConversionError`] when the seed's text fields are blank.
pub fn project_from_seed(
    seed: &ExampleProjectSeed,
    now: DateTime<Utc>,
) -> Result<Project, SeedConversionError> {
    let created_at = now - Duration::days(i64::from(seed.age_days));
    let input = NewProject::try_new(
        seed.title.clone(),
        seed.description.clone(),
        seed.client_id.clone(),
        project_status(seed.status),
    )?;
    let id = ProjectId::from_uuid(seed.id);
    let mut project = Project::create(id, input, created_at);

    for task in &seed.tasks {
        project.push_task(task_from_seed(id, task, created_at)?);
    }
    Ok(project)
}

fn task_from_seed(
    project_id: ProjectId,
    seed: &ExampleTaskSeed,
    created_at: DateTime<Utc>,
) -> Result<Task, SeedConversionError> {
    let input = NewTask::try_new(
        seed.title.clone(),
        seed.description.clone(),
        Budget::new(seed.budget),
        task_status(seed.status),
    )?;
    Ok(Task::create(
        TaskId::from_uuid(seed.id),
        project_id,
        input,
        created_at,
    ))
}

const fn project_status(seed: ProjectStatusSeed) -> ProjectStatus {
    match seed {
        ProjectStatusSeed::Active => ProjectStatus::Active,
        ProjectStatusSeed::Completed => ProjectStatus::Completed,
        ProjectStatusSeed::Archived => ProjectStatus::Archived,
    }
}

const fn task_status(seed: TaskStatusSeed) -> TaskStatus {
    match seed {
        TaskStatusSeed::Open => TaskStatus::Open,
        TaskStatusSeed::InProgress => TaskStatus::InProgress,
        TaskStatusSeed::Completed => TaskStatus::Completed,
    }
}
