//! Project store: the catalog and the per-user views over it.
//!
//! The catalog owns every [`Project`]. The joined subset and the selected
//! project are held as identifiers and resolved against the catalog on read,
//! so they can never point at a project the catalog does not contain and they
//! observe later status and task changes.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::IdGenerator;
use crate::domain::{
    Error, NewProject, NewTask, Project, ProjectId, ProjectStatus, Task, TaskId, TaskStatus, UserId,
};

/// Identifier draws attempted before giving up on a collision.
pub const MAX_ID_ATTEMPTS: usize = 3;

/// Owner of the project catalog, the joined subset, and the selection.
pub struct ProjectStore {
    catalog: Vec<Project>,
    joined: Vec<ProjectId>,
    selected: Option<ProjectId>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl ProjectStore {
    /// Create a store with an empty catalog.
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog: Vec::new(),
            joined: Vec::new(),
            selected: None,
            ids,
            clock,
        }
    }

    /// Append pre-built projects to the catalog in the given order.
    ///
    /// Entries whose identifier is already present are skipped. Returns the
    /// number of projects added.
    pub fn seed(&mut self, projects: impl IntoIterator<Item = Project>) -> usize {
        let mut added = 0;
        for project in projects {
            if self.contains(project.id()) {
                warn!(project_id = %project.id(), "skipping duplicate seeded project");
                continue;
            }
            self.catalog.push(project);
            added += 1;
        }
        info!(added, catalog = self.catalog.len(), "catalog seeded");
        added
    }

    /// Create a project and put it at the front of the catalog.
    ///
    /// The store assigns a fresh identifier and creation timestamp and starts
    /// the project with no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::Conflict`](crate::domain::ErrorCode::Conflict) if
    /// [`MAX_ID_ATTEMPTS`] identifier draws all collide with the catalog.
    pub fn add_project(&mut self, input: NewProject) -> Result<&Project, Error> {
        let id = self.fresh_id(|store, candidate| store.contains(ProjectId::from_uuid(candidate)))?;
        let id = ProjectId::from_uuid(id);
        let project = Project::create(id, input, self.clock.utc());

        info!(project_id = %id, title = project.title(), "project created");
        self.catalog.insert(0, project);
        self.catalog
            .first()
            .ok_or_else(|| Error::internal("catalog empty after insert"))
    }

    /// Add a catalog project to the joined subset.
    ///
    /// Unknown identifiers and repeated joins are silent no-ops. Returns
    /// whether the subset changed.
    pub fn join_project(&mut self, project_id: ProjectId) -> bool {
        if !self.contains(project_id) {
            debug!(%project_id, "join ignored: unknown project");
            return false;
        }
        if self.joined.contains(&project_id) {
            debug!(%project_id, "join ignored: already joined");
            return false;
        }
        self.joined.insert(0, project_id);
        info!(%project_id, joined = self.joined.len(), "project joined");
        true
    }

    /// Replace the selected project; `None` deselects.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound) for
    /// an identifier outside the catalog; the selection is left unchanged.
    pub fn set_current_project(&mut self, project_id: Option<ProjectId>) -> Result<(), Error> {
        if let Some(id) = project_id {
            self.require(id)?;
        }
        debug!(previous = ?self.selected, next = ?project_id, "selection changed");
        self.selected = project_id;
        Ok(())
    }

    /// Append a task to a project.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown project and `Conflict` when no free
    /// task identifier could be drawn.
    pub fn add_task(&mut self, project_id: ProjectId, input: NewTask) -> Result<&Task, Error> {
        self.require(project_id)?;
        let id = self.fresh_id(|store, candidate| {
            store
                .project(project_id)
                .is_some_and(|project| project.task(TaskId::from_uuid(candidate)).is_some())
        })?;
        let task_id = TaskId::from_uuid(id);
        let task = Task::create(task_id, project_id, input, self.clock.utc());

        let project = self.require_mut(project_id)?;
        project.push_task(task);
        info!(%project_id, %task_id, "task added");
        project
            .task(task_id)
            .ok_or_else(|| Error::internal("task missing after insert"))
    }

    /// Move a task to a new status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown project or task.
    pub fn set_task_status(
        &mut self,
        project_id: ProjectId,
        task_id: TaskId,
        status: TaskStatus,
    ) -> Result<(), Error> {
        let task = self.require_task_mut(project_id, task_id)?;
        task.set_status(status);
        info!(%project_id, %task_id, %status, "task status changed");
        Ok(())
    }

    /// Assign a task to a contributor, or unassign it with `None`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown project or task.
    pub fn assign_task(
        &mut self,
        project_id: ProjectId,
        task_id: TaskId,
        assignee: Option<UserId>,
    ) -> Result<(), Error> {
        let task = self.require_task_mut(project_id, task_id)?;
        debug!(%project_id, %task_id, assignee = ?assignee, "task assignment changed");
        task.assign(assignee);
        Ok(())
    }

    /// Move a project to a new status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown project.
    pub fn set_project_status(
        &mut self,
        project_id: ProjectId,
        status: ProjectStatus,
    ) -> Result<(), Error> {
        self.require_mut(project_id)?.set_status(status);
        info!(%project_id, %status, "project status changed");
        Ok(())
    }

    /// Full catalog, most recently created first.
    pub fn projects(&self) -> &[Project] {
        &self.catalog
    }

    /// Look up a catalog project.
    pub fn project(&self, project_id: ProjectId) -> Option<&Project> {
        self.catalog.iter().find(|project| project.id() == project_id)
    }

    /// Projects the current user joined, most recently joined first.
    pub fn joined_projects(&self) -> Vec<&Project> {
        self.joined
            .iter()
            .filter_map(|id| self.project(*id))
            .collect()
    }

    /// Whether `project_id` is in the joined subset.
    pub fn is_joined(&self, project_id: ProjectId) -> bool {
        self.joined.contains(&project_id)
    }

    /// Interest-based recommendations. No match criterion exists yet, so this
    /// is always empty.
    pub fn matched_projects(&self) -> Vec<&Project> {
        Vec::new()
    }

    /// Project shown by the detail view, if any.
    pub fn current_project(&self) -> Option<&Project> {
        self.selected.and_then(|id| self.project(id))
    }

    fn contains(&self, project_id: ProjectId) -> bool {
        self.project(project_id).is_some()
    }

    fn require(&self, project_id: ProjectId) -> Result<&Project, Error> {
        self.project(project_id)
            .ok_or_else(|| Error::not_found(format!("project {project_id} not found")))
    }

    fn require_mut(&mut self, project_id: ProjectId) -> Result<&mut Project, Error> {
        self.catalog
            .iter_mut()
            .find(|project| project.id() == project_id)
            .ok_or_else(|| Error::not_found(format!("project {project_id} not found")))
    }

    fn require_task_mut(
        &mut self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> Result<&mut Task, Error> {
        self.require_mut(project_id)?
            .task_mut(task_id)
            .ok_or_else(|| {
                Error::not_found(format!("task {task_id} not found in project {project_id}"))
            })
    }

    fn fresh_id(
        &self,
        taken: impl Fn(&Self, uuid::Uuid) -> bool,
    ) -> Result<uuid::Uuid, Error> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            if !taken(self, candidate) {
                return Ok(candidate);
            }
            warn!(attempt, %candidate, "identifier collision; drawing again");
        }
        Err(Error::conflict(format!(
            "no free identifier after {MAX_ID_ATTEMPTS} attempts"
        )))
    }
}

#[cfg(test)]
#[path = "project_store_tests.rs"]
mod tests;
