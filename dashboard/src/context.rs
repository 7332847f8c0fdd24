//! Composition root: the state a dashboard view layer talks to.
//!
//! [`AppContext`] is built once from [`DashboardSettings`], owns both stores
//! and the chat log, and exposes the intents a view layer issues. Role and
//! authentication gates live here; the stores themselves stay permissive.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DashboardSettings;
use crate::domain::ports::{
    FixtureLoginService, IdGenerator, LoginService, RandomIdGenerator, SessionSlot,
    SessionSlotError, TokioSleeper,
};
use crate::domain::{
    ChatLog, ChatMessage, Error, LoginCredentials, NewProject, Project, ProjectId, ProjectStatus,
    ProjectStore, Registration, SessionStore, User, UserRole,
};
use crate::example_data::{StartupSeedingError, seed_catalog_on_startup};
use crate::outbound::session_slot::{InMemorySessionSlot, JsonFileSessionSlot};

/// Errors raised while composing the context at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The session directory could not be opened.
    #[error("session slot unavailable: {0}")]
    SessionSlot(#[from] SessionSlotError),
    /// The persisted identity could not be read back.
    #[error("session restore failed: {0}")]
    Restore(#[source] Error),
    /// The example catalogue could not be loaded.
    #[error(transparent)]
    Seeding(#[from] StartupSeedingError),
}

/// Dashboard project listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectTab {
    /// The whole catalog.
    #[default]
    All,
    /// Projects the user joined.
    #[serde(rename = "my-projects")]
    Joined,
    /// Interest-based recommendations.
    Matched,
}

/// Figures shown on the dashboard header cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    /// Size of the catalog.
    pub total_projects: usize,
    /// Size of the joined subset.
    pub joined_projects: usize,
}

/// Owner of all dashboard state for one running application.
pub struct AppContext {
    session: SessionStore,
    projects: ProjectStore,
    chat: ChatLog,
}

impl AppContext {
    /// Build the context with production adapters.
    ///
    /// Uses the file-backed slot when `session_dir` is set, the fixture login
    /// service with the configured latency, random identifiers, and the
    /// system clock.
    ///
    /// # Errors
    ///
    /// See [`AppContext::with_ports`]; also fails when the session directory
    /// cannot be opened.
    pub fn from_settings(settings: &DashboardSettings) -> Result<Self, StartupError> {
        let ids: Arc<dyn IdGenerator> = Arc::new(RandomIdGenerator);
        let slot: Arc<dyn SessionSlot> = match settings.session_dir.as_deref() {
            Some(dir) => Arc::new(JsonFileSessionSlot::open(dir)?),
            None => Arc::new(InMemorySessionSlot::new()),
        };
        let login = FixtureLoginService::new(Arc::new(TokioSleeper), Arc::clone(&ids))
            .with_latency(settings.login_latency(), settings.register_latency());

        Self::with_ports(settings, Arc::new(login), slot, ids, Arc::new(DefaultClock))
    }

    /// Build the context around caller-supplied ports.
    ///
    /// Restores the persisted session when `restore_session` is set and seeds
    /// the catalog when example data is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError::Restore`] when the slot cannot be read and
    /// [`StartupError::Seeding`] when the example catalogue fails to load.
    pub fn with_ports(
        settings: &DashboardSettings,
        login_service: Arc<dyn LoginService>,
        slot: Arc<dyn SessionSlot>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StartupError> {
        let session =
            SessionStore::new(login_service, slot).with_policy(settings.supersession_policy());
        if settings.restore_session {
            session.restore().map_err(StartupError::Restore)?;
        }

        let mut projects = ProjectStore::new(Arc::clone(&ids), Arc::clone(&clock));
        seed_catalog_on_startup(settings, &mut projects, clock.utc())?;
        let chat = ChatLog::new(ids, clock);

        info!(
            authenticated = session.is_authenticated(),
            catalog = projects.projects().len(),
            policy = ?session.policy(),
            "dashboard context ready"
        );
        Ok(Self {
            session,
            projects,
            chat,
        })
    }

    /// Session store.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Project store.
    pub fn projects(&self) -> &ProjectStore {
        &self.projects
    }

    /// Chat log.
    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    /// Sign in.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::login`].
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        self.session.login(credentials).await
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::register`].
    pub async fn register(&self, registration: &Registration) -> Result<User, Error> {
        self.session.register(registration).await
    }

    /// Sign out and close any open project.
    pub fn logout(&mut self) {
        self.session.logout();
        if let Err(err) = self.projects.set_current_project(None) {
            warn!(error = %err, "failed to clear selection on logout");
        }
    }

    /// Create a project owned by the signed-in client.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when nobody is signed in, `Forbidden` for contributors,
    /// `InvalidRequest` for blank fields, and `Conflict` when no identifier
    /// could be drawn.
    pub fn create_project(
        &mut self,
        title: &str,
        description: &str,
        status: ProjectStatus,
    ) -> Result<&Project, Error> {
        let user = self.require_user("create projects")?;
        if user.role() != UserRole::Client {
            warn!(user_id = %user.id(), role = %user.role(), "project creation refused");
            return Err(Error::forbidden("only clients may create projects"));
        }
        let input = NewProject::try_new(title, description, user.id().as_ref(), status)?;
        self.projects.add_project(input)
    }

    /// Join a catalog project. Returns whether the joined subset changed.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when nobody is signed in.
    pub fn join_project(&mut self, project_id: ProjectId) -> Result<bool, Error> {
        self.require_user("join projects")?;
        Ok(self.projects.join_project(project_id))
    }

    /// Open a project's workspace, or close it with `None`.
    ///
    /// # Errors
    ///
    /// `NotFound` for an identifier outside the catalog.
    pub fn select_project(&mut self, project_id: Option<ProjectId>) -> Result<(), Error> {
        self.projects.set_current_project(project_id)
    }

    /// Project currently open, if any.
    pub fn current_project(&self) -> Option<&Project> {
        self.projects.current_project()
    }

    /// Projects listed under a dashboard tab.
    pub fn tab(&self, tab: ProjectTab) -> Vec<&Project> {
        match tab {
            ProjectTab::All => self.projects.projects().iter().collect(),
            ProjectTab::Joined => self.projects.joined_projects(),
            ProjectTab::Matched => self.projects.matched_projects(),
        }
    }

    /// Header card figures.
    pub fn counts(&self) -> DashboardCounts {
        DashboardCounts {
            total_projects: self.projects.projects().len(),
            joined_projects: self.projects.joined_projects().len(),
        }
    }

    /// Post to a project's chat as the signed-in user.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when nobody is signed in, `NotFound` for an unknown
    /// project, and `InvalidRequest` for blank content.
    pub fn send_message(
        &mut self,
        project_id: ProjectId,
        content: &str,
    ) -> Result<&ChatMessage, Error> {
        let user = self.require_user("chat")?;
        if self.projects.project(project_id).is_none() {
            return Err(Error::not_found(format!("project {project_id} not found")));
        }
        self.chat.send_message(project_id, &user, content)
    }

    /// A project's chat, oldest first.
    pub fn messages(&self, project_id: ProjectId) -> &[ChatMessage] {
        self.chat.messages(project_id)
    }

    fn require_user(&self, action: &str) -> Result<User, Error> {
        self.session
            .current_user()
            .ok_or_else(|| Error::unauthorized(format!("sign in to {action}")))
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
