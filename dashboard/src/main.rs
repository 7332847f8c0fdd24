//! Dashboard state bootstrap.
//!
//! Loads [`DashboardSettings`], composes the [`AppContext`], and reports what
//! was restored and seeded. Configure through `DASHBOARD_*` environment
//! variables or command-line flags; set `RUST_LOG` to choose verbosity.

use std::env;
use std::ffi::OsString;

use dashboard::{AppContext, DashboardSettings, ProjectTab};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings(env::args_os())?;
    let context = AppContext::from_settings(&settings).map_err(std::io::Error::other)?;

    let counts = context.counts();
    let user = context.session().current_user();
    info!(
        signed_in = user.is_some(),
        user_id = ?user.as_ref().map(|u| u.id().to_string()),
        total_projects = counts.total_projects,
        joined_projects = counts.joined_projects,
        "dashboard state ready"
    );
    for project in context.tab(ProjectTab::All) {
        info!(
            project_id = %project.id(),
            title = project.title(),
            status = %project.status(),
            tasks = project.tasks().len(),
            "catalog entry"
        );
    }
    Ok(())
}

fn load_settings(
    args: impl IntoIterator<Item = OsString>,
) -> std::io::Result<DashboardSettings> {
    DashboardSettings::load_from_iter(args)
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))
}
