//! Dashboard configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::SupersessionPolicy;
use crate::domain::ports::{DEFAULT_LOGIN_LATENCY, DEFAULT_REGISTER_LATENCY};

const DEFAULT_SEED_NAME: &str = "site-revamp";

fn default_registry_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("example-data")
        .join("seeds.json")
}

/// Configuration values for composing the dashboard state.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct DashboardSettings {
    /// Simulated login latency in milliseconds.
    pub login_latency_ms: Option<u64>,
    /// Simulated registration latency in milliseconds.
    pub register_latency_ms: Option<u64>,
    /// Read a persisted identity back at startup.
    #[ortho_config(default = false)]
    pub restore_session: bool,
    /// Discard login resolutions overtaken by a newer request.
    #[ortho_config(default = false)]
    pub supersede_stale_logins: bool,
    /// Directory for the file-backed session slot; in-memory when absent.
    pub session_dir: Option<PathBuf>,
    /// Seed the catalog from the example data registry on startup.
    #[ortho_config(default = false)]
    pub example_data_enabled: bool,
    /// Seed name to load from the registry.
    pub example_data_seed: Option<String>,
    /// Optional registry path override.
    pub example_data_registry: Option<PathBuf>,
}

impl DashboardSettings {
    /// Login latency, falling back to [`DEFAULT_LOGIN_LATENCY`].
    pub fn login_latency(&self) -> Duration {
        self.login_latency_ms
            .map_or(DEFAULT_LOGIN_LATENCY, Duration::from_millis)
    }

    /// Registration latency, falling back to [`DEFAULT_REGISTER_LATENCY`].
    pub fn register_latency(&self) -> Duration {
        self.register_latency_ms
            .map_or(DEFAULT_REGISTER_LATENCY, Duration::from_millis)
    }

    /// Sequencing policy for overlapping logins.
    pub fn supersession_policy(&self) -> SupersessionPolicy {
        if self.supersede_stale_logins {
            SupersessionPolicy::LatestRequestWins
        } else {
            SupersessionPolicy::LastCompletionWins
        }
    }

    /// Return the configured seed name, falling back to the default.
    pub fn example_data_seed(&self) -> &str {
        self.example_data_seed.as_deref().unwrap_or(DEFAULT_SEED_NAME)
    }

    /// Return the configured registry path, falling back to the bundled one.
    pub fn example_data_registry(&self) -> PathBuf {
        self.example_data_registry
            .clone()
            .unwrap_or_else(default_registry_path)
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            login_latency_ms: None,
            register_latency_ms: None,
            restore_session: false,
            supersede_stale_logins: false,
            session_dir: None,
            example_data_enabled: false,
            example_data_seed: None,
            example_data_registry: None,
        }
    }
}
