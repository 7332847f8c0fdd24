//! Startup seeding orchestration.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use chrono::{DateTime, Utc};
use example_data::{GenerationError, RegistryError, SeedRegistry, generate_example_projects};
use thiserror::Error;
use tracing::info;

use super::convert::{SeedConversionError, project_from_seed};
use crate::config::DashboardSettings;
use crate::domain::ProjectStore;

/// Errors returned while seeding the catalog at startup.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        /// Path to the registry file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry parsing failed.
    #[error("registry parse error: {0}")]
    Registry(#[from] RegistryError),
    /// Project generation failed.
    #[error("example project generation error: {0}")]
    Generation(#[from] GenerationError),
    /// A generated project broke catalog rules.
    #[error("example project conversion error: {0}")]
    Conversion(#[from] SeedConversionError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
}

/// Populate the catalog from the example registry when enabled.
///
/// Returns the number of projects added, or `None` when seeding is disabled.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use dashboard::config::DashboardSettings;
/// use dashboard::domain::ProjectStore;
/// use dashboard::domain::ports::RandomIdGenerator;
/// use dashboard::example_data::seed_catalog_on_startup;
/// use mockable::{Clock, DefaultClock};
///
/// let mut store = ProjectStore::new(Arc::new(RandomIdGenerator), Arc::new(DefaultClock));
/// let settings = DashboardSettings::default();
/// let added = seed_catalog_on_startup(&settings, &mut store, DefaultClock.utc())
///     .expect("disabled seeding never fails");
/// assert!(added.is_none());
/// ```
pub fn seed_catalog_on_startup(
    settings: &DashboardSettings,
    store: &mut ProjectStore,
    now: DateTime<Utc>,
) -> Result<Option<usize>, StartupSeedingError> {
    if !settings.example_data_enabled {
        info!(reason = "disabled", "example catalogue seeding skipped");
        return Ok(None);
    }

    let seed_name = settings.example_data_seed().trim();
    if seed_name.is_empty() {
        return Err(StartupSeedingError::EmptySeedName);
    }

    let registry_path = settings.example_data_registry();
    let registry = load_registry(&registry_path)?;
    let seed_def = registry.find_seed(seed_name)?;
    let projects = generate_example_projects(&registry, seed_def)?
        .iter()
        .map(|seed| project_from_seed(seed, now))
        .collect::<Result<Vec<_>, _>>()?;

    let added = store.seed(projects);
    info!(
        seed_key = seed_name,
        registry = %registry_path.display(),
        project_count = added,
        "example catalogue seeded"
    );
    Ok(Some(added))
}

fn load_registry(path: &Path) -> Result<SeedRegistry, StartupSeedingError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| StartupSeedingError::RegistryRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "registry path must be a file",
            ),
        })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|source| {
        StartupSeedingError::RegistryRead {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(|source| {
        StartupSeedingError::RegistryRead {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(SeedRegistry::from_json(&contents)?)
}
