//! Startup wiring for the example project catalogue.

mod convert;
mod startup;

pub use convert::{SeedConversionError, project_from_seed};
pub use startup::{StartupSeedingError, seed_catalog_on_startup};
