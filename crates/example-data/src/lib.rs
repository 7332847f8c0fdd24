//! Deterministic example project catalogue generation for demonstration
//! purposes.
//!
//! This crate generates believable, reproducible projects (with their tasks)
//! from a JSON seed registry. It is deliberately independent of the
//! dashboard's domain types so either side can change without a dependency
//! cycle; the dashboard converts the seeds at the point of use.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading seed registries from JSON files
//! - Deterministic project generation using named seeds
//! - Title validation matching the dashboard's project form rules
//! - Owning client selection from the registry's client identifiers
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_example_projects};
//!
//! let json = r#"{
//!     "version": 1,
//!     "clientIds": ["client1"],
//!     "seeds": [{"name": "test-seed", "seed": 42, "projectCount": 3}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let projects = generate_example_projects(&registry, seed_def).expect("generation succeeds");
//!
//! assert_eq!(projects.len(), 3);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_example_projects;
pub use registry::{SeedDefinition, SeedRegistry};
pub use seed::{ExampleProjectSeed, ExampleTaskSeed, ProjectStatusSeed, TaskStatusSeed};
pub use validation::{TITLE_MAX, TITLE_MIN, is_valid_title};
