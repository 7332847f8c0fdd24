//! Error types for the example-data crate.
//!
//! Registry parsing and project generation each get a semantic error enum
//! built with `thiserror`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// A client identifier is blank.
    #[error("blank client id at index {index}")]
    BlankClientId {
        /// Index of the blank entry in the array.
        index: usize,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors that can occur during project generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Failed to generate a valid title after maximum retries.
    #[error("failed to generate valid title after {max_attempts} attempts")]
    TitleGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// The registry contains no client identifiers to own projects.
    #[error("registry contains no client ids for project ownership")]
    NoClientIds,
}
