//! Error types for ability definition loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors during ability definition loading and registration
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to read ability file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse ability TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read ability directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ability definition in {path}: {reason}")]
    InvalidDefinition { path: PathBuf, reason: String },

    #[error("unknown script '{script}' in {path}")]
    UnknownScript { path: PathBuf, script: String },

    #[error("an ability named '{0}' is already registered")]
    DuplicateAbility(String),
}
