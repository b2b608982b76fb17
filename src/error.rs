//! Error types for gitscribe modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from invoking the git executable.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found. Install git and make sure it is on your PATH")]
    NotInstalled,

    #[error("Failed to spawn git process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Git command failed: git {command}\nError: {stderr}")]
    NonZeroExit { command: String, stderr: String },
}

/// Errors from loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
