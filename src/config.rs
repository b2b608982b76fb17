//! Optional YAML configuration.
//!
//! Resolution order: explicit path, `GITSCRIBE_CONFIG`, `.gitscribe.yaml` in
//! the repository root. When no file exists the built-in defaults apply.

use std::collections::BTreeMap;
use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::commit::types::CommitType;
use crate::error::ConfigError;
use crate::tables::COMMIT_TYPE_DESCRIPTIONS;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "GITSCRIBE_CONFIG";

/// File name looked up in the repository root.
pub const CONFIG_FILE_NAME: &str = ".gitscribe.yaml";

/// Formatting rules applied when generating and validating messages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MessageRules {
    pub max_subject_length: usize,
    pub max_body_line_length: usize,
    pub use_imperative_mood: bool,
    pub capitalize_subject: bool,
    pub end_subject_with_period: bool,
}

impl Default for MessageRules {
    fn default() -> Self {
        Self {
            max_subject_length: 72,
            max_body_line_length: 100,
            use_imperative_mood: true,
            capitalize_subject: false,
            end_subject_with_period: false,
        }
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Commit type name to human-readable description.
    pub commit_types: BTreeMap<String, String>,
    pub message_rules: MessageRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            commit_types: COMMIT_TYPE_DESCRIPTIONS
                .iter()
                .map(|(ty, desc)| (ty.to_string(), desc.to_string()))
                .collect(),
            message_rules: MessageRules::default(),
        }
    }
}

impl Config {
    /// Parse a YAML document. Missing sections take their defaults.
    pub fn from_yaml(yaml: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Commit types paired with their configured descriptions, in canonical
    /// order. Types missing from the file keep their built-in description.
    pub fn describe_types(&self) -> Vec<(CommitType, String)> {
        COMMIT_TYPE_DESCRIPTIONS
            .iter()
            .map(|(ty, default)| {
                let desc = self
                    .commit_types
                    .get(ty.as_str())
                    .cloned()
                    .unwrap_or_else(|| default.to_string());
                (*ty, desc)
            })
            .collect()
    }
}

/// Load configuration.
///
/// An explicit path (argument or env var) must exist and parse. The repository
/// default file is optional.
pub fn load_config(
    explicit: Option<&Path>,
    repo_root: Option<&Path>,
) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    if let Ok(path) = env::var(CONFIG_ENV_VAR)
        && !path.is_empty()
    {
        return read_config(Path::new(&path));
    }

    if let Some(root) = repo_root {
        let path = root.join(CONFIG_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(yaml) => return Config::from_yaml(&yaml, &path),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Ignoring unreadable config {}: {}", path.display(), e),
        }
    }

    debug!("No config file found, using defaults");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    debug!("Loading config from {}", path.display());
    let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: PathBuf::from(path),
        source,
    })?;
    Config::from_yaml(&yaml, path)
}
