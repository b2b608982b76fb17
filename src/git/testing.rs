//! Scripted [`GitRunner`] for unit tests.

use std::collections::HashMap;

use super::command::GitRunner;
use crate::error::GitError;

/// Returns canned stdout keyed by the space-joined argument list.
/// Unscripted commands fail with a non-zero exit.
#[derive(Debug, Default)]
pub struct ScriptedGit {
    outputs: HashMap<String, String>,
}

impl ScriptedGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, command: &str, stdout: &str) -> Self {
        self.outputs.insert(command.to_string(), stdout.to_string());
        self
    }
}

impl GitRunner for ScriptedGit {
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let command = args.join(" ");
        self.outputs
            .get(&command)
            .cloned()
            .ok_or_else(|| GitError::NonZeroExit {
                command,
                stderr: "fatal: not a git repository".to_string(),
            })
    }
}
