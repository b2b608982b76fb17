//! Invoking the system `git` binary.
//!
//! All operations shell out through [`GitRunner`], inheriting the user's git
//! config. Analysis code depends on the trait so it can be driven by scripted
//! output in tests.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::error::GitError;

/// Trait for running git commands and capturing stdout.
pub trait GitRunner {
    /// Run `git <args>` and return stdout, or an error on spawn failure or
    /// non-zero exit.
    fn run(&self, args: &[&str]) -> Result<String, GitError>;
}

/// Runner that calls the real git executable.
#[derive(Debug, Clone, Default)]
pub struct SystemGit {
    workdir: Option<PathBuf>,
}

impl SystemGit {
    /// Run git in the current working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git with `dir` as its working directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(dir.into()),
        }
    }

    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let command = args.join(" ");
        debug!("Running: git {}", command);

        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GitError::NotInstalled
            } else {
                GitError::SpawnFailed(e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::NonZeroExit { command, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Run a git command, falling back to `default` when it fails.
///
/// Used by accessors that treat any failure as "no data".
pub fn run_or_default<R: GitRunner + ?Sized>(runner: &R, args: &[&str], default: &str) -> String {
    match runner.run(args) {
        Ok(stdout) => stdout,
        Err(e) => {
            warn!("{e}");
            default.to_string()
        }
    }
}

/// Check if git is installed and accessible.
pub fn check_git_installed() -> Result<(), GitError> {
    if which::which("git").is_err() {
        return Err(GitError::NotInstalled);
    }
    Ok(())
}

/// Create a commit from the staged changes with the given message.
pub fn commit_with_message<R: GitRunner + ?Sized>(
    runner: &R,
    message: &str,
) -> Result<(), GitError> {
    runner.run(&["commit", "-m", message])?;
    Ok(())
}
