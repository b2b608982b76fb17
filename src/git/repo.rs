//! Repository information queries.
//!
//! Everything here except [`git_root`] degrades to a default value when git
//! fails, so callers can print whatever information is available.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use tracing::warn;

use super::command::{GitRunner, run_or_default};
use crate::error::GitError;

/// Branch name reported when the current branch cannot be determined.
pub const FALLBACK_BRANCH: &str = "main";

/// Indicator files used to guess the project type, checked in order.
const PROJECT_INDICATORS: &[(&str, &[&str])] = &[
    ("python", &["setup.py", "pyproject.toml", "requirements.txt", "Pipfile"]),
    ("node", &["package.json", "yarn.lock", "npm-shrinkwrap.json"]),
    ("go", &["go.mod", "go.sum"]),
    ("rust", &["Cargo.toml", "Cargo.lock"]),
    ("java", &["pom.xml", "build.gradle", "build.gradle.kts"]),
    ("php", &["composer.json", "composer.lock"]),
    ("ruby", &["Gemfile", "Gemfile.lock", ".gemspec"]),
    ("docker", &["Dockerfile", "docker-compose.yml", "docker-compose.yaml"]),
];

/// One line of `git log` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitSummary {
    pub hash: String,
    pub subject: String,
    pub author: String,
    /// Relative date as printed by git, e.g. "3 days ago".
    pub date: String,
}

/// Snapshot of repository information for display.
#[derive(Debug, Clone, Serialize)]
pub struct RepoInfo {
    pub root: PathBuf,
    pub branch: String,
    pub remotes: BTreeMap<String, String>,
    pub project_type: Option<&'static str>,
    pub recent_commits: Vec<CommitSummary>,
    pub ignore_patterns: Vec<String>,
}

impl RepoInfo {
    /// Gather repository information. Fails only if the root cannot be resolved.
    pub fn collect<R: GitRunner + ?Sized>(
        runner: &R,
        commit_count: usize,
    ) -> Result<Self, GitError> {
        let root = git_root(runner)?;
        Ok(Self {
            branch: current_branch(runner),
            remotes: remotes(runner),
            project_type: detect_project_type(runner),
            recent_commits: last_commits(runner, commit_count),
            ignore_patterns: ignore_patterns(runner),
            root,
        })
    }
}

/// Get the root directory of the repository.
pub fn git_root<R: GitRunner + ?Sized>(runner: &R) -> Result<PathBuf, GitError> {
    let stdout = runner.run(&["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(stdout.trim()))
}

/// Check whether the runner's working directory is inside a repository.
pub fn is_git_repo<R: GitRunner + ?Sized>(runner: &R) -> bool {
    runner.run(&["rev-parse", "--git-dir"]).is_ok()
}

/// Get the current branch name, falling back to [`FALLBACK_BRANCH`].
pub fn current_branch<R: GitRunner + ?Sized>(runner: &R) -> String {
    match runner.run(&["branch", "--show-current"]) {
        Ok(stdout) => stdout.trim().to_string(),
        Err(e) => {
            warn!("Could not determine current branch: {e}");
            FALLBACK_BRANCH.to_string()
        }
    }
}

/// Map of remote name to URL. Later lines for the same remote win.
pub fn remotes<R: GitRunner + ?Sized>(runner: &R) -> BTreeMap<String, String> {
    parse_remotes(&run_or_default(runner, &["remote", "-v"], ""))
}

fn parse_remotes(stdout: &str) -> BTreeMap<String, String> {
    let mut remotes = BTreeMap::new();
    for line in stdout.lines() {
        let mut parts = line.split_whitespace();
        if let (Some(name), Some(url)) = (parts.next(), parts.next()) {
            remotes.insert(name.to_string(), url.to_string());
        }
    }
    remotes
}

/// The most recent `count` commits on the current branch.
pub fn last_commits<R: GitRunner + ?Sized>(runner: &R, count: usize) -> Vec<CommitSummary> {
    let limit = format!("-{count}");
    let stdout = run_or_default(runner, &["log", &limit, "--pretty=format:%h|%s|%an|%ar"], "");
    parse_log(&stdout)
}

fn parse_log(stdout: &str) -> Vec<CommitSummary> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut parts = line.splitn(4, '|');
            Some(CommitSummary {
                hash: parts.next()?.to_string(),
                subject: parts.next()?.to_string(),
                author: parts.next()?.to_string(),
                date: parts.next()?.to_string(),
            })
        })
        .collect()
}

/// Guess the project type from indicator files at the repository root.
pub fn detect_project_type<R: GitRunner + ?Sized>(runner: &R) -> Option<&'static str> {
    let root = git_root(runner).ok()?;
    PROJECT_INDICATORS
        .iter()
        .find(|(_, indicators)| indicators.iter().any(|f| root.join(f).exists()))
        .map(|(project_type, _)| *project_type)
}

/// Non-blank, non-comment lines of the root `.gitignore`.
pub fn ignore_patterns<R: GitRunner + ?Sized>(runner: &R) -> Vec<String> {
    let Ok(root) = git_root(runner) else {
        return Vec::new();
    };

    match std::fs::read_to_string(root.join(".gitignore")) {
        Ok(content) => content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::ScriptedGit;

    #[test]
    fn test_parse_remotes_fetch_and_push() {
        let out = "origin\tgit@github.com:me/repo.git (fetch)\n\
                   origin\tgit@github.com:me/repo.git (push)\n\
                   upstream\thttps://example.com/up.git (fetch)\n";
        let remotes = parse_remotes(out);
        assert_eq!(remotes.len(), 2);
        assert_eq!(remotes["origin"], "git@github.com:me/repo.git");
        assert_eq!(remotes["upstream"], "https://example.com/up.git");
    }

    #[test]
    fn test_parse_log_skips_short_lines() {
        let commits = parse_log("abc1234|feat: add x|Jane Doe|2 days ago\nbad line\n");
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].hash, "abc1234");
        assert_eq!(commits[0].subject, "feat: add x");
        assert_eq!(commits[0].author, "Jane Doe");
        assert_eq!(commits[0].date, "2 days ago");
    }

    #[test]
    fn test_current_branch_falls_back_to_main() {
        let git = ScriptedGit::new();
        assert_eq!(current_branch(&git), FALLBACK_BRANCH);
    }

    #[test]
    fn test_current_branch_trims_output() {
        let git = ScriptedGit::new().with("branch --show-current", "feature/x\n");
        assert_eq!(current_branch(&git), "feature/x");
    }

    #[test]
    fn test_failures_degrade_to_empty() {
        let git = ScriptedGit::new();
        assert!(!is_git_repo(&git));
        assert!(remotes(&git).is_empty());
        assert!(last_commits(&git, 5).is_empty());
        assert!(ignore_patterns(&git).is_empty());
        assert_eq!(detect_project_type(&git), None);
        assert!(git_root(&git).is_err());
    }

    #[test]
    fn test_detect_project_type_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "[package]\n").unwrap();
        std::fs::write(dir.path().join("Dockerfile"), "FROM scratch\n").unwrap();
        let root = format!("{}\n", dir.path().display());
        let git = ScriptedGit::new().with("rev-parse --show-toplevel", &root);
        assert_eq!(detect_project_type(&git), Some("rust"));
    }

    #[test]
    fn test_ignore_patterns_skip_comments_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".gitignore"),
            "# build output\n/target\n\n*.log\n",
        )
        .unwrap();
        let root = dir.path().display().to_string();
        let git = ScriptedGit::new().with("rev-parse --show-toplevel", &root);
        assert_eq!(ignore_patterns(&git), vec!["/target", "*.log"]);
    }
}
