//! Git operations via the system git executable.

pub mod command;
pub mod repo;

#[cfg(test)]
pub(crate) mod testing;

pub use command::{GitRunner, SystemGit, check_git_installed, commit_with_message, run_or_default};
pub use repo::{
    CommitSummary, RepoInfo, current_branch, git_root, is_git_repo, last_commits, remotes,
};
