//! gitscribe - A CLI tool that writes conventional commit messages from staged changes.
//!
//! # Overview
//!
//! gitscribe reads the staged changes of a git repository, classifies them
//! with regex heuristics (feature, fix, docs, ...), infers a scope from the
//! touched files, and templates a `type(scope): description` subject with an
//! optional body. It can also validate existing messages.

pub mod commit;
pub mod config;
pub mod error;
pub mod format;
pub mod git;
pub mod tables;

// Re-export commonly used types
pub use commit::{
    Analysis, ChangeType, CommitMessage, CommitType, DiffAnalyzer, MessageGenerator,
    ValidationReport, validate_message,
};
pub use config::{Config, MessageRules, load_config};
pub use error::{ConfigError, GitError};
pub use git::{GitRunner, SystemGit};
pub use tables::Tables;
