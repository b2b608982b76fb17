//! Heuristic conventional commit messages from staged changes.

pub mod analysis;
pub mod message;
pub mod types;
pub mod validate;

pub use analysis::{
    Analysis, DiffAnalyzer, DiffStats, FileStatus, FileTypeCounts, StatusLists, determine_scope,
};
pub use message::{CommitMessage, MessageGenerator, clean_filename};
pub use types::{ChangeType, CommitType};
pub use validate::{ValidationReport, validate_message};
