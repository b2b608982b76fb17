//! Heuristic analysis of staged changes.
//!
//! Turns git status, numstat and diff output into an [`Analysis`]: which files
//! changed, what kind of change it looks like, what scope it touches and which
//! functions or classes it defines.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use tracing::debug;

use crate::commit::types::ChangeType;
use crate::git::command::{GitRunner, run_or_default};
use crate::tables::Tables;

/// Maximum number of entities kept in an [`Analysis`].
pub const MAX_ENTITIES: usize = 5;

const STAGED_DIFF_ARGS: &[&str] = &["diff", "--cached", "--no-color", "--no-ext-diff"];

/// Status of a changed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl FileStatus {
    /// Classify a two-character porcelain status code.
    ///
    /// Letters are checked in the order A, M, D, R and the first present wins,
    /// so a file lands in exactly one bucket. Codes with none of them
    /// (untracked, copied, unmerged) are not classified.
    pub fn from_porcelain(code: &str) -> Option<Self> {
        if code.contains('A') {
            Some(Self::Added)
        } else if code.contains('M') {
            Some(Self::Modified)
        } else if code.contains('D') {
            Some(Self::Deleted)
        } else if code.contains('R') {
            Some(Self::Renamed)
        } else {
            None
        }
    }
}

/// Changed paths grouped by status, each list in git's output order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusLists {
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
    pub renamed: Vec<String>,
}

impl StatusLists {
    pub fn push(&mut self, status: FileStatus, path: String) {
        match status {
            FileStatus::Added => self.added.push(path),
            FileStatus::Modified => self.modified.push(path),
            FileStatus::Deleted => self.deleted.push(path),
            FileStatus::Renamed => self.renamed.push(path),
        }
    }

    /// All paths: added, modified, deleted, then renamed.
    pub fn all_files(&self) -> Vec<String> {
        self.added
            .iter()
            .chain(&self.modified)
            .chain(&self.deleted)
            .chain(&self.renamed)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.modified.len() + self.deleted.len() + self.renamed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Line counts from `git diff --cached --numstat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
}

/// File counts per category, in the order categories were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTypeCounts(Vec<(String, usize)>);

impl FileTypeCounts {
    pub fn increment(&mut self, category: &str) {
        match self.0.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => self.0.push((category.to_string(), 1)),
        }
    }

    pub fn get(&self, category: &str) -> usize {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map_or(0, |(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    /// The category with the highest count; the earliest wins ties.
    pub fn most_common(&self) -> Option<&str> {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.0 {
            if best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(name, _)| name.as_str())
    }
}

impl<'a> FromIterator<(&'a str, usize)> for FileTypeCounts {
    fn from_iter<I: IntoIterator<Item = (&'a str, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

impl Serialize for FileTypeCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

/// Everything known about the staged changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub status: StatusLists,
    pub stats: DiffStats,
    pub file_types: FileTypeCounts,
    pub change_type: ChangeType,
    pub scope: Option<String>,
    pub entities: Vec<String>,
    pub diff_content: String,
}

/// Collects staged changes through a [`GitRunner`] and classifies them.
pub struct DiffAnalyzer<'a, R: GitRunner> {
    tables: &'a Tables,
    runner: R,
}

impl<'a, R: GitRunner> DiffAnalyzer<'a, R> {
    pub fn new(tables: &'a Tables, runner: R) -> Self {
        Self { tables, runner }
    }

    /// Perform the full analysis of the staged changes.
    ///
    /// Never fails: a git command that fails contributes an empty result.
    pub fn analyze_changes(&self) -> Analysis {
        let status = self.get_status();
        let stats = self.get_diff_stats();
        let diff_content = self.get_staged_diff();

        let all_files = status.all_files();
        let file_types = self.classify_file_types(&all_files);
        let change_type = self.detect_change_type(&diff_content);
        let mut entities = self.extract_entities(&diff_content);
        entities.truncate(MAX_ENTITIES);
        let scope = determine_scope(&file_types, &all_files);

        debug!(
            "Analysis: {} files, +{} -{}, type={}, scope={:?}, entities={:?}",
            all_files.len(),
            stats.insertions,
            stats.deletions,
            change_type,
            scope,
            entities
        );

        Analysis {
            status,
            stats,
            file_types,
            change_type,
            scope,
            entities,
            diff_content,
        }
    }

    /// Changed files from `git status --porcelain -z`.
    pub fn get_status(&self) -> StatusLists {
        parse_porcelain(&run_or_default(&self.runner, &["status", "--porcelain", "-z"], ""))
    }

    /// Line counts of the staged changes.
    pub fn get_diff_stats(&self) -> DiffStats {
        parse_numstat(&run_or_default(
            &self.runner,
            &["diff", "--cached", "--numstat"],
            "",
        ))
    }

    /// The staged diff text, uncoloured and without external diff drivers
    /// whatever the user's git config says.
    pub fn get_staged_diff(&self) -> String {
        run_or_default(&self.runner, STAGED_DIFF_ARGS, "")
    }

    /// Count files per extension category. Unknown extensions count as "other".
    pub fn classify_file_types<S: AsRef<str>>(&self, files: &[S]) -> FileTypeCounts {
        let mut counts = FileTypeCounts::default();
        for file in files {
            let extension = Path::new(file.as_ref())
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
                .unwrap_or_default();
            counts.increment(self.tables.category_for_extension(&extension));
        }
        counts
    }

    /// Score the lowercased diff against each pattern bucket.
    ///
    /// The first bucket with the highest score wins; no matches at all means
    /// [`ChangeType::Feature`].
    pub fn detect_change_type(&self, diff_text: &str) -> ChangeType {
        let lower = diff_text.to_lowercase();

        let mut best = ChangeType::Feature;
        let mut best_score = 0;
        for (change_type, patterns) in self.tables.change_patterns() {
            let score: usize = patterns.iter().map(|re| re.find_iter(&lower).count()).sum();
            if score > best_score {
                best = *change_type;
                best_score = score;
            }
        }
        best
    }

    /// Function, class and variable names defined on added lines, deduplicated.
    pub fn extract_entities(&self, diff_text: &str) -> Vec<String> {
        let added_lines: Vec<&str> = diff_text
            .lines()
            .filter(|line| line.starts_with('+') && !line.starts_with("+++"))
            .collect();

        let mut seen = HashSet::new();
        let mut entities = Vec::new();
        for pattern in self.tables.entity_patterns() {
            for line in &added_lines {
                if let Some(name) = pattern.captures(line).and_then(|c| c.get(1)) {
                    let name = name.as_str();
                    if seen.insert(name) {
                        entities.push(name.to_string());
                    }
                }
            }
        }
        entities
    }
}

/// Pick a scope label for the change.
///
/// Checks, in priority order: a single category, then test, docs and config
/// paths, then the most common category.
pub fn determine_scope<S: AsRef<str>>(file_types: &FileTypeCounts, files: &[S]) -> Option<String> {
    if file_types.len() == 1 {
        return file_types.categories().next().map(String::from);
    }

    let lowered: Vec<String> = files.iter().map(|f| f.as_ref().to_lowercase()).collect();

    if lowered.iter().any(|f| f.contains("test")) {
        return Some("test".to_string());
    }
    if lowered.iter().any(|f| f.contains("doc") || f.contains("readme")) {
        return Some("docs".to_string());
    }
    if files.iter().zip(&lowered).any(|(f, lower)| {
        let f = f.as_ref();
        lower.contains("config") || f.contains(".json") || f.contains(".yaml")
    }) {
        return Some("config".to_string());
    }

    file_types.most_common().map(String::from)
}

/// Parse `git status --porcelain -z` output into status lists.
///
/// Records are NUL-terminated and paths are never quoted. Renames and copies
/// are followed by an extra record holding the source path, which is skipped.
pub fn parse_porcelain(stdout: &str) -> StatusLists {
    let mut status = StatusLists::default();
    let mut records = stdout.split('\0');
    while let Some(record) = records.next() {
        let (Some(code), Some(path)) = (record.get(..2), record.get(3..)) else {
            continue;
        };
        if code.contains(['R', 'C']) {
            records.next();
        }
        let Some(file_status) = FileStatus::from_porcelain(code) else {
            continue;
        };

        if !path.is_empty() {
            status.push(file_status, path.to_string());
        }
    }
    status
}

/// Sum `git diff --numstat` output. Binary files (`-`) count zero lines;
/// malformed lines are skipped.
pub fn parse_numstat(stdout: &str) -> DiffStats {
    let mut stats = DiffStats::default();
    for line in stdout.lines() {
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 2 {
            continue;
        }
        let (Some(added), Some(removed)) = (parse_count(parts[0]), parse_count(parts[1])) else {
            continue;
        };
        stats.insertions += added;
        stats.deletions += removed;
        stats.files_changed += 1;
    }
    stats
}

fn parse_count(field: &str) -> Option<usize> {
    if field == "-" {
        Some(0)
    } else {
        field.trim().parse().ok()
    }
}
