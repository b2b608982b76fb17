//! Commit message generation from an [`Analysis`].

use std::path::Path;

use crate::commit::analysis::Analysis;
use crate::commit::types::CommitType;
use crate::config::MessageRules;
use crate::format::truncate_text;
use crate::tables::{OTHER_CATEGORY, Tables};

/// Commit types whose mixed-change descriptions may name an entity.
const ENTITY_TYPES: [CommitType; 3] = [CommitType::Feat, CommitType::Fix, CommitType::Refactor];

/// A generated commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub subject: String,
    pub body: Option<String>,
}

impl CommitMessage {
    /// Format the message for git: subject, blank line, body.
    pub fn format(&self) -> String {
        match self.body.as_deref().map(str::trim) {
            Some(body) if !body.is_empty() => format!("{}\n\n{}", self.subject, body),
            _ => self.subject.clone(),
        }
    }
}

/// Builds conventional commit messages from the lookup tables.
pub struct MessageGenerator<'a> {
    tables: &'a Tables,
    rules: MessageRules,
}

impl<'a> MessageGenerator<'a> {
    pub fn new(tables: &'a Tables, rules: MessageRules) -> Self {
        Self { tables, rules }
    }

    /// The subject line, using the commit type's first verb.
    pub fn generate_subject(&self, analysis: &Analysis) -> String {
        self.subject_with_verb(analysis, 0)
    }

    /// The subject line using the verb at `verb_index` in the type's verb
    /// list, or the first verb when the index is out of range.
    pub fn subject_with_verb(&self, analysis: &Analysis, verb_index: usize) -> String {
        let commit_type = self.tables.commit_type_for(analysis.change_type);
        let description = self.describe(analysis, commit_type, verb_index);

        match analysis.scope.as_deref() {
            Some(scope) if !scope.is_empty() && scope != OTHER_CATEGORY => {
                format!("{commit_type}({scope}): {description}")
            }
            _ => format!("{commit_type}: {description}"),
        }
    }

    fn describe(&self, analysis: &Analysis, commit_type: CommitType, verb_index: usize) -> String {
        let verbs = self.tables.verbs(commit_type);
        let verb = verbs.get(verb_index).unwrap_or(&verbs[0]);

        let status = &analysis.status;
        let entities = &analysis.entities;
        let added = !status.added.is_empty();
        let modified = !status.modified.is_empty();
        let deleted = !status.deleted.is_empty();

        if added && !modified && !deleted {
            return match status.added.as_slice() {
                [only] => format!("{verb} {}", clean_filename(only)),
                files => format!("{verb} {} new files", files.len()),
            };
        }

        if deleted && !added && !modified {
            return match status.deleted.as_slice() {
                [only] => format!("remove {}", clean_filename(only)),
                files => format!("remove {} files", files.len()),
            };
        }

        if modified && !added && !deleted {
            return match entities.len() {
                0 => match status.modified.as_slice() {
                    [only] => format!("{verb} {}", clean_filename(only)),
                    files => format!("{verb} {} files", files.len()),
                },
                1 => format!("{verb} {} function", entities[0]),
                2..=3 => format!("{verb} {} functions", entities.join(", ")),
                _ => format!("{verb} multiple functions"),
            };
        }

        // Mixed changes
        if let [first, rest @ ..] = entities.as_slice()
            && ENTITY_TYPES.contains(&commit_type)
        {
            return if rest.is_empty() {
                format!("{verb} {first}")
            } else {
                format!("{verb} {first} and related functionality")
            };
        }

        let files: Vec<&String> = status
            .added
            .iter()
            .chain(&status.modified)
            .chain(&status.deleted)
            .collect();
        match files.as_slice() {
            [only] => format!("{verb} {}", clean_filename(only)),
            files => format!("{verb} {} files", files.len()),
        }
    }

    /// Body lines summarizing larger changes, or `None` when nothing stands out.
    pub fn generate_body(&self, analysis: &Analysis) -> Option<String> {
        let mut parts = Vec::new();
        let stats = &analysis.stats;

        if stats.files_changed > 3 {
            parts.push(format!("Modified {} files", stats.files_changed));
        }

        if stats.insertions > 20 || stats.deletions > 20 {
            parts.push(format!("+{} -{} lines", stats.insertions, stats.deletions));
        }

        if analysis.entities.len() > 1 {
            parts.push(format!("Updated functions: {}", analysis.entities.join(", ")));
        }

        if analysis.file_types.len() > 2 {
            let types: Vec<&str> = analysis.file_types.categories().collect();
            parts.push(format!("Affected: {} files", types.join(", ")));
        }

        if parts.is_empty() {
            return None;
        }

        let max_line = self.rules.max_body_line_length;
        Some(
            parts
                .iter()
                .map(|line| truncate_text(line, max_line, "..."))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    /// Subject and, when requested and available, body.
    pub fn generate_message(&self, analysis: &Analysis, include_body: bool) -> CommitMessage {
        CommitMessage {
            subject: self.generate_subject(analysis),
            body: if include_body {
                self.generate_body(analysis)
            } else {
                None
            },
        }
    }

    /// The complete message text.
    pub fn generate_full_message(&self, analysis: &Analysis, include_body: bool) -> String {
        self.generate_message(analysis, include_body).format()
    }

    /// Up to `count` subject-only suggestions: the primary subject, the same
    /// with the type's second verb, then a generic fallback.
    pub fn suggest_multiple_messages(&self, analysis: &Analysis, count: usize) -> Vec<String> {
        let commit_type = self.tables.commit_type_for(analysis.change_type);
        let mut messages = vec![self.generate_subject(analysis)];

        if count > 1 && self.tables.verbs(commit_type).len() > 1 {
            messages.push(self.subject_with_verb(analysis, 1));
        }

        if count > 2 {
            let generic = match analysis.scope.as_deref() {
                Some(scope) if !scope.is_empty() && scope != OTHER_CATEGORY => {
                    format!("{commit_type}({scope}): update implementation")
                }
                _ => {
                    let files = analysis.stats.files_changed;
                    let plural = if files > 1 { "s" } else { "" };
                    format!("{commit_type}: update {files} file{plural}")
                }
            };
            messages.push(generic);
        }

        messages.truncate(count);
        messages
    }
}

/// Readable name for a path: basename without extension, `_` and `-` as spaces.
pub fn clean_filename(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().replace(['_', '-'], " "))
        .unwrap_or_default()
}
