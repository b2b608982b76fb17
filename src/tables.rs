//! Immutable lookup tables shared by the analyzer and the generator.
//!
//! Built once per process by [`Tables::standard`] and passed by reference to
//! the components that need them.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex_lite::Regex;

use crate::commit::types::{ChangeType, CommitType};

/// Category for extensions missing from the extension table.
pub const OTHER_CATEGORY: &str = "other";

/// Verbs used for commit types without their own list.
const FALLBACK_VERBS: &[&str] = &["update"];

/// Default description of each conventional commit type.
pub const COMMIT_TYPE_DESCRIPTIONS: &[(CommitType, &str)] = &[
    (CommitType::Feat, "A new feature"),
    (CommitType::Fix, "A bug fix"),
    (CommitType::Docs, "Documentation only changes"),
    (
        CommitType::Style,
        "Changes that do not affect the meaning of the code (white-space, formatting, missing semi-colons, etc)",
    ),
    (
        CommitType::Refactor,
        "A code change that neither fixes a bug nor adds a feature",
    ),
    (CommitType::Perf, "A code change that improves performance"),
    (
        CommitType::Test,
        "Adding missing tests or correcting existing tests",
    ),
    (
        CommitType::Build,
        "Changes that affect the build system or external dependencies",
    ),
    (
        CommitType::Ci,
        "Changes to our CI configuration files and scripts",
    ),
    (
        CommitType::Chore,
        "Other changes that do not modify src or test files",
    ),
    (CommitType::Revert, "Reverts a previous commit"),
];

const TYPE_MAPPING: &[(ChangeType, CommitType)] = &[
    (ChangeType::Feature, CommitType::Feat),
    (ChangeType::Fix, CommitType::Fix),
    (ChangeType::Docs, CommitType::Docs),
    (ChangeType::Style, CommitType::Style),
    (ChangeType::Refactor, CommitType::Refactor),
    (ChangeType::Test, CommitType::Test),
    (ChangeType::Chore, CommitType::Chore),
];

const ACTION_VERBS: &[(CommitType, &[&str])] = &[
    (
        CommitType::Feat,
        &["add", "implement", "create", "introduce", "build"],
    ),
    (
        CommitType::Fix,
        &["fix", "resolve", "correct", "patch", "repair"],
    ),
    (
        CommitType::Docs,
        &["update", "improve", "add", "enhance", "document"],
    ),
    (
        CommitType::Style,
        &["format", "style", "lint", "prettify", "clean"],
    ),
    (
        CommitType::Refactor,
        &[
            "refactor",
            "restructure",
            "optimize",
            "simplify",
            "reorganize",
        ],
    ),
    (
        CommitType::Test,
        &["add", "update", "improve", "fix", "enhance"],
    ),
    (
        CommitType::Chore,
        &["update", "upgrade", "maintain", "cleanup", "remove"],
    ),
];

const FILE_EXTENSIONS: &[(&str, &str)] = &[
    (".py", "python"),
    (".js", "javascript"),
    (".ts", "typescript"),
    (".jsx", "react"),
    (".tsx", "react"),
    (".go", "golang"),
    (".java", "java"),
    (".cpp", "cpp"),
    (".c", "c"),
    (".rs", "rust"),
    (".rb", "ruby"),
    (".php", "php"),
    (".css", "css"),
    (".scss", "sass"),
    (".html", "html"),
    (".md", "documentation"),
    (".json", "config"),
    (".yaml", "config"),
    (".yml", "config"),
    (".xml", "config"),
    (".toml", "config"),
    (".dockerfile", "docker"),
    (".sql", "database"),
    (".sh", "script"),
    (".bash", "script"),
    (".zsh", "script"),
];

// Scoring order matters: the first bucket with the highest score wins.
const CHANGE_PATTERNS: &[(ChangeType, &[&str])] = &[
    (
        ChangeType::Feature,
        &[
            r"add.*function",
            r"new.*class",
            r"implement.*",
            r"create.*",
            r"introduce.*",
            r"build.*",
        ],
    ),
    (
        ChangeType::Fix,
        &[
            r"fix.*bug",
            r"resolve.*",
            r"correct.*",
            r"patch.*",
            r"repair.*",
            r"address.*issue",
        ],
    ),
    (
        ChangeType::Refactor,
        &[
            r"refactor.*",
            r"restructure.*",
            r"reorganize.*",
            r"clean.*up",
            r"simplify.*",
            r"optimize.*",
        ],
    ),
    (
        ChangeType::Docs,
        &[
            r"update.*documentation",
            r"add.*comment",
            r"improve.*readme",
            r"document.*",
            r"add.*docstring",
        ],
    ),
    (
        ChangeType::Style,
        &[
            r"format.*",
            r"indent.*",
            r"whitespace.*",
            r"style.*",
            r"lint.*",
            r"prettier.*",
        ],
    ),
    (
        ChangeType::Test,
        &[r"add.*test", r"test.*", r"spec.*", r"mock.*"],
    ),
    (
        ChangeType::Chore,
        &[
            r"update.*dependency",
            r"upgrade.*",
            r"maintenance.*",
            r"cleanup.*",
            r"remove.*unused",
        ],
    ),
];

// Applied to a single added line; the greedy prefix captures the last definition on it.
const ENTITY_PATTERNS: &[&str] = &[
    r"^\+.*def\s+(\w+)",
    r"^\+.*function\s+(\w+)",
    r"^\+.*class\s+(\w+)",
    r"^\+.*const\s+(\w+)\s*=",
    r"^\+.*let\s+(\w+)\s*=",
    r"^\+.*var\s+(\w+)\s*=",
];

static STANDARD: LazyLock<Tables> = LazyLock::new(Tables::build);

/// Lookup tables for classification and message templating.
#[derive(Debug)]
pub struct Tables {
    type_mapping: HashMap<ChangeType, CommitType>,
    action_verbs: HashMap<CommitType, &'static [&'static str]>,
    file_extensions: HashMap<&'static str, &'static str>,
    change_patterns: Vec<(ChangeType, Vec<Regex>)>,
    entity_patterns: Vec<Regex>,
}

impl Tables {
    /// The process-wide tables.
    pub fn standard() -> &'static Tables {
        &STANDARD
    }

    fn build() -> Self {
        let compile = |pattern: &str| Regex::new(pattern).expect("built-in pattern is valid");

        Self {
            type_mapping: TYPE_MAPPING.iter().copied().collect(),
            action_verbs: ACTION_VERBS.iter().copied().collect(),
            file_extensions: FILE_EXTENSIONS.iter().copied().collect(),
            change_patterns: CHANGE_PATTERNS
                .iter()
                .map(|(change_type, patterns)| {
                    (*change_type, patterns.iter().map(|p| compile(p)).collect())
                })
                .collect(),
            entity_patterns: ENTITY_PATTERNS.iter().map(|p| compile(p)).collect(),
        }
    }

    /// Conventional type for an internal change type, `feat` when unmapped.
    pub fn commit_type_for(&self, change_type: ChangeType) -> CommitType {
        self.type_mapping
            .get(&change_type)
            .copied()
            .unwrap_or(CommitType::Feat)
    }

    /// Action verbs for a commit type. Never empty.
    pub fn verbs(&self, commit_type: CommitType) -> &'static [&'static str] {
        self.action_verbs
            .get(&commit_type)
            .copied()
            .unwrap_or(FALLBACK_VERBS)
    }

    /// Category for a lowercase extension including the dot, e.g. `".rs"`.
    pub fn category_for_extension(&self, extension: &str) -> &'static str {
        self.file_extensions
            .get(extension)
            .copied()
            .unwrap_or(OTHER_CATEGORY)
    }

    /// Pattern buckets in scoring order.
    pub fn change_patterns(&self) -> &[(ChangeType, Vec<Regex>)] {
        &self.change_patterns
    }

    /// Entity patterns, each with one capture group for the identifier.
    pub fn entity_patterns(&self) -> &[Regex] {
        &self.entity_patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_change_type_maps() {
        let tables = Tables::standard();
        for (change_type, _) in tables.change_patterns() {
            let _ = tables.commit_type_for(*change_type);
        }
        assert_eq!(tables.commit_type_for(ChangeType::Feature), CommitType::Feat);
        assert_eq!(tables.commit_type_for(ChangeType::Chore), CommitType::Chore);
    }

    #[test]
    fn test_verbs_fall_back_to_update() {
        let tables = Tables::standard();
        assert_eq!(tables.verbs(CommitType::Perf), &["update"]);
        assert_eq!(tables.verbs(CommitType::Fix)[0], "fix");
        assert_eq!(tables.verbs(CommitType::Fix)[1], "resolve");
    }

    #[test]
    fn test_pattern_bucket_order() {
        let order: Vec<ChangeType> = Tables::standard()
            .change_patterns()
            .iter()
            .map(|(t, _)| *t)
            .collect();
        assert_eq!(
            order,
            vec![
                ChangeType::Feature,
                ChangeType::Fix,
                ChangeType::Refactor,
                ChangeType::Docs,
                ChangeType::Style,
                ChangeType::Test,
                ChangeType::Chore,
            ]
        );
    }

    #[test]
    fn test_unknown_extension_is_other() {
        let tables = Tables::standard();
        assert_eq!(tables.category_for_extension(".rs"), "rust");
        assert_eq!(tables.category_for_extension(".nope"), OTHER_CATEGORY);
        assert_eq!(tables.category_for_extension(""), OTHER_CATEGORY);
    }

    #[test]
    fn test_descriptions_cover_all_types() {
        for ty in CommitType::ALL {
            assert!(COMMIT_TYPE_DESCRIPTIONS.iter().any(|(t, _)| *t == ty));
        }
    }
}
