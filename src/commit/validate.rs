//! Conventional commit message validation.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::config::MessageRules;

// Pattern: type(scope): description or type: description
static SUBJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(feat|fix|docs|style|refactor|perf|test|build|ci|chore|revert)(\(.+\))?: .+")
        .expect("subject pattern is valid")
});

/// Outcome of validating a commit message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Rule violations. The message is valid when this is empty.
    pub errors: Vec<String>,
    /// Style hints that do not affect validity.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a message's subject line against conventional commit rules.
///
/// Every check runs; all failures are reported.
pub fn validate_message(message: &str, rules: &MessageRules) -> ValidationReport {
    let mut report = ValidationReport::default();
    let subject = message.split('\n').next().unwrap_or("");

    if !SUBJECT_RE.is_match(subject) {
        report
            .errors
            .push("Subject line doesn't follow conventional commit format".to_string());
    }

    if subject.chars().count() > rules.max_subject_length {
        report.errors.push(format!(
            "Subject line is too long (should be ≤ {} characters)",
            rules.max_subject_length
        ));
    }

    let description = subject.split_once(':').map(|(_, rest)| rest.trim());

    if !rules.capitalize_subject
        && description
            .and_then(|d| d.chars().next())
            .is_some_and(char::is_uppercase)
    {
        report
            .errors
            .push("Description should start with lowercase letter".to_string());
    }

    if !rules.end_subject_with_period && subject.ends_with('.') {
        report
            .errors
            .push("Subject line should not end with a period".to_string());
    }

    if rules.use_imperative_mood
        && let Some(word) = description.and_then(|d| d.split_whitespace().next())
    {
        let word = word.to_lowercase();
        if word.len() > 4 && (word.ends_with("ed") || word.ends_with("ing")) {
            report.warnings.push(format!(
                "Description should use imperative mood (\"{word}\" looks like past tense or gerund)"
            ));
        }
    }

    report
}
