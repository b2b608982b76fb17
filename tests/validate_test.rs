//! Integration tests for conventional commit validation.

use gitscribe::commit::CommitType;
use gitscribe::{MessageRules, validate_message};

fn rules() -> MessageRules {
    MessageRules::default()
}

#[test]
fn test_validate_all_commit_types() {
    for commit_type in CommitType::ALL {
        let message = format!("{commit_type}: change something");
        let report = validate_message(&message, &rules());
        assert!(report.is_valid(), "Failed to validate: {}", message);
    }
}

#[test]
fn test_validate_with_various_scopes() {
    let cases = vec![
        ("feat(api): new endpoint", true),
        ("fix(ui): button alignment", true),
        ("feat(auth/oauth): add provider", true),
        ("fix(db-layer): connection leak", true),
        ("feat(): empty scope", false),
        ("feat (api): space before scope", false),
    ];

    for (message, expected) in cases {
        assert_eq!(
            validate_message(message, &rules()).is_valid(),
            expected,
            "Wrong verdict for: {}",
            message
        );
    }
}

#[test]
fn test_validate_rejects_non_conventional() {
    let messages = vec![
        "Update README",
        "WIP",
        "feature: add thing",
        "FEAT: add thing",
        "feat:add thing",
        "feat: ",
    ];

    for message in messages {
        assert!(
            !validate_message(message, &rules()).is_valid(),
            "Should reject: {}",
            message
        );
    }
}

#[test]
fn test_validate_only_checks_subject_line() {
    let message = "fix: handle empty input\n\nThis Body Is Capitalized.\nAnd ends with periods.";
    let report = validate_message(message, &rules());
    assert!(report.is_valid());
    assert!(report.warnings.is_empty());
}

#[test]
fn test_validate_reports_every_failure() {
    let long_description = "X".repeat(80);
    let message = format!("chore: {long_description}.");
    let report = validate_message(&message, &rules());

    assert_eq!(report.errors.len(), 3);
    assert!(report.errors.iter().any(|e| e.contains("too long")));
    assert!(report.errors.iter().any(|e| e.contains("lowercase")));
    assert!(report.errors.iter().any(|e| e.contains("period")));
}

#[test]
fn test_validate_unicode_length_counts_characters() {
    let subject = format!("docs: {}", "é".repeat(66));
    assert_eq!(subject.chars().count(), 72);
    assert!(validate_message(&subject, &rules()).is_valid());
}
