//! Small text formatting helpers for terminal output and message bodies.

/// Comma-separated file list, eliding entries beyond `max_display`.
pub fn format_file_list<S: AsRef<str>>(files: &[S], max_display: usize) -> String {
    if files.is_empty() {
        return "none".to_string();
    }

    let shown: Vec<&str> = files.iter().take(max_display).map(AsRef::as_ref).collect();
    if files.len() <= max_display {
        shown.join(", ")
    } else {
        format!("{} and {} more", shown.join(", "), files.len() - max_display)
    }
}

/// Truncate to at most `max_length` characters, ending with `suffix` when cut.
pub fn truncate_text(text: &str, max_length: usize, suffix: &str) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let keep = max_length.saturating_sub(suffix.chars().count());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(suffix);
    truncated
}

/// English plural of `word` for `count` items, using simple suffix rules.
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix('y') {
        format!("{stem}ies")
    } else if ["s", "sh", "ch", "x", "z"].iter().any(|end| word.ends_with(end)) {
        format!("{word}es")
    } else {
        format!("{word}s")
    }
}

/// Diff stats as `+I -D`, omitting zero sides.
pub fn format_stats(insertions: usize, deletions: usize) -> String {
    let mut parts = Vec::new();
    if insertions > 0 {
        parts.push(format!("+{insertions}"));
    }
    if deletions > 0 {
        parts.push(format!("-{deletions}"));
    }

    if parts.is_empty() {
        "no changes".to_string()
    } else {
        parts.join(" ")
    }
}
