//! Branch name templating.
//!
//! Placeholders: `{id}` is the lowercased identifier, `{ID}` the identifier
//! as-is, `{title}` a slug of the title. Replacement is purely textual.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Issue;

const MAX_TITLE_SLUG_LEN: usize = 50;

// ASCII whitespace only; anything else outside [a-z0-9-] is dropped.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9 \t\n\x0B\x0C\r-]").expect("valid regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\n\x0B\x0C\r]+").expect("valid regex"));

/// Render `pattern` for `issue`.
pub fn generate(issue: &Issue, pattern: &str) -> String {
    render(&issue.identifier, &issue.title, pattern)
}

pub fn render(identifier: &str, title: &str, pattern: &str) -> String {
    pattern
        .replace("{id}", &identifier.to_lowercase())
        .replace("{ID}", identifier)
        .replace("{title}", &title_slug(title))
}

/// Lowercase, drop punctuation, hyphenate whitespace, cap at 50 characters
/// and trim trailing hyphens.
pub fn title_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    let truncated: String = hyphenated.chars().take(MAX_TITLE_SLUG_LEN).collect();
    truncated.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pattern() {
        assert_eq!(
            render("ABC-123", "Fix the Bug!! Now", "{id}-{title}"),
            "abc-123-fix-the-bug-now"
        );
    }

    #[test]
    fn upper_id_keeps_identifier_case() {
        assert_eq!(render("XYZ-1", "...", "team/{ID}"), "team/XYZ-1");
    }

    #[test]
    fn slug_is_capped_and_has_no_trailing_hyphen() {
        // 49 chars of "a" then a space: the 50th char is a hyphen and gets trimmed.
        let title = format!("{} tail", "a".repeat(49));
        let slug = title_slug(&title);
        assert_eq!(slug, "a".repeat(49));
    }

    #[test]
    fn slug_collapses_whitespace_and_drops_non_ascii() {
        assert_eq!(title_slug("Café\t\tmenu  — update"), "caf-menu-update");
    }

    #[test]
    fn leading_whitespace_becomes_leading_hyphen() {
        assert_eq!(title_slug("  hello"), "-hello");
    }

    #[test]
    fn pattern_without_placeholders_is_returned_verbatim() {
        assert_eq!(render("A-1", "t", "main"), "main");
    }

    #[test]
    fn repeated_placeholders_are_all_replaced() {
        assert_eq!(render("A-1", "Do it", "{id}/{id}-{title}"), "a-1/a-1-do-it");
    }
}
