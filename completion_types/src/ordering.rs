//! Catalog ordering
//!
//! The catalog key is the input text compared case-insensitively. Display
//! order puts higher relevance first and falls back to the catalog key.

use std::cmp::Ordering;

use crate::completion::Completion;

fn folded(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_lowercase)
}

/// Case-insensitive lexicographic comparison
pub fn compare_input_text(a: &str, b: &str) -> Ordering {
    folded(a).cmp(folded(b))
}

/// True if `text` starts with `prefix`, ignoring case
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let mut text = folded(text);
    folded(prefix).all(|p| text.next() == Some(p))
}

/// Stable sort by input text
pub fn sort_by_input_text(completions: &mut [Completion]) {
    completions.sort_by(|a, b| compare_input_text(&a.input_text, &b.input_text));
}

/// Stable sort by relevance (descending), then input text
pub fn sort_by_relevance(completions: &mut [Completion]) {
    completions.sort_by(|a, b| {
        b.relevance
            .cmp(&a.relevance)
            .then_with(|| compare_input_text(&a.input_text, &b.input_text))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProviderId;

    #[test]
    fn test_compare_ignores_case() {
        assert_eq!(compare_input_text("Print", "print"), Ordering::Equal);
        assert_eq!(compare_input_text("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_input_text("pr", "print"), Ordering::Less);
    }

    #[test]
    fn test_starts_with_ignore_case() {
        assert!(starts_with_ignore_case("printf", "PRI"));
        assert!(starts_with_ignore_case("printf", ""));
        assert!(!starts_with_ignore_case("pr", "pri"));
        assert!(!starts_with_ignore_case("sprintf", "pri"));
    }

    #[test]
    fn test_sort_by_relevance_then_alpha() {
        let provider = ProviderId::new();
        let mut list = vec![
            Completion::basic(provider, "zeta"),
            Completion::basic(provider, "Alpha"),
            Completion::basic(provider, "mid").with_relevance(5),
            Completion::basic(provider, "beta"),
        ];
        sort_by_relevance(&mut list);
        let names: Vec<_> = list.iter().map(|c| c.input_text.as_str()).collect();
        assert_eq!(names, vec!["mid", "Alpha", "beta", "zeta"]);
    }

    #[test]
    fn test_sort_is_stable_for_duplicates() {
        let provider = ProviderId::new();
        let mut list = vec![
            Completion::basic(provider, "foo").with_summary("first"),
            Completion::basic(provider, "bar"),
            Completion::basic(provider, "FOO").with_summary("second"),
        ];
        sort_by_input_text(&mut list);
        assert_eq!(list[0].input_text, "bar");
        assert_eq!(list[1].summary.as_deref(), Some("first"));
        assert_eq!(list[2].summary.as_deref(), Some("second"));
    }
}
