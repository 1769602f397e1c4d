use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9-]").unwrap());

/// Derive a URL-safe slug from a title.
///
/// Lower-cases, turns each whitespace run into a single `-`, then drops every
/// character outside `[a-z0-9-]`. Hyphens already present in the title are
/// kept as-is, so `"A - B"` becomes `"a---b"`.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let hyphenated = WHITESPACE_RUN.replace_all(&lowered, "-");
    NON_SLUG.replace_all(&hyphenated, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_basic_slug() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(slugify("Second \t\n  Post"), "second-post");
    }

    #[test]
    fn test_punctuation_stripped() {
        assert_eq!(slugify("Why UX Matters: 5 Rules!"), "why-ux-matters-5-rules");
    }

    #[test]
    fn test_existing_hyphens_kept() {
        assert_eq!(slugify("A - B"), "a---b");
        assert_eq!(slugify("state-of-the-art"), "state-of-the-art");
    }

    #[test]
    fn test_non_ascii_dropped() {
        assert_eq!(slugify("Café Déjà Vu"), "caf-dj-vu");
    }

    #[test]
    fn test_leading_trailing_whitespace() {
        assert_eq!(slugify("  padded  "), "-padded-");
    }

    #[test]
    fn test_empty() {
        assert_eq!(slugify(""), "");
    }

    proptest! {
        #[test]
        fn prop_slug_charset(title in ".*") {
            let slug = slugify(&title);
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }

        #[test]
        fn prop_slug_deterministic(title in ".*") {
            prop_assert_eq!(slugify(&title), slugify(&title));
        }

        #[test]
        fn prop_slug_idempotent(title in "[A-Za-z0-9 ]{0,40}") {
            let once = slugify(&title);
            prop_assert_eq!(slugify(&once), once.clone());
        }
    }
}
