//! Tag canonicalization, matching and URL slugs
//!
//! A canonical tag is lowercase, made only of `[a-z0-9_-]`, with no leading,
//! trailing or doubled hyphen. Two tags are the same tag iff their canonical
//! forms are equal, and a tag list never holds two canonically equal entries.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("Valid regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Valid regex"));
static HYPHEN_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("Valid regex"));
static TAG_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").expect("Valid regex"));

/// Reduce free-form input to its canonical tag form
///
/// Returns an empty string when nothing taggable is left; callers treat that
/// as "no tag".
pub fn normalize_tag(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let stripped = DISALLOWED_CHARS.replace_all(lowered.trim(), "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");

    let tag = collapsed.strip_prefix('-').unwrap_or(&collapsed);
    let tag = tag.strip_suffix('-').unwrap_or(tag);
    tag.to_string()
}

/// Whether two tags share a canonical form
pub fn tags_match(a: &str, b: &str) -> bool {
    normalize_tag(a) == normalize_tag(b)
}

/// Append the canonical form of `new_tag` unless it is empty or already present
pub fn add_tag(tags: &[String], new_tag: &str) -> Vec<String> {
    let mut updated = tags.to_vec();
    push_canonical(&mut updated, normalize_tag(new_tag));
    updated
}

/// Drop every entry canonically equal to `tag`
pub fn remove_tag(tags: &[String], tag: &str) -> Vec<String> {
    let target = normalize_tag(tag);
    tags.iter()
        .filter(|t| normalize_tag(t) != target)
        .cloned()
        .collect()
}

/// Split comma/whitespace separated input into a deduplicated canonical tag list
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags = Vec::new();
    for piece in TAG_SEPARATORS.split(input) {
        push_canonical(&mut tags, normalize_tag(piece));
    }
    tags
}

/// Percent-encode a tag for use as a URL path segment
///
/// The tag is encoded as given. Normalize it first if the slug must round-trip
/// back to the canonical form.
pub fn tag_to_slug(tag: &str) -> String {
    urlencoding::encode(tag).into_owned()
}

/// Decode a URL path segment back into a tag
///
/// Input that does not decode to valid UTF-8 is returned unchanged.
pub fn slug_to_tag(slug: &str) -> String {
    urlencoding::decode(slug)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| slug.to_string())
}

/// Browse path for a tag, e.g. `/tag/love-loss`
pub fn tag_path(raw: &str) -> String {
    format!("/tag/{}", tag_to_slug(&normalize_tag(raw)))
}

fn push_canonical(tags: &mut Vec<String>, canonical: String) {
    if canonical.is_empty() || tags.iter().any(|t| normalize_tag(t) == canonical) {
        return;
    }
    tags.push(canonical);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    fn is_canonical(tag: &str) -> bool {
        tag.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
            && !tag.starts_with('-')
            && !tag.ends_with('-')
            && !tag.contains("--")
    }

    const SAMPLES: &[&str] = &[
        "  Love & Loss!! ",
        "Nature",
        "free verse",
        "--haiku--",
        "- - -",
        "Ödön's Élégie",
        "snake_case_tag",
        "tabs\tand\nnewlines",
        "a - b",
        "!!!",
        "",
        "  ",
        "ALL CAPS 2024",
        "emoji 🌙 night",
        "trailing-",
        "-leading",
    ];

    #[test]
    fn test_normalize_examples() {
        assert_eq!(normalize_tag("  Love & Loss!! "), "love-loss");
        assert_eq!(normalize_tag("Free Verse"), "free-verse");
        assert_eq!(normalize_tag("--haiku--"), "haiku");
        assert_eq!(normalize_tag("a - b"), "a-b");
        assert_eq!(normalize_tag("snake_case_tag"), "snake_case_tag");
        assert_eq!(normalize_tag("tabs\tand\nnewlines"), "tabs-and-newlines");
        assert_eq!(normalize_tag("emoji 🌙 night"), "emoji-night");
        assert_eq!(normalize_tag("Ödön's Élégie"), "dns-lgie");
    }

    #[test]
    fn test_normalize_empty_results() {
        assert_eq!(normalize_tag(""), "");
        assert_eq!(normalize_tag("   "), "");
        assert_eq!(normalize_tag("!!!"), "");
        assert_eq!(normalize_tag("- - -"), "");
    }

    #[test]
    fn test_normalize_is_canonical_fixed_point() {
        for sample in SAMPLES {
            let once = normalize_tag(sample);
            assert!(is_canonical(&once), "{sample:?} -> {once:?}");
            assert_eq!(normalize_tag(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_tags_match() {
        assert!(tags_match("Love & Loss", "love-loss"));
        assert!(tags_match("NATURE", " nature "));
        assert!(!tags_match("nature", "natural"));
    }

    #[test]
    fn test_add_tag_appends_canonical_form() {
        let tags = owned(&["nature"]);
        assert_eq!(add_tag(&tags, "Free Verse!"), owned(&["nature", "free-verse"]));
    }

    #[test]
    fn test_add_tag_skips_duplicates_and_empty() {
        let tags = owned(&["nature", "free-verse"]);
        assert_eq!(add_tag(&tags, "NATURE"), tags);
        assert_eq!(add_tag(&tags, "free verse"), tags);
        assert_eq!(add_tag(&tags, "?!"), tags);
    }

    #[test]
    fn test_add_tag_is_idempotent() {
        let tags = owned(&["grief"]);
        for sample in SAMPLES {
            let once = add_tag(&tags, sample);
            assert_eq!(add_tag(&once, sample), once, "sample {sample:?}");
        }
    }

    #[test]
    fn test_remove_tag() {
        let tags = owned(&["nature", "love-loss", "grief"]);
        assert_eq!(remove_tag(&tags, "Love & Loss"), owned(&["nature", "grief"]));
        assert_eq!(remove_tag(&tags, "missing"), tags);
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("Nature, nature  NATURE"), owned(&["nature"]));
        assert_eq!(
            parse_tags("haiku,  Free_Verse ,,grief haiku"),
            owned(&["haiku", "free_verse", "grief"])
        );
        assert!(parse_tags(" , ,, ").is_empty());
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn test_slug_round_trip() {
        for sample in SAMPLES {
            let tag = normalize_tag(sample);
            assert_eq!(slug_to_tag(&tag_to_slug(&tag)), tag);
        }
    }

    #[test]
    fn test_slug_does_not_normalize() {
        assert_eq!(tag_to_slug("Love & Loss"), "Love%20%26%20Loss");
        assert_eq!(slug_to_tag("Love%20%26%20Loss"), "Love & Loss");
    }

    #[test]
    fn test_slug_to_tag_keeps_invalid_input() {
        assert_eq!(slug_to_tag("%FF%FE"), "%FF%FE");
    }

    #[test]
    fn test_tag_path() {
        assert_eq!(tag_path("  Love & Loss!! "), "/tag/love-loss");
        assert_eq!(tag_path("free_verse"), "/tag/free_verse");
    }
}
