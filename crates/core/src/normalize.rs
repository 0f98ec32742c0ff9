//! Pure string normalization utilities.
//!
//! Slugification, tag sanitization, tag splitting and path-segment trimming.
//! Every function here is total (never panics, never errors) and idempotent:
//! applying one twice yields the same result as applying it once. Downstream
//! code relies on that when it re-normalizes values that may already be
//! normalized.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[\\/:*?"<>|]"#).unwrap());
static HYPHEN_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());
static TAG_DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9\-_/]+").unwrap());
static TAG_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,\s]+").unwrap());

/// Derive a filename-safe slug from a title or domain.
///
/// Lower-cases, converts whitespace runs (Unicode-aware, so non-Latin
/// scripts pass through untouched) to single hyphens, replaces
/// filesystem-unsafe characters with hyphens, collapses hyphen runs and
/// trims leading/trailing hyphens.
///
/// ```
/// use clipvault_core::normalize::slugify;
///
/// assert_eq!(slugify("Acme Repo"), "acme-repo");
/// assert_eq!(slugify("日本語のタイトル"), "日本語のタイトル");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lowered, "-");
    let sanitized = replace_unsafe_chars(&hyphenated);
    let collapsed = HYPHEN_RUNS.replace_all(&sanitized, "-");
    collapsed.trim_matches('-').to_string()
}

/// Replace filesystem-unsafe characters (`\/:*?"<>|`) with hyphens.
pub fn replace_unsafe_chars(text: &str) -> String {
    UNSAFE_CHARS.replace_all(text, "-").into_owned()
}

/// Collapse whitespace runs (Unicode-aware) to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// Normalize a tag to the `[a-z0-9\-_/]` charset.
///
/// Lower-cases, replaces every disallowed character run with a hyphen,
/// collapses hyphen runs and trims leading/trailing hyphens. A tag made
/// entirely of disallowed characters normalizes to the empty string;
/// callers drop those.
pub fn sanitize_tag(tag: &str) -> String {
    let lowered = tag.to_lowercase();
    let replaced = TAG_DISALLOWED.replace_all(&lowered, "-");
    let collapsed = HYPHEN_RUNS.replace_all(&replaced, "-");
    collapsed.trim_matches('-').to_string()
}

/// Split a raw tag preference string on runs of commas and whitespace,
/// dropping empty segments.
pub fn split_tags(raw: &str) -> Vec<String> {
    TAG_SEPARATORS
        .split(raw)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip leading and trailing path separators from a folder segment.
pub fn trim_slashes(path: &str) -> String {
    path.trim_matches('/').to_string()
}
