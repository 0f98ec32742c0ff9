//! Filename templating.
//!
//! Expands a user-supplied template string against fields derived from the
//! capture: calendar date, compact timestamp, domain and title slug.
//! Unrecognized `{{...}}` tokens pass through unchanged.

use chrono::{DateTime, Local};

use crate::normalize::{collapse_whitespace, replace_unsafe_chars, slugify};

/// Default template when the preference is empty: just the slug.
pub const DEFAULT_TEMPLATE: &str = "{{slug}}";

/// Expand `template` into a filename.
///
/// Recognized placeholder tokens, each replaceable any number of times:
///
/// - `{{yyyy-MM-dd}}` — local calendar date
/// - `{{yyyyMMdd-HHmmss}}` — compact local timestamp
/// - `{{domain}}` — the page's hostname
/// - `{{slug}}` — slugified title, falling back to the slugified domain,
///   falling back to the compact timestamp
///
/// The slug fallback chain guarantees a non-empty result for the default
/// template even when title and domain are both empty. After substitution,
/// filesystem-unsafe characters become hyphens, internal whitespace runs
/// collapse to a single space and the result is trimmed.
pub fn build_filename(template: &str, title: &str, domain: &str, now: DateTime<Local>) -> String {
    let date = now.format("%Y-%m-%d").to_string();
    let stamp = now.format("%Y%m%d-%H%M%S").to_string();

    let mut slug = slugify(title);
    if slug.is_empty() {
        slug = slugify(domain);
    }
    if slug.is_empty() {
        slug = stamp.clone();
    }

    let expanded = template
        .replace("{{yyyy-MM-dd}}", &date)
        .replace("{{yyyyMMdd-HHmmss}}", &stamp)
        .replace("{{domain}}", domain)
        .replace("{{slug}}", &slug);

    let sanitized = replace_unsafe_chars(&expanded);
    collapse_whitespace(&sanitized).trim().to_string()
}
