//! URL classification.
//!
//! Validates candidate strings as HTTP(S) URLs and extracts hostnames.
//! Both operations are total: malformed input yields `false` or an empty
//! string, never an error.

use url::Url;

/// Whether a candidate string is a well-formed HTTP or HTTPS URL.
///
/// A candidate is valid iff it starts with `http://` or `https://`
/// (case-insensitive) and parses as a structured URL. Other schemes
/// (`ftp://`, `obsidian://`, ...) are rejected even when parseable.
pub fn is_http_url(candidate: &str) -> bool {
    let trimmed = candidate.trim();
    let lowered = trimmed.to_lowercase();
    if !lowered.starts_with("http://") && !lowered.starts_with("https://") {
        return false;
    }
    Url::parse(trimmed).is_ok()
}

/// Extract the hostname from a URL, or an empty string on any parse failure.
pub fn hostname(url: &str) -> String {
    Url::parse(url.trim())
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_http_urls() {
        assert!(is_http_url("https://example.com/path?q=1"));
        assert!(is_http_url("http://example.com"));
        assert!(is_http_url("HTTPS://EXAMPLE.COM"));
        assert!(is_http_url("  https://example.com  "));
    }

    #[test]
    fn test_invalid_urls() {
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("not a url"));
        assert!(!is_http_url("example.com"));
        assert!(!is_http_url(""));
        assert!(!is_http_url("obsidian://new?vault=x"));
        assert!(!is_http_url("https://"));
    }

    #[test]
    fn test_hostname() {
        assert_eq!(hostname("https://sub.example.com/a/b"), "sub.example.com");
        assert_eq!(hostname("https://GitHub.com/acme/repo"), "github.com");
        assert_eq!(hostname("not a url"), "");
        assert_eq!(hostname(""), "");
    }
}
