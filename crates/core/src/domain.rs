//! Hostname to tag mapping.
//!
//! A two-tier lookup: an exact-match table of well-known domains consulted
//! first, then a structural fallback that takes the second-to-last
//! dot-separated label of the hostname (the registrable name, `example`
//! from `sub.example.com`).

use crate::normalize::sanitize_tag;

/// Known domain to tag mappings, consulted before the structural fallback.
///
/// Kept as a plain ordered slice so additions stay trivial. Mirror domains
/// collapse to one tag (`x.com`/`twitter.com`, `youtube.com`/`youtu.be`).
const DOMAIN_TAGS: &[(&str, &str)] = &[
    ("zenn.dev", "zenn"),
    ("note.com", "note"),
    ("x.com", "twitter"),
    ("twitter.com", "twitter"),
    ("github.com", "github"),
    ("qiita.com", "qiita"),
    ("dev.to", "devto"),
    ("medium.com", "medium"),
    ("youtube.com", "youtube"),
    ("youtu.be", "youtube"),
];

/// Map a hostname to a short categorical tag.
///
/// Never fails: an unknown hostname falls back to its sanitized
/// second-to-last label, a single-label hostname to the sanitized whole,
/// and an empty hostname to an empty tag.
pub fn domain_tag(hostname: &str) -> String {
    let host = hostname.to_lowercase();

    for (domain, tag) in DOMAIN_TAGS {
        if host == *domain {
            return (*tag).to_string();
        }
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() >= 2 {
        sanitize_tag(labels[labels.len() - 2])
    } else {
        sanitize_tag(&host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("github.com", "github")]
    #[case("GitHub.com", "github")]
    #[case("x.com", "twitter")]
    #[case("twitter.com", "twitter")]
    #[case("youtu.be", "youtube")]
    #[case("youtube.com", "youtube")]
    #[case("zenn.dev", "zenn")]
    fn test_known_domains(#[case] host: &str, #[case] expected: &str) {
        assert_eq!(domain_tag(host), expected);
    }

    #[test]
    fn test_fallback_second_to_last_label() {
        assert_eq!(domain_tag("sub.example.com"), "example");
        assert_eq!(domain_tag("example.org"), "example");
        assert_eq!(domain_tag("a.b.c.d.co.uk"), "co");
    }

    #[test]
    fn test_fallback_matches_sanitized_label() {
        // Any multi-label hostname outside the table uses the sanitized
        // second-to-last label.
        for host in ["docs.rs.io", "blog.My-Site.net", "www.foo_bar.com"] {
            let lowered = host.to_lowercase();
            let labels: Vec<&str> = lowered.split('.').collect();
            let expected = sanitize_tag(labels[labels.len() - 2]);
            assert_eq!(domain_tag(host), expected);
        }
    }

    #[test]
    fn test_single_label_and_empty() {
        assert_eq!(domain_tag("localhost"), "localhost");
        assert_eq!(domain_tag(""), "");
    }

    #[test]
    fn test_subdomain_of_known_domain_is_not_a_table_hit() {
        // Exact match only: gist.github.com falls through to the fallback,
        // which still yields "github".
        assert_eq!(domain_tag("gist.github.com"), "github");
    }
}
