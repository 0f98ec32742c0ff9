//! End-to-end capture orchestration.
//!
//! One capture is a short linear sequence: resolve the active page (or fall
//! back to the clipboard), derive tags from the hostname, build the target
//! filename, compose the note payload and hand a single write request to
//! the note sink. No state crosses invocations and nothing is retried; a
//! failed capture requires a fresh attempt.

use chrono::{DateTime, Local};

use crate::compose::{NotePayload, TagSet, VaultRequest};
use crate::domain::domain_tag;
use crate::error::{ClipvaultError, Result};
use crate::filename::{DEFAULT_TEMPLATE, build_filename};
use crate::normalize::split_tags;
use crate::resolver::{ClipboardRead, PageInfo, TabSource, derive_title, resolve};
use crate::urls::{hostname, is_http_url};

/// Immutable preferences for one capture, supplied by the caller.
///
/// Modeled as an explicit struct rather than ambient state so the pipeline
/// stays testable without a host environment.
#[derive(Debug, Clone)]
pub struct CapturePreferences {
    /// Vault identifier. Required, non-empty after trim.
    pub vault: String,
    /// Optional folder prefix inside the vault.
    pub folder: String,
    /// Raw default tag list, comma/whitespace separated.
    pub default_tags: String,
    /// Whether to append a tag derived from the page's hostname.
    pub use_domain_tag: bool,
    /// Filename template; empty falls back to [`DEFAULT_TEMPLATE`].
    pub filename_template: String,
}

impl Default for CapturePreferences {
    fn default() -> Self {
        Self {
            vault: String::new(),
            folder: String::new(),
            default_tags: "bookmark,inbox".to_string(),
            use_domain_tag: true,
            filename_template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

/// Accepts the single outbound write request for a capture.
pub trait NoteSink {
    fn deliver(&self, request: &VaultRequest) -> Result<()>;
}

/// The result of a successful capture.
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    pub page: PageInfo,
    pub request: VaultRequest,
}

/// Resolve the page to capture: browsers first, clipboard second.
///
/// A clipboard hit has no title of its own; the placeholder title (hostname
/// or `"Untitled"`) fills in, as it does for a browser tab that reported an
/// empty title.
pub fn resolve_page(
    frontmost_app: &str,
    sources: &[Box<dyn TabSource>],
    clipboard: &dyn ClipboardRead,
) -> Result<PageInfo> {
    let mut page = resolve(frontmost_app, sources);

    if page.is_none()
        && let Some(clip) = clipboard.read_text()
        && is_http_url(&clip)
    {
        tracing::debug!("no browser yielded a tab, using clipboard URL");
        page = Some(PageInfo { url: clip.trim().to_string(), title: String::new(), source_app: None });
    }

    let mut page = page.ok_or(ClipvaultError::NoUrlResolved)?;
    if page.title.is_empty() {
        page.title = derive_title(&page.url);
    }
    Ok(page)
}

/// Compose the vault write request for an already-resolved page.
///
/// Validates the vault preference, derives and normalizes the tag set,
/// expands the filename template and renders the note. Pure apart from the
/// clock value passed in.
pub fn compose_request(prefs: &CapturePreferences, page: &PageInfo, now: DateTime<Local>) -> Result<VaultRequest> {
    let vault = prefs.vault.trim();
    if vault.is_empty() {
        return Err(ClipvaultError::MissingConfiguration("Vault name"));
    }

    let domain = hostname(&page.url);

    let mut raw_tags = split_tags(prefs.default_tags.trim());
    if prefs.use_domain_tag && !domain.is_empty() {
        let tag = domain_tag(&domain);
        if !tag.is_empty() {
            raw_tags.push(tag);
        }
    }
    let tags = TagSet::from_raw(&raw_tags);

    let template = prefs.filename_template.trim();
    let template = if template.is_empty() { DEFAULT_TEMPLATE } else { template };
    let filename = build_filename(template, &page.title, &domain, now);

    let payload = NotePayload::compose(&page.url, tags, now);
    Ok(VaultRequest::new(vault, prefs.folder.trim(), &filename, payload.render()))
}

/// Run one full capture: resolve, compose and deliver.
///
/// Delivery is fire-and-forget; a sink failure surfaces as an internal
/// error whose detail belongs in the log, not in front of the user.
pub fn capture(
    prefs: &CapturePreferences,
    frontmost_app: &str,
    sources: &[Box<dyn TabSource>],
    clipboard: &dyn ClipboardRead,
    sink: &dyn NoteSink,
    now: DateTime<Local>,
) -> Result<CaptureOutcome> {
    // Abort on missing configuration before any external call.
    if prefs.vault.trim().is_empty() {
        return Err(ClipvaultError::MissingConfiguration("Vault name"));
    }

    let page = resolve_page(frontmost_app, sources, clipboard)?;
    let request = compose_request(prefs, &page, now)?;
    sink.deliver(&request)?;
    Ok(CaptureOutcome { page, request })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct NoClipboard;

    impl ClipboardRead for NoClipboard {
        fn read_text(&self) -> Option<String> {
            None
        }
    }

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 10, 30, 45).unwrap()
    }

    fn page(url: &str, title: &str) -> PageInfo {
        PageInfo { url: url.to_string(), title: title.to_string(), source_app: None }
    }

    #[test]
    fn test_compose_request_requires_vault() {
        let prefs = CapturePreferences { vault: "   ".to_string(), ..Default::default() };
        let err = compose_request(&prefs, &page("https://example.com", "T"), fixed_now()).unwrap_err();
        assert!(matches!(err, ClipvaultError::MissingConfiguration(_)));
    }

    #[test]
    fn test_compose_request_defaults() {
        let prefs = CapturePreferences { vault: "Notes".to_string(), ..Default::default() };
        let req = compose_request(&prefs, &page("https://github.com/acme/repo", "Acme Repo"), fixed_now()).unwrap();
        assert_eq!(req.vault, "Notes");
        assert_eq!(req.path, "acme-repo");
        assert!(req.content.contains("  - bookmark\n  - inbox\n  - github"));
    }

    #[test]
    fn test_compose_request_domain_tag_off() {
        let prefs = CapturePreferences {
            vault: "Notes".to_string(),
            use_domain_tag: false,
            ..Default::default()
        };
        let req = compose_request(&prefs, &page("https://github.com/acme/repo", "Acme Repo"), fixed_now()).unwrap();
        assert!(!req.content.contains("github"));
    }

    #[test]
    fn test_compose_request_empty_template_falls_back() {
        let prefs = CapturePreferences {
            vault: "Notes".to_string(),
            filename_template: "  ".to_string(),
            ..Default::default()
        };
        let req = compose_request(&prefs, &page("https://example.com", "Hello World"), fixed_now()).unwrap();
        assert_eq!(req.path, "hello-world");
    }

    #[test]
    fn test_resolve_page_no_sources_no_clipboard() {
        let sources: Vec<Box<dyn TabSource>> = Vec::new();
        let err = resolve_page("", &sources, &NoClipboard).unwrap_err();
        assert!(matches!(err, ClipvaultError::NoUrlResolved));
    }

    #[test]
    fn test_resolve_page_clipboard_fallback() {
        struct UrlClipboard;
        impl ClipboardRead for UrlClipboard {
            fn read_text(&self) -> Option<String> {
                Some("https://example.com/from-clipboard\n".to_string())
            }
        }

        let sources: Vec<Box<dyn TabSource>> = Vec::new();
        let page = resolve_page("", &sources, &UrlClipboard).unwrap();
        assert_eq!(page.url, "https://example.com/from-clipboard");
        assert_eq!(page.title, "example.com");
        assert!(page.source_app.is_none());
    }

    #[test]
    fn test_resolve_page_clipboard_not_a_url() {
        struct TextClipboard;
        impl ClipboardRead for TextClipboard {
            fn read_text(&self) -> Option<String> {
                Some("grocery list".to_string())
            }
        }

        let sources: Vec<Box<dyn TabSource>> = Vec::new();
        let err = resolve_page("", &sources, &TextClipboard).unwrap_err();
        assert!(matches!(err, ClipvaultError::NoUrlResolved));
    }

    #[test]
    fn test_capture_missing_vault_aborts_before_resolution() {
        struct PanicClipboard;
        impl ClipboardRead for PanicClipboard {
            fn read_text(&self) -> Option<String> {
                panic!("clipboard must not be read when configuration is missing");
            }
        }
        struct PanicSink;
        impl NoteSink for PanicSink {
            fn deliver(&self, _request: &VaultRequest) -> Result<()> {
                panic!("sink must not be reached");
            }
        }

        let prefs = CapturePreferences { vault: String::new(), ..Default::default() };
        let sources: Vec<Box<dyn TabSource>> = Vec::new();
        let err = capture(&prefs, "", &sources, &PanicClipboard, &PanicSink, fixed_now()).unwrap_err();
        assert!(matches!(err, ClipvaultError::MissingConfiguration(_)));
    }
}
