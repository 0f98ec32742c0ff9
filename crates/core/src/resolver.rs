//! Active page resolution.
//!
//! Queries an ordered list of browser tab sources for the frontmost tab,
//! short-circuiting on the first classifiable URL. Sources are strategies
//! sharing one capability ([`TabSource`]); each candidate's failure is
//! absorbed so a crashed or unscriptable browser never aborts the capture.
//! Candidates are queried strictly sequentially: only the first success
//! matters, and concurrent automation queries against multiple applications
//! invite focus and permission side effects.

use serde::Serialize;

use crate::urls::{hostname, is_http_url};

/// Default browser priority when the frontmost application is not a known
/// browser (or is already first).
pub const KNOWN_BROWSERS: &[&str] =
    &["Safari", "Google Chrome", "Arc", "Brave Browser", "Microsoft Edge"];

/// The frontmost tab of one browser, as reported by its automation query.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageInfo {
    pub url: String,
    pub title: String,
    pub source_app: Option<String>,
}

/// A single browser's frontmost-tab accessor.
///
/// Implementations query one application and report `Ok(None)` when it has
/// no usable tab. Errors are treated identically to `Ok(None)` by the
/// resolver; the distinction only matters for logging.
pub trait TabSource {
    /// The application name this source queries, as used for prioritization.
    fn app_name(&self) -> &str;

    /// Query the frontmost tab. `Err` means the collaborator itself failed
    /// (not running, not scriptable, permission denied).
    fn front_tab(&self) -> Result<Option<(String, String)>, String>;
}

/// Reads the system clipboard as plain text. Used as the caller-level
/// fallback when no browser yields a URL.
pub trait ClipboardRead {
    fn read_text(&self) -> Option<String>;
}

/// Move `focus` to the front of `items` when present (and not already
/// first); otherwise return the default order untouched.
pub fn prioritize<'a>(focus: &str, items: &[&'a str]) -> Vec<&'a str> {
    let mut list: Vec<&str> = items.to_vec();
    if let Some(idx) = list.iter().position(|item| *item == focus)
        && idx > 0
    {
        let item = list.remove(idx);
        list.insert(0, item);
    }
    list
}

/// Resolve the active page by querying `sources` in priority order.
///
/// The frontmost application's source (if known) is tried first, then the
/// remaining sources in their default order. The first source returning a
/// non-empty, classifier-valid URL wins. Returns `None` when every source
/// fails or yields nothing.
pub fn resolve(frontmost_app: &str, sources: &[Box<dyn TabSource>]) -> Option<PageInfo> {
    let names: Vec<&str> = sources.iter().map(|s| s.app_name()).collect();
    let ordered = prioritize(frontmost_app, &names);

    for name in ordered {
        let Some(source) = sources.iter().find(|s| s.app_name() == name) else {
            continue;
        };
        match source.front_tab() {
            Ok(Some((url, title))) if is_http_url(&url) => {
                return Some(PageInfo {
                    url: url.trim().to_string(),
                    title: title.trim().to_string(),
                    source_app: Some(name.to_string()),
                });
            }
            Ok(_) => {}
            Err(reason) => {
                tracing::debug!(app = name, %reason, "tab query failed, trying next browser");
            }
        }
    }
    None
}

/// Placeholder title for a URL with no usable title: the hostname, or
/// `"Untitled"` when none can be extracted.
pub fn derive_title(url: &str) -> String {
    let host = hostname(url);
    if host.is_empty() { "Untitled".to_string() } else { host }
}
