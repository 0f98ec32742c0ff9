//! macOS collaborators: AppleScript tab queries, clipboard and URI opening.
//!
//! Everything here shells out (`osascript`, `pbpaste`, `open`), so it
//! compiles on any platform and simply reports failure where the tools are
//! missing. The resolver's per-source failure absorption turns that into
//! "no result" rather than an aborted capture.

use std::process::Command;

use crate::capture::NoteSink;
use crate::compose::VaultRequest;
use crate::error::{ClipvaultError, Result};
use crate::resolver::{ClipboardRead, TabSource};

/// Run an AppleScript snippet via `osascript -e`, returning trimmed stdout
/// on success and the stderr text as the error.
pub fn run_applescript(script: &str) -> std::result::Result<String, String> {
    let output = Command::new("osascript")
        .arg("-e")
        .arg(script)
        .output()
        .map_err(|error| format!("failed to execute osascript: {error}"))?;
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(String::from_utf8_lossy(&output.stderr).trim().to_string())
    }
}

/// Name of the frontmost application, or `None` when it cannot be queried.
pub fn frontmost_app() -> Option<String> {
    let script = r#"tell application "System Events" to get name of first process whose frontmost is true"#;
    match run_applescript(script) {
        Ok(name) if !name.is_empty() => Some(name),
        Ok(_) => None,
        Err(reason) => {
            tracing::debug!(%reason, "frontmost application query failed");
            None
        }
    }
}

/// Parse the `URL\ntitle` payload the tab scripts return. An empty payload
/// means the browser had no usable tab.
fn parse_tab_payload(out: &str) -> Option<(String, String)> {
    if out.is_empty() {
        return None;
    }
    let mut lines = out.lines();
    let url = lines.next().unwrap_or_default().trim().to_string();
    let title = lines.collect::<Vec<_>>().join(" ").trim().to_string();
    if url.is_empty() { None } else { Some((url, title)) }
}

/// Safari's frontmost-document accessor.
pub struct SafariTabs;

impl TabSource for SafariTabs {
    fn app_name(&self) -> &str {
        "Safari"
    }

    fn front_tab(&self) -> std::result::Result<Option<(String, String)>, String> {
        let script = r#"
            tell application "Safari"
              if (exists front document) then
                set theURL to URL of front document
                set theTitle to name of front document
                if theURL is missing value then return ""
                return theURL & "\n" & theTitle
              else
                return ""
              end if
            end tell
        "#;
        run_applescript(script).map(|out| parse_tab_payload(&out))
    }
}

/// Active-tab accessor shared by the Chromium family (Google Chrome,
/// Brave Browser, Microsoft Edge).
pub struct ChromiumTabs {
    app: &'static str,
}

impl ChromiumTabs {
    pub fn new(app: &'static str) -> Self {
        Self { app }
    }
}

impl TabSource for ChromiumTabs {
    fn app_name(&self) -> &str {
        self.app
    }

    fn front_tab(&self) -> std::result::Result<Option<(String, String)>, String> {
        let script = format!(
            r#"
            tell application "{}"
              if (exists front window) then
                set theTab to active tab of front window
                set theURL to URL of theTab
                set theTitle to title of theTab
                if theURL is missing value then return ""
                return theURL & "\n" & theTitle
              else
                return ""
              end if
            end tell
        "#,
            self.app
        );
        run_applescript(&script).map(|out| parse_tab_payload(&out))
    }
}

/// Arc's active-tab accessor. Arc errors instead of reporting a missing
/// front window, so the script wraps the query in its own try block.
pub struct ArcTabs;

impl TabSource for ArcTabs {
    fn app_name(&self) -> &str {
        "Arc"
    }

    fn front_tab(&self) -> std::result::Result<Option<(String, String)>, String> {
        let script = r#"
            tell application "Arc"
              try
                set theTab to active tab of front window
                set theURL to URL of theTab
                set theTitle to title of theTab
                if theURL is missing value then return ""
                return theURL & "\n" & theTitle
              on error
                return ""
              end try
            end tell
        "#;
        run_applescript(script).map(|out| parse_tab_payload(&out))
    }
}

/// The supported browsers in default priority order.
pub fn default_sources() -> Vec<Box<dyn TabSource>> {
    vec![
        Box::new(SafariTabs),
        Box::new(ChromiumTabs::new("Google Chrome")),
        Box::new(ArcTabs),
        Box::new(ChromiumTabs::new("Brave Browser")),
        Box::new(ChromiumTabs::new("Microsoft Edge")),
    ]
}

/// Plain-text clipboard reader backed by `pbpaste`.
pub struct SystemClipboard;

impl ClipboardRead for SystemClipboard {
    fn read_text(&self) -> Option<String> {
        let output = Command::new("pbpaste").output().ok()?;
        if !output.status.success() {
            return None;
        }
        let text = String::from_utf8_lossy(&output.stdout).to_string();
        if text.is_empty() { None } else { Some(text) }
    }
}

/// Delivers a [`VaultRequest`] by handing its URI to the system opener.
/// Fire-and-forget: a zero exit status is the only acknowledgement.
pub struct UriOpener;

impl NoteSink for UriOpener {
    fn deliver(&self, request: &VaultRequest) -> Result<()> {
        let uri = request.to_uri();
        let status = Command::new("open")
            .arg(&uri)
            .status()
            .map_err(|error| ClipvaultError::Internal(format!("failed to execute open: {error}")))?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipvaultError::Internal(format!("open exited with {status}")))
        }
    }
}
