//! Note payload composition.
//!
//! Builds the YAML front matter, the fixed markdown body and the outbound
//! vault write request for one capture. The page title is deliberately
//! absent from both the front matter and the body; the note's filename is
//! where it survives.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::normalize::{sanitize_tag, trim_slashes};

/// A normalized, deduplicated tag list in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// Normalize `raw` tags with [`sanitize_tag`], drop empties and
    /// deduplicate, keeping the first occurrence's position.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags: Vec<String> = Vec::new();
        for tag in raw {
            let normalized = sanitize_tag(tag.as_ref());
            if !normalized.is_empty() && !tags.contains(&normalized) {
                tags.push(normalized);
            }
        }
        Self(tags)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// The markdown content of one captured note.
#[derive(Debug, Clone)]
pub struct NotePayload {
    pub tags: TagSet,
    pub created: String,
    pub body: String,
}

impl NotePayload {
    /// Compose the payload for a captured URL.
    ///
    /// The body is a fixed template: the URL reference line, an empty
    /// `Why` bullet for the user to annotate, and an empty `Notes` heading.
    pub fn compose(url: &str, tags: TagSet, now: DateTime<Local>) -> Self {
        let body = format!("- URL: {url}\n- Why: \n\n## Notes\n");
        Self { tags, created: now.format("%Y-%m-%d").to_string(), body }
    }

    /// Render front matter plus body as the full note text.
    ///
    /// An empty tag set renders as the explicit `tags: []` marker rather
    /// than an empty block list.
    pub fn render(&self) -> String {
        let tags_block = if self.tags.is_empty() {
            "tags: []".to_string()
        } else {
            let items: Vec<String> = self.tags.as_slice().iter().map(|t| format!("  - {t}")).collect();
            format!("tags:\n{}", items.join("\n"))
        };

        format!("---\ncreated: {}\n{}\n---\n\n{}", self.created, tags_block, self.body)
    }
}

/// One outbound write request addressed to the note vault.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VaultRequest {
    /// Vault identifier.
    pub vault: String,
    /// Relative file path inside the vault (folder prefix plus filename).
    pub path: String,
    /// Full markdown content of the note.
    pub content: String,
}

impl VaultRequest {
    /// Build the request, prefixing `filename` with the trimmed folder when
    /// one is configured.
    pub fn new(vault: &str, folder: &str, filename: &str, content: String) -> Self {
        let folder = trim_slashes(folder);
        let path = if folder.is_empty() { filename.to_string() } else { format!("{folder}/{filename}") };
        Self { vault: vault.to_string(), path, content }
    }

    /// Render the `obsidian://new` URI with percent-encoded fields.
    pub fn to_uri(&self) -> String {
        format!(
            "obsidian://new?vault={}&file={}&content={}",
            urlencoding::encode(&self.vault),
            urlencoding::encode(&self.path),
            urlencoding::encode(&self.content),
        )
    }
}
