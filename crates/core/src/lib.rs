#[cfg(feature = "ai")]
pub mod ai;
pub mod capture;
pub mod compose;
pub mod domain;
pub mod error;
pub mod filename;
pub mod normalize;
pub mod resolver;
pub mod sources;
pub mod urls;

#[cfg(feature = "ai")]
pub use ai::{AiConfig, ask, chat, summarize, translate};
pub use capture::{CaptureOutcome, CapturePreferences, NoteSink, capture, compose_request, resolve_page};
pub use compose::{NotePayload, TagSet, VaultRequest};
pub use domain::domain_tag;
pub use error::{ClipvaultError, Result};
pub use filename::{DEFAULT_TEMPLATE, build_filename};
pub use normalize::{sanitize_tag, slugify, split_tags, trim_slashes};
pub use resolver::{ClipboardRead, KNOWN_BROWSERS, PageInfo, TabSource, derive_title, prioritize, resolve};
pub use sources::{SystemClipboard, UriOpener, default_sources, frontmost_app, run_applescript};
pub use urls::{hostname, is_http_url};
