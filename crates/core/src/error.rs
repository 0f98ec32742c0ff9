//! Error types for clipvault operations.
//!
//! This module defines the main error type [`ClipvaultError`] which represents
//! all failures a capture or chat-completion call can surface. Individual
//! browser-query failures are deliberately absent: the resolver absorbs them
//! and moves on to the next candidate instead of propagating.

use thiserror::Error;

/// Main error type for capture and chat-completion operations.
///
/// Only three kinds of failure ever reach the user: a missing required
/// preference, an unresolvable URL, and a generic internal failure. The
/// internal variant carries detail for logging; callers are expected to
/// report it to the user as a generic message.
#[derive(Error, Debug)]
pub enum ClipvaultError {
    /// A required preference is absent or empty.
    ///
    /// The capture aborts before any external call is made.
    #[error("{0} is required")]
    MissingConfiguration(&'static str),

    /// Every browser query and the clipboard fallback failed to yield a
    /// classifiable URL.
    #[error("No URL found. Open a page or copy a URL")]
    NoUrlResolved,

    /// HTTP request errors from reqwest.
    #[cfg(feature = "ai")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The chat-completion endpoint returned an unusable response.
    #[cfg(feature = "ai")]
    #[error("API error: {0}")]
    ApiError(String),

    /// Any other failure during a capture.
    ///
    /// The detail is meant for logs, not for the user.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for ClipvaultError.
pub type Result<T> = std::result::Result<T, ClipvaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configuration_display() {
        let err = ClipvaultError::MissingConfiguration("Vault name");
        assert_eq!(err.to_string(), "Vault name is required");
    }

    #[test]
    fn test_no_url_display() {
        let err = ClipvaultError::NoUrlResolved;
        assert!(err.to_string().contains("No URL found"));
    }

    #[test]
    fn test_internal_display() {
        let err = ClipvaultError::Internal("osascript exploded".to_string());
        assert!(err.to_string().contains("osascript exploded"));
    }
}
