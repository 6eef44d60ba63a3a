//! Error types for overlay operations.
//!
//! Only construction and config parsing surface errors to the host. Highlighting
//! failures are contained by `render_markup`, and surface failures after
//! construction are logged and swallowed by the controller.

use thiserror::Error;

/// Why a highlighting pass could not produce tokenized markup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HighlightError {
    /// No highlighting engine is available.
    #[error("highlighting engine unavailable")]
    Unavailable,

    /// The engine doesn't know the requested language.
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    /// The engine failed while tokenizing the content.
    #[error("malformed content: {0}")]
    Malformed(String),
}

/// Error from a platform surface primitive (DOM call, missing parent, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceError(pub String);

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SurfaceError {}

impl From<&str> for SurfaceError {
    fn from(s: &str) -> Self {
        SurfaceError(s.to_string())
    }
}

impl From<String> for SurfaceError {
    fn from(s: String) -> Self {
        SurfaceError(s)
    }
}

/// Host-facing errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum OverlayError {
    /// The overlay surface couldn't be created or inserted.
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),

    /// Invalid overlay configuration.
    #[error("invalid config: {0}")]
    Config(String),
}

impl From<serde_json::Error> for OverlayError {
    fn from(e: serde_json::Error) -> Self {
        OverlayError::Config(e.to_string())
    }
}
