//! syntax-overlay-core: textarea highlight overlay logic without DOM dependencies.
//!
//! This crate provides:
//! - `TextSurface` / `OverlaySurface` traits for the editable control and its overlay
//! - `OverlayController` - binds one text surface to one overlay, keeps them in sync
//! - `Highlighter` trait with a syntect-backed engine and a plain-text fallback
//! - `LanguagePolicy` for picking a language tag from a file path
//! - Geometry, style and indentation helpers, all unit-testable without a browser

pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod indent;
pub mod language;
pub mod style;
pub mod surface;

#[cfg(all(
    feature = "theme-css",
    not(all(target_family = "wasm", target_os = "unknown"))
))]
pub mod theme;

pub use config::OverlayConfig;
pub use controller::{KeyOutcome, OverlayController, attach_all};
pub use error::{HighlightError, OverlayError, SurfaceError};
pub use geometry::{Rect, ScrollOffset};
pub use highlight::{
    CSS_PREFIX, FnHighlighter, Highlighter, Markup, NoHighlighter, SyntectHighlighter,
    highlight_fn, render_markup,
};
pub use indent::{IndentEdit, TextSelection, insert_indent};
pub use language::{ExtensionPolicy, LanguagePolicy, LanguageTag, PLAIN_TEXT_CLASS};
pub use smol_str::SmolStr;
pub use style::{StyleDeclarations, StyleFallbacks, SurfaceStyle, overlay_declarations};
pub use surface::{KeyPress, OverlaySurface, TextSurface};
