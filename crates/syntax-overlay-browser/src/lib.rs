//! Browser DOM layer for the textarea highlight overlay.
//!
//! This crate implements the core surface traits over real DOM nodes and
//! wires browser events to the overlay controller. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `surface`: `TextareaSurface` and the `<pre><code>` overlay element
//! - `events`: keyboard event extraction
//! - `binding`: event listeners driving one controller
//! - `discovery`: finding and wrapping marked textareas
//! - `offsets`: UTF-16 ↔ char offset conversion
//!
//! # Re-exports
//!
//! This crate re-exports `syntax-overlay-core` for convenience, so consumers
//! only need to depend on `syntax-overlay-browser`.

// Re-export core crate
pub use syntax_overlay_core;
pub use syntax_overlay_core::*;

pub mod binding;
pub mod discovery;
pub mod events;
pub mod offsets;
pub mod surface;

pub use binding::{DomController, OverlayBinding};
pub use discovery::{ATTACHED_ATTRIBUTE, auto_attach, find_marked_textareas};
pub use events::key_press_from_event;
pub use surface::{DomOverlay, OVERLAY_CLASS, TextareaSurface};
