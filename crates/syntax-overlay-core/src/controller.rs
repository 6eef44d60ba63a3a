//! The highlight overlay controller.
//!
//! Binds one `TextSurface` to one `OverlaySurface` for its whole lifetime.
//! Position sync, scroll sync and highlighting are independent operations on
//! the controller record; the platform layer calls them from its event
//! handlers (`input` → `highlight`, `scroll` → `sync_scroll`, `resize` →
//! `reposition`, `keydown` → `handle_key`).
//!
//! After `destroy` the overlay is gone and every operation is a no-op.

use crate::config::OverlayConfig;
use crate::error::SurfaceError;
use crate::highlight::{Highlighter, Markup, render_markup};
use crate::indent::{TextSelection, insert_indent};
use crate::language::LanguageTag;
use crate::style::{StyleFallbacks, overlay_declarations};
use crate::surface::{KeyPress, OverlaySurface, TextSurface};

/// What the platform should do with a key event after the controller saw it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Handled, prevent the default browser behaviour.
    Handled,
    /// Not ours, let the platform handle it.
    PassThrough,
}

pub struct OverlayController<T, O, H> {
    text: T,
    overlay: Option<O>,
    language: Option<LanguageTag>,
    highlighter: H,
    indent: String,
    fallbacks: StyleFallbacks,
}

impl<T, O, H> OverlayController<T, O, H>
where
    T: TextSurface,
    O: OverlaySurface,
    H: Highlighter,
{
    /// Bind `overlay` to `text` and bring it in sync.
    ///
    /// The overlay must already be inserted right after the text surface.
    /// Copies the text surface's style, positions the overlay over it and
    /// renders the current content. Never fails: surface errors are logged,
    /// and an unknown language just renders as plain text.
    pub fn new(
        text: T,
        overlay: O,
        language: Option<LanguageTag>,
        highlighter: H,
        config: &OverlayConfig,
    ) -> Self {
        let mut controller = Self {
            text,
            overlay: Some(overlay),
            language,
            highlighter,
            indent: config.indent.clone(),
            fallbacks: config.style_fallbacks.clone(),
        };

        tracing::debug!(
            language = ?controller.language.as_ref().map(LanguageTag::as_str),
            "attaching highlight overlay"
        );

        controller.sync_style();
        controller.reposition();
        controller.highlight();
        controller
    }

    pub fn language(&self) -> Option<&LanguageTag> {
        self.language.as_ref()
    }

    pub fn text_surface(&self) -> &T {
        &self.text
    }

    /// The overlay, or `None` after `destroy`.
    pub fn overlay(&self) -> Option<&O> {
        self.overlay.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.overlay.as_ref().is_some_and(|o| o.is_attached())
    }

    /// Copy the text surface's box and font properties onto the overlay.
    pub fn sync_style(&mut self) {
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        let declarations = overlay_declarations(&self.text.style(), &self.fallbacks);
        if let Err(e) = overlay.apply_styles(&declarations) {
            tracing::warn!(error = %e, "failed to apply overlay styles");
        }
    }

    /// Re-render the overlay from the text surface's current content.
    pub fn highlight(&mut self) {
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        let text = self.text.text();
        let markup = render_markup(&self.highlighter, &text, self.language.as_ref());
        tracing::trace!(
            chars = text.len(),
            highlighted = markup.highlighted,
            "rendered overlay"
        );
        if let Err(e) = overlay.set_markup(&markup) {
            tracing::warn!(error = %e, "failed to update overlay markup");
        }
    }

    /// Render without touching the overlay (what `highlight` would show).
    pub fn render(&self) -> Markup {
        render_markup(&self.highlighter, &self.text.text(), self.language.as_ref())
    }

    /// Mirror the text surface's scroll offsets onto the overlay.
    pub fn sync_scroll(&mut self) {
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        overlay.set_scroll(self.text.scroll_offset());
    }

    /// Place the overlay exactly over the text surface's current box.
    pub fn reposition(&mut self) {
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        let rect = self.text.bounding_rect().to_page(self.text.page_scroll());
        if let Err(e) = overlay.set_rect(rect) {
            tracing::warn!(error = %e, "failed to position overlay");
        }
    }

    /// Intercept plain Tab: insert an indent instead of moving focus.
    pub fn handle_key(&mut self, key: &KeyPress) -> KeyOutcome {
        if self.overlay.is_none() || !key.is_indent() {
            return KeyOutcome::PassThrough;
        }

        if let Err(e) = self.apply_indent() {
            // The default is still suppressed so focus doesn't jump away
            // mid-edit; the text is left as the platform reported it.
            tracing::warn!(error = %e, "failed to insert indent");
        }
        KeyOutcome::Handled
    }

    fn apply_indent(&mut self) -> Result<(), SurfaceError> {
        let edit = insert_indent(&self.text.text(), self.text.selection(), &self.indent);
        self.text.set_text(&edit.text)?;
        self.text.set_selection(TextSelection::caret(edit.caret))?;
        // Programmatic edits don't fire the content-changed signal everywhere.
        self.highlight();
        Ok(())
    }

    /// Remove the overlay. Safe to call any number of times.
    pub fn destroy(&mut self) {
        if let Some(mut overlay) = self.overlay.take() {
            tracing::debug!("detaching highlight overlay");
            overlay.remove();
        }
    }
}

/// Wrap every marked text surface with a controller.
///
/// `surfaces` pairs each text surface with the value of its language marker.
/// `make_overlay` creates and inserts the overlay for a surface; surfaces for
/// which it fails are logged and skipped.
pub fn attach_all<T, O, H, I, F>(
    surfaces: I,
    highlighter: H,
    config: &OverlayConfig,
    mut make_overlay: F,
) -> Vec<OverlayController<T, O, H>>
where
    T: TextSurface,
    O: OverlaySurface,
    H: Highlighter + Clone,
    I: IntoIterator<Item = (T, Option<LanguageTag>)>,
    F: FnMut(&T) -> Result<O, SurfaceError>,
{
    surfaces
        .into_iter()
        .filter_map(|(text, language)| match make_overlay(&text) {
            Ok(overlay) => Some(OverlayController::new(
                text,
                overlay,
                language,
                highlighter.clone(),
                config,
            )),
            Err(e) => {
                tracing::warn!(error = %e, "skipping text surface, overlay not created");
                None
            }
        })
        .collect()
}
