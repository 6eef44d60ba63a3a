//! Finding and wrapping marked textareas.

use syntax_overlay_core::{Highlighter, LanguageTag, OverlayConfig, attach_all};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlTextAreaElement};

use crate::binding::OverlayBinding;
use crate::surface::{DomOverlay, TextareaSurface};

/// Set on a textarea while an overlay is bound to it.
pub const ATTACHED_ATTRIBUTE: &str = "data-syntax-overlay";

/// CSS selector matching every opted-in textarea.
fn marker_selector(config: &OverlayConfig) -> String {
    let mut selector = format!("textarea[{}]", config.marker_attribute.trim());
    if let Some(legacy) = config.legacy_marker.as_deref() {
        selector.push_str(&format!(", textarea[is=\"{}\"]", legacy));
    }
    selector
}

/// Textareas carrying the marker attribute (or the legacy `is` marker)
/// that don't have an overlay yet, in document order, each with its
/// declared language.
pub fn find_marked_textareas(
    document: &Document,
    config: &OverlayConfig,
) -> Vec<(HtmlTextAreaElement, Option<LanguageTag>)> {
    let selector = marker_selector(config);
    let nodes = match document.query_selector_all(&selector) {
        Ok(nodes) => nodes,
        Err(e) => {
            tracing::warn!(selector = %selector, error = ?e, "invalid marker selector");
            return Vec::new();
        }
    };

    let mut found = Vec::new();
    for i in 0..nodes.length() {
        let Some(textarea) = nodes
            .item(i)
            .and_then(|node| node.dyn_into::<HtmlTextAreaElement>().ok())
        else {
            continue;
        };
        if textarea.has_attribute(ATTACHED_ATTRIBUTE) {
            continue;
        }
        let language =
            LanguageTag::parse(textarea.get_attribute(config.marker_attribute.trim()).as_deref());
        found.push((textarea, language));
    }
    found
}

/// Wrap every marked textarea in `document` with an overlay.
///
/// Textareas that can't be wrapped are logged and skipped. Textareas that
/// already have an overlay are left alone, so calling this again after
/// adding content only picks up the new ones.
pub fn auto_attach<H>(
    document: &Document,
    highlighter: H,
    config: &OverlayConfig,
) -> Vec<OverlayBinding<H>>
where
    H: Highlighter + Clone + 'static,
{
    let surfaces = find_marked_textareas(document, config)
        .into_iter()
        .map(|(textarea, language)| (TextareaSurface::new(textarea), language));

    let controllers = attach_all(surfaces, highlighter, config, |text| {
        DomOverlay::create_after(text.element())
    });

    let bindings: Vec<_> = controllers
        .into_iter()
        .filter_map(|controller| match OverlayBinding::from_controller(controller) {
            Ok(binding) => Some(binding),
            Err(e) => {
                tracing::warn!(error = %e, "failed to bind overlay");
                None
            }
        })
        .collect();

    tracing::info!(count = bindings.len(), "attached highlight overlays");
    bindings
}
