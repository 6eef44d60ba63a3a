//! SyntaxOverlay - one highlighted textarea, as seen from JavaScript.

use syntax_overlay_browser::{LanguageTag, OverlayBinding, SyntectHighlighter, auto_attach};
use wasm_bindgen::prelude::*;
use web_sys::HtmlTextAreaElement;

use crate::config::parse_config;

/// A highlight overlay bound to one textarea.
///
/// Freeing the object from JS stops event handling but leaves the overlay
/// element in place; call `destroy()` first to remove it.
#[wasm_bindgen]
pub struct SyntaxOverlay {
    binding: OverlayBinding<SyntectHighlighter>,
}

#[wasm_bindgen]
impl SyntaxOverlay {
    /// Wrap `textarea` with an overlay highlighted as `language`.
    ///
    /// An unknown or missing language renders plain text.
    #[wasm_bindgen(constructor)]
    pub fn new(
        textarea: HtmlTextAreaElement,
        language: Option<String>,
        config: JsValue,
    ) -> Result<SyntaxOverlay, JsError> {
        let config = parse_config(config)?;
        let binding = OverlayBinding::attach(
            textarea,
            LanguageTag::parse(language.as_deref()),
            SyntectHighlighter::default(),
            &config,
        )
        .map_err(|e| JsError::new(&format!("Failed to attach overlay: {}", e)))?;
        Ok(Self { binding })
    }

    /// Remove the overlay and stop listening. Safe to call more than once.
    pub fn destroy(&mut self) {
        self.binding.destroy();
    }

    /// Re-highlight, e.g. after setting `textarea.value` from script.
    pub fn refresh(&self) {
        self.binding.refresh();
    }

    /// Re-sync geometry and style after a layout change.
    pub fn reposition(&self) {
        self.binding.reposition();
    }

    #[wasm_bindgen(getter)]
    pub fn language(&self) -> Option<String> {
        self.binding.language().map(|tag| tag.as_str().to_string())
    }

    #[wasm_bindgen(getter, js_name = isAttached)]
    pub fn is_attached(&self) -> bool {
        self.binding.is_attached()
    }

    #[wasm_bindgen(getter)]
    pub fn textarea(&self) -> Option<HtmlTextAreaElement> {
        self.binding.textarea()
    }
}

/// Wrap every textarea marked with the configured attribute.
///
/// Already-wrapped textareas are skipped, so this can be called again after
/// new content is added.
#[wasm_bindgen(js_name = autoInit)]
pub fn auto_init(config: JsValue) -> Result<js_sys::Array, JsError> {
    let config = parse_config(config)?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsError::new("No document available"))?;

    let overlays = js_sys::Array::new();
    for binding in auto_attach(&document, SyntectHighlighter::default(), &config) {
        overlays.push(&JsValue::from(SyntaxOverlay { binding }));
    }
    Ok(overlays)
}
