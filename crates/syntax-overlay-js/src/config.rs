//! Config and language-policy entry points.

use syntax_overlay_browser::{LanguagePolicy, OverlayConfig};
use wasm_bindgen::prelude::*;

/// Parse an optional JS config object. `undefined`/`null` give the defaults.
pub(crate) fn parse_config(value: JsValue) -> Result<OverlayConfig, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(OverlayConfig::default());
    }
    let config: OverlayConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
    config
        .validate()
        .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(config)
}

/// Language tag for a file path, e.g. `"main.go"` → `"go"`.
///
/// `config.languageOverrides` entries win over the built-in table.
#[wasm_bindgen(js_name = languageForPath)]
pub fn language_for_path(path: &str, config: JsValue) -> Result<Option<String>, JsError> {
    let config = parse_config(config)?;
    Ok(config
        .language_policy()
        .language_for_path(path)
        .map(|tag| tag.as_str().to_string()))
}
