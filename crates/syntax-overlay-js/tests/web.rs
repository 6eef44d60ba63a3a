//! WASM browser tests for the JS-facing API.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use syntax_overlay_js::{SyntaxOverlay, auto_init, language_for_path};
use web_sys::HtmlTextAreaElement;

fn textarea(value: &str) -> HtmlTextAreaElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let textarea = document
        .create_element("textarea")
        .unwrap()
        .dyn_into::<HtmlTextAreaElement>()
        .unwrap();
    textarea.set_value(value);
    document.body().unwrap().append_child(&textarea).unwrap();
    textarea
}

#[wasm_bindgen_test]
fn test_construct_and_destroy() {
    let textarea = textarea("func f() {}");
    let mut overlay =
        SyntaxOverlay::new(textarea.clone(), Some("go".into()), JsValue::UNDEFINED).unwrap();

    assert!(overlay.is_attached());
    assert_eq!(overlay.language().as_deref(), Some("go"));
    assert!(textarea.next_element_sibling().is_some());

    overlay.destroy();
    overlay.destroy();
    assert!(!overlay.is_attached());
    assert!(textarea.next_element_sibling().is_none());
}

#[wasm_bindgen_test]
fn test_blank_language_is_absent() {
    let textarea = textarea("x");
    let mut overlay =
        SyntaxOverlay::new(textarea, Some("   ".into()), JsValue::NULL).unwrap();
    assert_eq!(overlay.language(), None);
    overlay.destroy();
}

#[wasm_bindgen_test]
fn test_auto_init_returns_array() {
    let marked = textarea("SELECT 1");
    marked.set_attribute("language", "sql").unwrap();

    let overlays = auto_init(JsValue::UNDEFINED).unwrap();
    assert!(overlays.length() >= 1);
    assert!(marked.next_element_sibling().is_some());
}

#[wasm_bindgen_test]
fn test_language_for_path() {
    assert_eq!(
        language_for_path("/etc/nginx/sites-enabled/default.conf", JsValue::UNDEFINED)
            .unwrap()
            .as_deref(),
        Some("nginx")
    );
    assert_eq!(
        language_for_path("main.go", JsValue::UNDEFINED)
            .unwrap()
            .as_deref(),
        Some("go")
    );
    assert_eq!(
        language_for_path("README", JsValue::UNDEFINED).unwrap(),
        None
    );
}
