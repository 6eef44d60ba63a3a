//! WASM bindings for the textarea highlight overlay.
//!
//! Exposes a `SyntaxOverlay` class for wrapping one textarea, plus
//! `autoInit` for wrapping every marked textarea on the page.

mod config;
mod overlay;

pub use config::*;
pub use overlay::*;

use wasm_bindgen::prelude::*;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    init_tracing();
}

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
fn init_tracing() {
    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    // A host may have installed its own subscriber already.
    let _ = set_global_default(Registry::default().with(wasm_layer));
}

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
fn init_tracing() {}
