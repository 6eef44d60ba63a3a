//! Browser event extraction.

use syntax_overlay_core::KeyPress;
use web_sys::KeyboardEvent;

/// Snapshot the parts of a `keydown` the controller looks at.
pub fn key_press_from_event(event: &KeyboardEvent) -> KeyPress {
    KeyPress {
        key: event.key().into(),
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
        composing: event.is_composing(),
    }
}
