//! Event wiring for one overlay.
//!
//! The controller lives behind `Rc<RefCell<..>>` shared with its listeners.
//! Handlers use `try_borrow_mut` and drop the event if the controller is
//! already borrowed, which happens when a programmatic edit inside a
//! handler synchronously fires another event.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use syntax_overlay_core::{
    Highlighter, KeyOutcome, LanguageTag, OverlayConfig, OverlayController, OverlayError,
    SurfaceError, SyntectHighlighter,
};
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlTextAreaElement, KeyboardEvent};

use crate::discovery::ATTACHED_ATTRIBUTE;
use crate::events::key_press_from_event;
use crate::surface::{DomOverlay, TextareaSurface};

/// Controller over a real textarea and its DOM overlay.
pub type DomController<H> = OverlayController<TextareaSurface, DomOverlay, H>;

type SharedController<H> = Rc<RefCell<DomController<H>>>;

/// A live overlay: the controller plus the listeners that drive it.
///
/// Dropping the binding removes the listeners but leaves the overlay in
/// the DOM; call `destroy` to remove both.
pub struct OverlayBinding<H: 'static = SyntectHighlighter> {
    controller: SharedController<H>,
    listeners: Vec<EventListener>,
}

impl<H: Highlighter + 'static> OverlayBinding<H> {
    /// Create the overlay after `textarea` and start listening.
    pub fn attach(
        textarea: HtmlTextAreaElement,
        language: Option<LanguageTag>,
        highlighter: H,
        config: &OverlayConfig,
    ) -> Result<Self, OverlayError> {
        let overlay = DomOverlay::create_after(&textarea)?;
        let controller = OverlayController::new(
            TextareaSurface::new(textarea),
            overlay,
            language,
            highlighter,
            config,
        );
        Self::from_controller(controller)
    }

    /// Start listening for an already-built controller.
    pub fn from_controller(mut controller: DomController<H>) -> Result<Self, OverlayError> {
        let Some(window) = web_sys::window() else {
            controller.destroy();
            return Err(SurfaceError::from("no window").into());
        };

        let textarea = controller.text_surface().element().clone();
        let controller = Rc::new(RefCell::new(controller));

        let listeners = vec![
            listen(&textarea, "input", &controller, |c, _| c.highlight()),
            listen(&textarea, "scroll", &controller, |c, _| c.sync_scroll()),
            listen(&window, "resize", &controller, |c, _| c.reposition()),
            listen_keydown(&textarea, &controller),
        ];

        if let Err(e) = textarea.set_attribute(ATTACHED_ATTRIBUTE, "") {
            tracing::debug!(error = ?e, "failed to mark textarea as attached");
        }

        Ok(Self {
            controller,
            listeners,
        })
    }

    /// Remove the overlay and stop listening. Idempotent.
    ///
    /// If the controller is busy nothing is torn down, so a later call
    /// still finds the binding whole.
    pub fn destroy(&mut self) {
        let Ok(mut controller) = self.controller.try_borrow_mut() else {
            tracing::warn!("destroy called while the overlay was busy");
            return;
        };
        if controller.overlay().is_some() {
            if let Err(e) = controller
                .text_surface()
                .element()
                .remove_attribute(ATTACHED_ATTRIBUTE)
            {
                tracing::debug!(error = ?e, "failed to unmark textarea");
            }
        }
        controller.destroy();
        drop(controller);
        self.listeners.clear();
    }

    /// Re-render from the textarea's current content.
    pub fn refresh(&self) {
        self.with_controller(|c| c.highlight());
    }

    /// Re-copy styles and re-place the overlay, for layout changes that
    /// don't fire `resize`.
    pub fn reposition(&self) {
        self.with_controller(|c| {
            c.sync_style();
            c.reposition();
            c.sync_scroll();
        });
    }

    pub fn language(&self) -> Option<LanguageTag> {
        self.controller.try_borrow().ok()?.language().cloned()
    }

    pub fn is_attached(&self) -> bool {
        self.controller
            .try_borrow()
            .is_ok_and(|c| c.is_attached())
    }

    pub fn textarea(&self) -> Option<HtmlTextAreaElement> {
        self.controller
            .try_borrow()
            .ok()
            .map(|c| c.text_surface().element().clone())
    }

    /// Run `f` against the controller unless it's already borrowed.
    pub fn with_controller<R>(&self, f: impl FnOnce(&mut DomController<H>) -> R) -> Option<R> {
        let mut controller = self.controller.try_borrow_mut().ok()?;
        Some(f(&mut controller))
    }
}

fn listen<H: Highlighter + 'static>(
    target: &EventTarget,
    event_type: &'static str,
    controller: &SharedController<H>,
    mut handler: impl FnMut(&mut DomController<H>, &Event) + 'static,
) -> EventListener {
    let controller = controller.clone();
    EventListener::new(target, event_type, move |event| {
        let Ok(mut controller) = controller.try_borrow_mut() else {
            tracing::trace!(event_type, "controller busy, dropping event");
            return;
        };
        handler(&mut controller, event);
    })
}

/// `keydown` needs a non-passive listener so Tab's default can be prevented.
fn listen_keydown<H: Highlighter + 'static>(
    target: &EventTarget,
    controller: &SharedController<H>,
) -> EventListener {
    let controller = controller.clone();
    EventListener::new_with_options(
        target,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Ok(mut controller) = controller.try_borrow_mut() else {
                return;
            };
            if controller.handle_key(&key_press_from_event(key_event)) == KeyOutcome::Handled {
                event.prevent_default();
            }
        },
    )
}
