//! Platform abstraction for the two surfaces a controller binds together.
//!
//! These traits define the interface between the overlay logic and the
//! hosting environment (browser DOM, a native toolkit, or the in-memory
//! fakes used in tests).

use smol_str::SmolStr;

use crate::error::SurfaceError;
use crate::geometry::{Rect, ScrollOffset};
use crate::highlight::Markup;
use crate::indent::TextSelection;
use crate::style::{StyleDeclarations, SurfaceStyle};

/// The editable text control. Owned by the host; the controller only reads
/// it, except for writing content and selection when indenting.
pub trait TextSurface {
    /// Full current content.
    fn text(&self) -> String;

    /// Current selection in chars.
    fn selection(&self) -> TextSelection;

    fn set_text(&mut self, text: &str) -> Result<(), SurfaceError>;

    /// Set the selection, in chars.
    fn set_selection(&mut self, selection: TextSelection) -> Result<(), SurfaceError>;

    /// Bounding rectangle relative to the viewport.
    fn bounding_rect(&self) -> Rect;

    /// Scroll offset of the page the surface lives in.
    fn page_scroll(&self) -> ScrollOffset;

    /// The surface's own content scroll offset.
    fn scroll_offset(&self) -> ScrollOffset;

    fn style(&self) -> SurfaceStyle;
}

/// The non-interactive rendering layer placed over a `TextSurface`.
///
/// Created and inserted by the platform layer; exclusively owned by one
/// controller afterwards.
pub trait OverlaySurface {
    /// Whether the overlay is still in the document.
    fn is_attached(&self) -> bool;

    fn apply_styles(&mut self, declarations: &StyleDeclarations) -> Result<(), SurfaceError>;

    /// Position and size, in document coordinates.
    fn set_rect(&mut self, rect: Rect) -> Result<(), SurfaceError>;

    fn set_scroll(&mut self, scroll: ScrollOffset);

    fn set_markup(&mut self, markup: &Markup) -> Result<(), SurfaceError>;

    /// Detach from the document. Must tolerate an already-detached overlay.
    fn remove(&mut self);
}

/// A key-press as seen by the controller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyPress {
    /// Key name as reported by the platform (`"Tab"`, `"a"`, `"Enter"`).
    pub key: SmolStr,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    /// Part of an IME composition.
    pub composing: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<SmolStr>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    fn has_modifier(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }

    /// Plain Tab, the only key the controller intercepts.
    pub fn is_indent(&self) -> bool {
        self.key == "Tab" && !self.has_modifier() && !self.composing
    }
}
