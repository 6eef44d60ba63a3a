//! DOM implementations of the core surface traits.

use syntax_overlay_core::geometry::px;
use syntax_overlay_core::{
    Markup, OverlaySurface, PLAIN_TEXT_CLASS, Rect, ScrollOffset, StyleDeclarations,
    SurfaceError, SurfaceStyle, TextSelection, TextSurface,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlElement, HtmlTextAreaElement};

use crate::offsets::{char_to_utf16_offset, utf16_to_char_offset};

/// Class on the overlay's `<pre>` element.
pub const OVERLAY_CLASS: &str = "syntax-overlay";

fn js_error(context: &str, err: JsValue) -> SurfaceError {
    SurfaceError(format!("{}: {:?}", context, err))
}

/// A `<textarea>` as a text surface.
#[derive(Clone, Debug)]
pub struct TextareaSurface {
    element: HtmlTextAreaElement,
}

impl TextareaSurface {
    pub fn new(element: HtmlTextAreaElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &HtmlTextAreaElement {
        &self.element
    }
}

impl TextSurface for TextareaSurface {
    fn text(&self) -> String {
        self.element.value()
    }

    fn selection(&self) -> TextSelection {
        let text = self.element.value();
        let start = self.element.selection_start().ok().flatten().unwrap_or(0) as usize;
        let end = self
            .element
            .selection_end()
            .ok()
            .flatten()
            .map(|end| end as usize)
            .unwrap_or(start);
        TextSelection::new(
            utf16_to_char_offset(&text, start),
            utf16_to_char_offset(&text, end),
        )
    }

    fn set_text(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.element.set_value(text);
        Ok(())
    }

    fn set_selection(&mut self, selection: TextSelection) -> Result<(), SurfaceError> {
        let text = self.element.value();
        let selection = selection.ordered();
        let start = char_to_utf16_offset(&text, selection.start) as u32;
        let end = char_to_utf16_offset(&text, selection.end) as u32;
        self.element
            .set_selection_range(start, end)
            .map_err(|e| js_error("setSelectionRange failed", e))
    }

    fn bounding_rect(&self) -> Rect {
        let rect = self.element.get_bounding_client_rect();
        Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
    }

    fn page_scroll(&self) -> ScrollOffset {
        let Some(window) = web_sys::window() else {
            return ScrollOffset::default();
        };
        ScrollOffset::new(
            window.scroll_y().unwrap_or(0.0),
            window.scroll_x().unwrap_or(0.0),
        )
    }

    fn scroll_offset(&self) -> ScrollOffset {
        ScrollOffset::new(
            self.element.scroll_top() as f64,
            self.element.scroll_left() as f64,
        )
    }

    fn style(&self) -> SurfaceStyle {
        read_style(&self.element)
    }
}

/// Read the mirrored properties: inline style first, then computed style.
fn read_style(element: &HtmlElement) -> SurfaceStyle {
    let inline = element.style();
    let computed = web_sys::window().and_then(|w| w.get_computed_style(element).ok().flatten());

    let mut style = SurfaceStyle::default();
    for property in SurfaceStyle::PROPERTIES {
        let value = inline
            .get_property_value(property)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| {
                computed
                    .as_ref()
                    .and_then(|c| c.get_property_value(property).ok())
            });
        if let Some(value) = value {
            style.set(property, value);
        }
    }
    style
}

/// The `<pre class="syntax-overlay"><code>` element stacked over a textarea.
#[derive(Clone, Debug)]
pub struct DomOverlay {
    pre: HtmlElement,
    code: HtmlElement,
}

fn create_html_element(document: &Document, tag: &str) -> Result<HtmlElement, SurfaceError> {
    document
        .create_element(tag)
        .map_err(|e| js_error("createElement failed", e))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SurfaceError::from("created element is not an HtmlElement"))
}

impl DomOverlay {
    /// Create the overlay and insert it as the next sibling of `target`.
    pub fn create_after(target: &HtmlElement) -> Result<Self, SurfaceError> {
        let document = target
            .owner_document()
            .ok_or("text surface has no owner document")?;
        let parent = target
            .parent_node()
            .ok_or("text surface is not in the document")?;

        let pre = create_html_element(&document, "pre")?;
        let code = create_html_element(&document, "code")?;
        pre.set_class_name(OVERLAY_CLASS);
        pre.set_attribute("aria-hidden", "true")
            .map_err(|e| js_error("setAttribute failed", e))?;
        code.set_class_name(PLAIN_TEXT_CLASS);
        pre.append_child(&code)
            .map_err(|e| js_error("appendChild failed", e))?;

        parent
            .insert_before(&pre, target.next_sibling().as_ref())
            .map_err(|e| js_error("insertBefore failed", e))?;

        Ok(Self { pre, code })
    }

    /// The outer `<pre>` element.
    pub fn element(&self) -> &HtmlElement {
        &self.pre
    }

    /// The inner `<code>` element holding the markup.
    pub fn code(&self) -> &HtmlElement {
        &self.code
    }
}

impl OverlaySurface for DomOverlay {
    fn is_attached(&self) -> bool {
        self.pre.parent_node().is_some()
    }

    fn apply_styles(&mut self, declarations: &StyleDeclarations) -> Result<(), SurfaceError> {
        let style = self.pre.style();
        for (property, value) in declarations.iter() {
            style
                .set_property(property, value)
                .map_err(|e| js_error(property, e))?;
        }
        Ok(())
    }

    fn set_rect(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        let style = self.pre.style();
        for (property, value) in [
            ("top", rect.y),
            ("left", rect.x),
            ("width", rect.width),
            ("height", rect.height),
        ] {
            style
                .set_property(property, &px(value))
                .map_err(|e| js_error(property, e))?;
        }
        Ok(())
    }

    fn set_scroll(&mut self, scroll: ScrollOffset) {
        self.pre.set_scroll_top(scroll.top.round() as i32);
        self.pre.set_scroll_left(scroll.left.round() as i32);
    }

    fn set_markup(&mut self, markup: &Markup) -> Result<(), SurfaceError> {
        self.code.set_class_name(&markup.language_class);
        self.code.set_inner_html(&markup.html);
        Ok(())
    }

    fn remove(&mut self) {
        if self.pre.parent_node().is_some() {
            self.pre.remove();
        }
    }
}
