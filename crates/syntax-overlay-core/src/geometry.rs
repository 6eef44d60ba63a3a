//! Geometry records shared by text surfaces and overlays.

/// A rectangle in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Translate a viewport-relative rect into document coordinates.
    ///
    /// Bounding rects are reported relative to the viewport. An absolutely
    /// positioned overlay is laid out relative to its nearest positioned
    /// ancestor, which is the document only when no ancestor is positioned.
    /// The page scroll offset is added back in for that case; inside a
    /// positioned container the result is off by the container's offset.
    pub fn to_page(self, page_scroll: ScrollOffset) -> Self {
        Self {
            x: self.x + page_scroll.left,
            y: self.y + page_scroll.top,
            ..self
        }
    }
}

/// Vertical and horizontal scroll position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollOffset {
    pub top: f64,
    pub left: f64,
}

impl ScrollOffset {
    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// Format a pixel length for a CSS property value.
pub fn px(value: f64) -> String {
    format!("{}px", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_page_adds_scroll() {
        let rect = Rect::new(10.0, 20.0, 300.0, 150.0);
        let page = rect.to_page(ScrollOffset::new(100.0, 5.0));
        assert_eq!(page, Rect::new(15.0, 120.0, 300.0, 150.0));
    }

    #[test]
    fn test_to_page_without_scroll_is_identity() {
        let rect = Rect::new(1.5, 2.5, 3.0, 4.0);
        assert_eq!(rect.to_page(ScrollOffset::default()), rect);
    }

    #[test]
    fn test_px() {
        assert_eq!(px(12.0), "12px");
        assert_eq!(px(12.5), "12.5px");
    }
}
