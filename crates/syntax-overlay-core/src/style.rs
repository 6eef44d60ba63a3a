//! Style mirroring between a text surface and its overlay.
//!
//! The overlay's glyphs have to line up exactly with the (transparent-looking)
//! glyphs of the text surface underneath, so every property that affects
//! text metrics or the box edges is copied across.

use serde::{Deserialize, Serialize};

/// Style snapshot read from a text surface.
///
/// `None` means the surface doesn't specify the property and the configured
/// fallback applies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SurfaceStyle {
    pub padding: Option<String>,
    pub border: Option<String>,
    pub border_radius: Option<String>,
    pub background_color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub line_height: Option<String>,
}

impl SurfaceStyle {
    /// The CSS property names this snapshot carries, in copy order.
    pub const PROPERTIES: [&'static str; 7] = [
        "padding",
        "border",
        "border-radius",
        "background-color",
        "font-family",
        "font-size",
        "line-height",
    ];

    /// Set a property by its CSS name. Empty values count as unset.
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        let value = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
        match property {
            "padding" => self.padding = value,
            "border" => self.border = value,
            "border-radius" => self.border_radius = value,
            "background-color" => self.background_color = value,
            "font-family" => self.font_family = value,
            "font-size" => self.font_size = value,
            "line-height" => self.line_height = value,
            _ => {}
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        match property {
            "padding" => self.padding.as_deref(),
            "border" => self.border.as_deref(),
            "border-radius" => self.border_radius.as_deref(),
            "background-color" => self.background_color.as_deref(),
            "font-family" => self.font_family.as_deref(),
            "font-size" => self.font_size.as_deref(),
            "line-height" => self.line_height.as_deref(),
            _ => None,
        }
    }
}

/// Values used when the text surface leaves a property unset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleFallbacks {
    pub padding: String,
    pub border: String,
    pub border_radius: String,
    pub background_color: String,
    pub font_family: String,
    pub font_size: String,
    pub line_height: String,
}

impl Default for StyleFallbacks {
    fn default() -> Self {
        Self {
            padding: "8px".into(),
            border: "1px solid #ccc".into(),
            border_radius: "4px".into(),
            background_color: "white".into(),
            font_family: "monospace".into(),
            font_size: "14px".into(),
            line_height: "1.4".into(),
        }
    }
}

impl StyleFallbacks {
    fn get(&self, property: &str) -> &str {
        match property {
            "padding" => &self.padding,
            "border" => &self.border,
            "border-radius" => &self.border_radius,
            "background-color" => &self.background_color,
            "font-family" => &self.font_family,
            "font-size" => &self.font_size,
            "line-height" => &self.line_height,
            _ => "",
        }
    }
}

/// Fixed declarations that make the overlay a pass-through layer on top of
/// the text surface.
const OVERLAY_FIXED: [(&str, &str); 9] = [
    ("position", "absolute"),
    ("margin", "0"),
    ("box-sizing", "border-box"),
    ("color", "transparent"),
    ("pointer-events", "none"),
    ("z-index", "1"),
    ("overflow", "hidden"),
    ("white-space", "pre-wrap"),
    ("word-wrap", "break-word"),
];

/// Ordered list of CSS declarations to apply to an overlay element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleDeclarations(Vec<(&'static str, String)>);

impl StyleDeclarations {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Value of the last declaration for `property`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| *k == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build the overlay's declarations from the text surface's style.
pub fn overlay_declarations(style: &SurfaceStyle, fallbacks: &StyleFallbacks) -> StyleDeclarations {
    let mut decls = Vec::with_capacity(OVERLAY_FIXED.len() + SurfaceStyle::PROPERTIES.len());
    decls.extend(OVERLAY_FIXED.iter().map(|(k, v)| (*k, v.to_string())));
    for property in SurfaceStyle::PROPERTIES {
        let value = style
            .get(property)
            .unwrap_or_else(|| fallbacks.get(property));
        decls.push((property, value.to_string()));
    }
    StyleDeclarations(decls)
}
