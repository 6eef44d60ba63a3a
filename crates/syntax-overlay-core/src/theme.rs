//! Stylesheets for the classed spans emitted by `SyntectHighlighter`.

use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, css_for_theme_with_class_style};

use crate::error::OverlayError;
use crate::highlight::CSS_PREFIX;

/// Names of syntect's bundled themes.
pub fn theme_names() -> Vec<String> {
    ThemeSet::load_defaults().themes.into_keys().collect()
}

/// CSS for one of syntect's bundled themes, scoped to the `hl-` classes.
pub fn theme_css(theme_name: &str) -> Result<String, OverlayError> {
    let theme_set = ThemeSet::load_defaults();
    let theme = theme_set
        .themes
        .get(theme_name)
        .ok_or_else(|| OverlayError::Config(format!("theme '{}' not found", theme_name)))?;

    css_for_theme_with_class_style(theme, ClassStyle::SpacedPrefixed { prefix: CSS_PREFIX })
        .map_err(|e| OverlayError::Config(e.to_string()))
}

/// Light theme by default, dark theme under `prefers-color-scheme: dark`.
pub fn theme_css_light_dark(light: &str, dark: &str) -> Result<String, OverlayError> {
    let light_css = theme_css(light)?;
    let dark_css = theme_css(dark)?;

    let mut result = String::new();
    result.push_str("/* Syntax highlighting - Light Mode (default) */\n");
    result.push_str(&light_css);
    result.push_str("\n\n/* Syntax highlighting - Dark Mode */\n");
    result.push_str("@media (prefers-color-scheme: dark) {\n");
    result.push_str(&dark_css);
    result.push_str("}\n");
    Ok(result)
}
