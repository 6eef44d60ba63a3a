//! Highlighting engines and the plain-text fallback policy.
//!
//! The engine is an injected dependency. Whatever it is, `render_markup`
//! treats every failure the same way as "no engine": the literal text is
//! rendered, escaped, with the plain-text class. Highlighting is best-effort
//! and must never get in the way of editing.

use std::rc::Rc;
use std::sync::{Arc, LazyLock};

use pulldown_cmark_escape::escape_html_body_text;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxDefinition, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::HighlightError;
use crate::language::{LanguageTag, PLAIN_TEXT_CLASS};

/// Prefix for the token classes emitted by `SyntectHighlighter`.
pub const CSS_PREFIX: &str = "hl-";

/// Config-file syntaxes missing from syntect's defaults, keyed by file name.
const EXTRA_SYNTAXES: [(&str, &str); 4] = [
    ("TOML", include_str!("../syntaxes/TOML.sublime-syntax")),
    ("INI", include_str!("../syntaxes/INI.sublime-syntax")),
    ("Dockerfile", include_str!("../syntaxes/Dockerfile.sublime-syntax")),
    ("nginx", include_str!("../syntaxes/nginx.sublime-syntax")),
];

static DEFAULT_SYNTAX_SET: LazyLock<Arc<SyntaxSet>> =
    LazyLock::new(|| Arc::new(default_syntax_set()));

/// syntect's default syntaxes plus `EXTRA_SYNTAXES`.
fn default_syntax_set() -> SyntaxSet {
    let mut builder = SyntaxSet::load_defaults_newlines().into_builder();
    for (name, source) in EXTRA_SYNTAXES {
        match SyntaxDefinition::load_from_str(source, true, Some(name)) {
            Ok(syntax) => builder.add(syntax),
            Err(e) => tracing::warn!(syntax = name, error = %e, "skipping bundled syntax"),
        }
    }
    builder.build()
}

/// Turns raw text into tokenized HTML for a language.
pub trait Highlighter {
    fn highlight(&self, text: &str, language: &LanguageTag) -> Result<String, HighlightError>;
}

impl<H: Highlighter + ?Sized> Highlighter for &H {
    fn highlight(&self, text: &str, language: &LanguageTag) -> Result<String, HighlightError> {
        (**self).highlight(text, language)
    }
}

impl<H: Highlighter + ?Sized> Highlighter for Box<H> {
    fn highlight(&self, text: &str, language: &LanguageTag) -> Result<String, HighlightError> {
        (**self).highlight(text, language)
    }
}

impl<H: Highlighter + ?Sized> Highlighter for Rc<H> {
    fn highlight(&self, text: &str, language: &LanguageTag) -> Result<String, HighlightError> {
        (**self).highlight(text, language)
    }
}

impl<H: Highlighter + ?Sized> Highlighter for Arc<H> {
    fn highlight(&self, text: &str, language: &LanguageTag) -> Result<String, HighlightError> {
        (**self).highlight(text, language)
    }
}

/// `None` is an absent engine.
impl<H: Highlighter> Highlighter for Option<H> {
    fn highlight(&self, text: &str, language: &LanguageTag) -> Result<String, HighlightError> {
        match self {
            Some(engine) => engine.highlight(text, language),
            None => Err(HighlightError::Unavailable),
        }
    }
}

/// Engine that is never available.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHighlighter;

impl Highlighter for NoHighlighter {
    fn highlight(&self, _text: &str, _language: &LanguageTag) -> Result<String, HighlightError> {
        Err(HighlightError::Unavailable)
    }
}

/// Adapter for using a plain function as an engine.
#[derive(Clone, Copy, Debug)]
pub struct FnHighlighter<F>(pub F);

impl<F> Highlighter for FnHighlighter<F>
where
    F: Fn(&str, &LanguageTag) -> Result<String, HighlightError>,
{
    fn highlight(&self, text: &str, language: &LanguageTag) -> Result<String, HighlightError> {
        (self.0)(text, language)
    }
}

/// Wrap a function as a `Highlighter`.
pub fn highlight_fn<F>(f: F) -> FnHighlighter<F>
where
    F: Fn(&str, &LanguageTag) -> Result<String, HighlightError>,
{
    FnHighlighter(f)
}

/// syntect-backed engine emitting classed spans (`hl-keyword`, `hl-string`, ...).
///
/// Colours come from a stylesheet rather than inline styles, so the same
/// markup works under any theme.
#[derive(Clone, Debug)]
pub struct SyntectHighlighter {
    syntax_set: Arc<SyntaxSet>,
}

impl Default for SyntectHighlighter {
    /// Shares one lazily built copy of syntect's default syntaxes plus the
    /// bundled TOML, INI, Dockerfile and nginx syntaxes.
    fn default() -> Self {
        Self {
            syntax_set: DEFAULT_SYNTAX_SET.clone(),
        }
    }
}

impl SyntectHighlighter {
    pub fn new(syntax_set: Arc<SyntaxSet>) -> Self {
        Self { syntax_set }
    }

    pub fn syntax_set(&self) -> &SyntaxSet {
        &self.syntax_set
    }

    /// Look a language up by token (extension or name), then by name ignoring case.
    pub fn find_syntax(&self, language: &LanguageTag) -> Option<&SyntaxReference> {
        let tag = language.as_str();
        self.syntax_set.find_syntax_by_token(tag).or_else(|| {
            self.syntax_set
                .syntaxes()
                .iter()
                .find(|s| s.name.eq_ignore_ascii_case(tag))
        })
    }

    pub fn supports(&self, language: &LanguageTag) -> bool {
        self.find_syntax(language).is_some()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, text: &str, language: &LanguageTag) -> Result<String, HighlightError> {
        let syntax = self
            .find_syntax(language)
            .ok_or_else(|| HighlightError::UnknownLanguage(language.to_string()))?;

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed { prefix: CSS_PREFIX },
        );
        for line in LinesWithEndings::from(text) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| HighlightError::Malformed(e.to_string()))?;
        }
        Ok(generator.finalize())
    }
}

/// One rendered state of the overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Markup {
    /// Inner HTML for the code element.
    pub html: String,
    /// `language-<tag>` when tokenized, `language-plaintext` otherwise.
    pub language_class: String,
    /// Whether the engine produced the HTML.
    pub highlighted: bool,
}

impl Markup {
    /// Escaped literal text with the plain-text class.
    pub fn plain(text: &str) -> Self {
        let mut html = String::with_capacity(text.len());
        // Writing into a String can't fail.
        let _ = escape_html_body_text(&mut html, text);
        Self {
            html,
            language_class: PLAIN_TEXT_CLASS.to_string(),
            highlighted: false,
        }
    }
}

/// Render `text` for the overlay, falling back to plain text on any failure.
pub fn render_markup<H: Highlighter + ?Sized>(
    engine: &H,
    text: &str,
    language: Option<&LanguageTag>,
) -> Markup {
    let Some(language) = language else {
        return Markup::plain(text);
    };

    match engine.highlight(text, language) {
        Ok(html) => Markup {
            html,
            language_class: language.css_class(),
            highlighted: true,
        },
        Err(e) => {
            tracing::debug!(
                language = %language,
                error = %e,
                "highlighting failed, rendering plain text"
            );
            Markup::plain(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> LanguageTag {
        LanguageTag::new(s).unwrap()
    }

    #[test]
    fn test_go_is_tokenized() {
        let engine = SyntectHighlighter::default();
        let markup = render_markup(&engine, "func f() {}", Some(&tag("go")));

        assert!(markup.highlighted);
        assert_eq!(markup.language_class, "language-go");
        assert!(markup.html.contains("<span class=\"hl-"));
        assert!(markup.html.contains("func"));
        assert!(markup.html.contains('{'));
        assert!(markup.html.contains('}'));
        // Keyword and identifier end up in separate runs.
        assert!(!markup.html.contains("func f"));
        assert!(markup.html.matches("<span").count() >= 3);
    }

    #[test]
    fn test_no_language_renders_literal_text() {
        let engine = SyntectHighlighter::default();
        let markup = render_markup(&engine, "func f() {}", None);

        assert!(!markup.highlighted);
        assert_eq!(markup.language_class, PLAIN_TEXT_CLASS);
        insta::assert_snapshot!(markup.html, @"func f() {}");
    }

    #[test]
    fn test_plain_text_is_escaped() {
        let markup = Markup::plain("if a < b && c > d {}");
        insta::assert_snapshot!(markup.html, @"if a &lt; b &amp;&amp; c &gt; d {}");
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let engine = SyntectHighlighter::default();
        let markup = render_markup(&engine, "server { listen 80; }", Some(&tag("no-such-lang")));

        assert!(!markup.highlighted);
        assert_eq!(markup.language_class, PLAIN_TEXT_CLASS);
        assert_eq!(markup.html, "server { listen 80; }");
    }

    #[test]
    fn test_unknown_language_error_kind() {
        let engine = SyntectHighlighter::default();
        let err = engine.highlight("x", &tag("no-such-lang")).unwrap_err();
        assert_eq!(err, HighlightError::UnknownLanguage("no-such-lang".into()));
    }

    #[test]
    fn test_unavailable_engine_falls_back() {
        let markup = render_markup(&NoHighlighter, "a <b>", Some(&tag("go")));
        assert!(!markup.highlighted);
        assert_eq!(markup.html, "a &lt;b&gt;");

        let absent: Option<SyntectHighlighter> = None;
        let markup = render_markup(&absent, "x", Some(&tag("go")));
        assert!(!markup.highlighted);
    }

    #[test]
    fn test_failing_engine_falls_back() {
        let engine = highlight_fn(|_text: &str, _lang: &LanguageTag| {
            Err(HighlightError::Malformed("unterminated string".into()))
        });
        let markup = render_markup(&engine, "\"oops", Some(&tag("json")));
        assert!(!markup.highlighted);
        assert_eq!(markup.language_class, PLAIN_TEXT_CLASS);
        assert_eq!(markup.html, "\"oops");
    }

    #[test]
    fn test_injected_engine_output_is_used() {
        let engine = highlight_fn(|text: &str, lang: &LanguageTag| {
            Ok(format!("<b data-lang=\"{lang}\">{text}</b>"))
        });
        let markup = render_markup(&engine, "x", Some(&tag("toy")));
        assert!(markup.highlighted);
        assert_eq!(markup.html, "<b data-lang=\"toy\">x</b>");
        assert_eq!(markup.language_class, "language-toy");
    }

    #[test]
    fn test_render_is_deterministic() {
        let engine = SyntectHighlighter::default();
        let source = "package main\n\nfunc main() {\n\tprintln(\"hi\")\n}\n";
        let first = render_markup(&engine, source, Some(&tag("go")));
        let second = render_markup(&engine, source, Some(&tag("go")));
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_content() {
        let engine = SyntectHighlighter::default();
        let markup = render_markup(&engine, "", None);
        assert_eq!(markup.html, "");

        let markup = render_markup(&engine, "", Some(&tag("go")));
        assert_eq!(markup.html, "");
    }

    #[test]
    fn test_default_policy_tags_are_supported() {
        use crate::language::{ExtensionPolicy, LanguagePolicy};

        let engine = SyntectHighlighter::default();
        let policy = ExtensionPolicy::new();
        for ext in ExtensionPolicy::builtin_extensions() {
            let tag = policy.language_for_path(&format!("file.{ext}")).unwrap();
            assert!(engine.supports(&tag), "{ext} -> {tag} not supported");
        }
        for path in [
            "Dockerfile",
            "/srv/app/.env",
            "/etc/nginx/sites-enabled/default.conf",
            "/etc/supervisor/worker.conf",
        ] {
            let tag = policy.language_for_path(path).unwrap();
            assert!(engine.supports(&tag), "{path} -> {tag} not supported");
        }
    }

    #[test]
    fn test_config_syntaxes_are_tokenized() {
        let engine = SyntectHighlighter::default();
        for (language, source) in [
            ("toml", "[package]\nname = \"overlay\" # crate\n"),
            ("ini", "[server]\nport = 8080\n"),
            ("dockerfile", "FROM rust:1.85\nRUN cargo build\n"),
            ("nginx", "server {\n    listen 80;\n}\n"),
        ] {
            let markup = render_markup(&engine, source, Some(&tag(language)));
            assert!(markup.highlighted, "{language} fell back to plain text");
            assert_eq!(markup.language_class, format!("language-{language}"));
            assert!(markup.html.contains("<span class=\"hl-"), "{language}: {}", markup.html);
        }
    }

    #[test]
    fn test_name_lookup_ignores_case() {
        let engine = SyntectHighlighter::default();
        assert!(engine.supports(&tag("Python")));
        assert!(engine.supports(&tag("yaml")));
        assert!(!engine.supports(&tag("no-such-lang")));
    }
}
