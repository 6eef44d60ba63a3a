//! Language tags and the policy for choosing one from a file path.

use std::collections::BTreeMap;
use std::fmt;

use smol_str::SmolStr;

/// CSS class for content rendered without tokenization.
pub const PLAIN_TEXT_CLASS: &str = "language-plaintext";

/// Identifier of the language to highlight as (e.g. "go", "yaml").
///
/// Tags are not validated against any list: an unknown tag is accepted here
/// and degrades to plain text at render time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageTag(SmolStr);

impl LanguageTag {
    /// Create a tag from host input. Blank input means "no language".
    pub fn new(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        if tag.is_empty() {
            None
        } else {
            Some(Self(SmolStr::new(tag)))
        }
    }

    /// Parse an optional host value, e.g. an attribute that may be missing.
    pub fn parse(tag: Option<&str>) -> Option<Self> {
        tag.and_then(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Class attached to the rendered code element, `language-<tag>`.
    pub fn css_class(&self) -> String {
        format!("language-{}", self.0)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Chooses a language tag for a file path.
///
/// Kept separate from the controller so hosts can swap in their own mapping.
pub trait LanguagePolicy {
    fn language_for_path(&self, path: &str) -> Option<LanguageTag>;
}

impl<F> LanguagePolicy for F
where
    F: Fn(&str) -> Option<LanguageTag>,
{
    fn language_for_path(&self, path: &str) -> Option<LanguageTag> {
        self(path)
    }
}

/// Extension-based policy for config files.
///
/// Overrides (keyed by lowercase extension without the dot) take precedence
/// over the built-in table. `.conf` files are ambiguous, so a path mentioning
/// nginx gets `nginx` and any other `.conf` is treated as `ini`.
#[derive(Clone, Debug, Default)]
pub struct ExtensionPolicy {
    overrides: BTreeMap<String, String>,
}

impl ExtensionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: BTreeMap<String, String>) -> Self {
        let overrides = overrides
            .into_iter()
            .map(|(ext, tag)| (ext.trim_start_matches('.').to_ascii_lowercase(), tag))
            .collect();
        Self { overrides }
    }

    /// Extensions the built-in table knows, without the dot.
    pub fn builtin_extensions() -> impl Iterator<Item = &'static str> {
        BUILTIN_EXTENSIONS.iter().map(|(ext, _)| *ext)
    }

    fn builtin(ext: &str) -> Option<&'static str> {
        BUILTIN_EXTENSIONS
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, tag)| *tag)
    }
}

const BUILTIN_EXTENSIONS: &[(&str, &str)] = &[
    ("yml", "yaml"),
    ("yaml", "yaml"),
    ("json", "json"),
    ("toml", "toml"),
    ("py", "python"),
    ("js", "javascript"),
    ("mjs", "javascript"),
    ("sh", "bash"),
    ("bash", "bash"),
    ("sql", "sql"),
    ("md", "markdown"),
    ("ini", "ini"),
    ("env", "ini"),
    ("cfg", "ini"),
    ("xml", "xml"),
    ("html", "html"),
    ("htm", "html"),
    ("go", "go"),
    ("rs", "rust"),
    ("dockerfile", "dockerfile"),
];

impl LanguagePolicy for ExtensionPolicy {
    fn language_for_path(&self, path: &str) -> Option<LanguageTag> {
        let lower = path.to_ascii_lowercase();
        let file_name = lower.rsplit(['/', '\\']).next().unwrap_or(&lower);

        // `Dockerfile`, `.env` and friends have no extension in the usual sense.
        let ext = match file_name.rsplit_once('.') {
            Some((_, ext)) => ext,
            None => file_name,
        };

        if let Some(tag) = self.overrides.get(ext) {
            return LanguageTag::new(tag);
        }

        if ext == "conf" {
            let tag = if lower.contains("nginx") { "nginx" } else { "ini" };
            return LanguageTag::new(tag);
        }

        Self::builtin(ext).and_then(LanguageTag::new)
    }
}
