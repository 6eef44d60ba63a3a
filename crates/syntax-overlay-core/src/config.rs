use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;
use crate::language::ExtensionPolicy;
use crate::style::StyleFallbacks;

/// Host-tunable overlay settings.
///
/// Every field has a default, so hosts only pass what they want to change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    /// Inserted by the Tab key.
    pub indent: String,
    /// Attribute that marks a textarea for auto-discovery and carries its language.
    pub marker_attribute: String,
    /// Legacy `is="..."` value that also opts a textarea in.
    pub legacy_marker: Option<String>,
    /// Extension → language tag overrides for the path policy.
    pub language_overrides: BTreeMap<String, String>,
    /// Styles used when the textarea leaves a property unset.
    pub style_fallbacks: StyleFallbacks,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            indent: "\t".into(),
            marker_attribute: "language".into(),
            legacy_marker: Some("highlighted-code".into()),
            language_overrides: BTreeMap::new(),
            style_fallbacks: StyleFallbacks::default(),
        }
    }
}

impl OverlayConfig {
    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, OverlayError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde can't express.
    pub fn validate(&self) -> Result<(), OverlayError> {
        if self.indent.is_empty() {
            return Err(OverlayError::Config("indent must not be empty".into()));
        }
        if self.marker_attribute.trim().is_empty() {
            return Err(OverlayError::Config(
                "markerAttribute must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Path → language policy honouring `language_overrides`.
    pub fn language_policy(&self) -> ExtensionPolicy {
        ExtensionPolicy::with_overrides(self.language_overrides.clone())
    }
}
