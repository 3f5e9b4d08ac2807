//! Pseudo-element downlevel plugin.
//!
//! Rewrites CSS3 double-colon pseudo-element selectors (`a::before`) to the
//! single-colon form (`a:before`) understood by legacy engines. Pseudo
//! elements without a single-colon form (`::selection`, `::placeholder`)
//! are left alone unless explicitly configured.

use super::{Plugin, PluginConfig, PluginDiagnostics};
use anyhow::Result;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

/// Pseudo-elements rewritten by default (the CSS 2.1 set).
const DEFAULT_ELEMENTS: &[&str] = &["before", "after", "first-line", "first-letter"];

/// Options accepted from the plugin entry's options mapping.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PseudoOptions {
    /// Override the set of rewritten pseudo-elements.
    elements: Option<Vec<String>>,
}

/// The downlevel plugin. See [`PseudoElements::config`] for chain usage.
pub struct PseudoElements {
    elements: Vec<String>,
}

impl PseudoElements {
    /// Instantiate from an options mapping (unknown shapes fall back to the
    /// default element set).
    pub fn new(options: &Value) -> Self {
        let opts = PseudoOptions::deserialize(options).unwrap_or_default();
        let elements = opts
            .elements
            .unwrap_or_else(|| DEFAULT_ELEMENTS.iter().map(|e| (*e).to_string()).collect());
        Self { elements }
    }

    /// Chain entry producing this plugin.
    pub fn config() -> PluginConfig {
        PluginConfig::new(|options| Box::new(PseudoElements::new(options)))
    }
}

impl Plugin for PseudoElements {
    fn name(&self) -> &str {
        "pseudo-elements"
    }

    fn transform(&self, css: &str, _diag: &mut PluginDiagnostics<'_>) -> Result<String> {
        let alternation = self
            .elements
            .iter()
            .map(|e| regex::escape(e))
            .collect::<Vec<_>>()
            .join("|");
        // The trailing class keeps `::before` from matching inside longer
        // idents like `::before-edge`.
        let pattern = format!(r"::({alternation})([^\w-]|$)");
        let re = Regex::new(&pattern)?;
        Ok(re.replace_all(css, ":${1}${2}").into_owned())
    }
}
