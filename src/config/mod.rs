//! Node configuration: option structs and construction-time validation.
//!
//! Options mirror the shapes a build-pipeline config file would carry, so
//! everything here derives serde with defaults. Validation happens once,
//! synchronously, when the node is constructed.

mod error;

pub use error::ConfigError;

use crate::plugin::PluginConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Input argument
// ============================================================================

/// The node's input-directories argument.
///
/// Untagged so that a scalar arriving from a dynamically-typed pipeline
/// config stays representable instead of failing deserialization; the
/// validator rejects the scalar form with the contract's message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputArg {
    /// An ordered list of input directories.
    List(Vec<PathBuf>),
    /// A single bare path (a misconfiguration, rejected at validation).
    Scalar(PathBuf),
}

impl InputArg {
    /// Enforce the sequence contract and unwrap the directory list.
    pub fn into_list(self) -> Result<Vec<PathBuf>, ConfigError> {
        match self {
            InputArg::List(dirs) => Ok(dirs),
            InputArg::Scalar(_) => Err(ConfigError::InputNotArray),
        }
    }
}

impl From<Vec<PathBuf>> for InputArg {
    fn from(dirs: Vec<PathBuf>) -> Self {
        InputArg::List(dirs)
    }
}

impl From<Vec<String>> for InputArg {
    fn from(dirs: Vec<String>) -> Self {
        InputArg::List(dirs.into_iter().map(PathBuf::from).collect())
    }
}

impl From<Vec<&str>> for InputArg {
    fn from(dirs: Vec<&str>) -> Self {
        InputArg::List(dirs.into_iter().map(PathBuf::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for InputArg {
    fn from(dirs: [&str; N]) -> Self {
        InputArg::List(dirs.into_iter().map(PathBuf::from).collect())
    }
}

impl<const N: usize> From<[PathBuf; N]> for InputArg {
    fn from(dirs: [PathBuf; N]) -> Self {
        InputArg::List(dirs.into())
    }
}

impl From<&str> for InputArg {
    fn from(dir: &str) -> Self {
        InputArg::Scalar(PathBuf::from(dir))
    }
}

impl From<String> for InputArg {
    fn from(dir: String) -> Self {
        InputArg::Scalar(PathBuf::from(dir))
    }
}

impl From<PathBuf> for InputArg {
    fn from(dir: PathBuf) -> Self {
        InputArg::Scalar(dir)
    }
}

impl From<&Path> for InputArg {
    fn from(dir: &Path) -> Self {
        InputArg::Scalar(dir.to_path_buf())
    }
}

// ============================================================================
// Options
// ============================================================================

/// Source map configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Embed the map as a base64 data URL annotation instead of writing a
    /// `.map` artifact.
    pub inline: bool,
    /// Append a `sourceMappingURL` comment referencing the `.map` artifact.
    /// Ignored for inline maps, which always carry their annotation.
    pub annotation: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            inline: false,
            annotation: true,
        }
    }
}

/// Statistics artifact configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Write a `<output>.stats.json` artifact after a successful pass.
    pub enabled: bool,
}

/// Options accepted by [`CssNode::new`](crate::node::CssNode::new).
#[derive(Debug, Clone, Default)]
pub struct NodeOptions {
    /// Plugin chain, applied in order.
    pub plugins: Vec<PluginConfig>,
    /// Source map behavior.
    pub map: MapConfig,
    /// Statistics artifact behavior (omitted means disabled).
    pub stats: Option<StatsConfig>,
}

impl NodeOptions {
    /// Check the construction-time contract.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plugins.is_empty() {
            return Err(ConfigError::EmptyPluginList);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_input_converts() {
        let arg = InputArg::from(vec!["styles", "shared"]);
        let dirs = arg.into_list().unwrap();
        assert_eq!(dirs, vec![PathBuf::from("styles"), PathBuf::from("shared")]);
    }

    #[test]
    fn test_scalar_input_rejected() {
        let err = InputArg::from("styles").into_list().unwrap_err();
        assert_eq!(err, ConfigError::InputNotArray);
        assert_eq!(err.to_string(), "Expected array for first argument");
    }

    #[test]
    fn test_input_arg_deserializes_untagged() {
        let list: InputArg = serde_json::from_value(json!(["styles"])).unwrap();
        assert_eq!(list, InputArg::List(vec![PathBuf::from("styles")]));

        let scalar: InputArg = serde_json::from_value(json!("styles")).unwrap();
        assert_eq!(scalar, InputArg::Scalar(PathBuf::from("styles")));
    }

    #[test]
    fn test_map_defaults() {
        let map = MapConfig::default();
        assert!(!map.inline);
        assert!(map.annotation);

        let parsed: MapConfig = serde_json::from_value(json!({ "inline": true })).unwrap();
        assert!(parsed.inline);
        assert!(parsed.annotation);
    }

    #[test]
    fn test_stats_defaults_off() {
        let stats: StatsConfig = serde_json::from_value(json!({})).unwrap();
        assert!(!stats.enabled);
    }

    #[test]
    fn test_empty_plugin_list_rejected() {
        let err = NodeOptions::default().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "You must provide at least 1 plugin in the plugin array"
        );
    }
}
