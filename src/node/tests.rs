use std::fs;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tempfile::TempDir;

use super::{BuildNode, CssNode};
use crate::config::{MapConfig, NodeOptions, StatsConfig};
use crate::diagnostics::WarningSink;
use crate::plugin::pseudo::PseudoElements;
use crate::plugin::{Plugin, PluginConfig, PluginDiagnostics};
use crate::process::ProcessError;

const SUCCESS_CSS: &str = "a::before { content: \"test\"; }\n";
const WARNING_CSS: &str = "a {}\n";
const SYNTAX_ERROR_CSS: &str = "..broken {\n  color: red;\n}\n";

// Stand-in for the build engine's warning stream.
#[derive(Clone)]
struct StreamStub(Arc<Mutex<Vec<String>>>);

impl StreamStub {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }

    fn collected(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

impl WarningSink for StreamStub {
    fn write(&mut self, message: &str) {
        self.0.lock().push(message.to_string());
    }
}

// Plugin that unconditionally warns, mirroring a chatty third-party step.
struct WarnPlugin;

impl Plugin for WarnPlugin {
    fn name(&self) -> &str {
        "test-warn"
    }

    fn transform(&self, css: &str, diag: &mut PluginDiagnostics<'_>) -> anyhow::Result<String> {
        diag.warn("This is a warning.");
        Ok(css.to_string())
    }
}

fn basic_plugin_set() -> Vec<PluginConfig> {
    vec![PseudoElements::config()]
}

fn warn_plugin_set() -> Vec<PluginConfig> {
    vec![PluginConfig::new(|_| Box::new(WarnPlugin))]
}

fn external_map() -> MapConfig {
    MapConfig {
        inline: false,
        annotation: false,
    }
}

fn make_fixture(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (name, content) in files {
        fs::write(temp.path().join(name), content).unwrap();
    }
    temp
}

fn build_into(node: &CssNode, input: &Path) -> (TempDir, Result<(), ProcessError>) {
    let out = TempDir::new().unwrap();
    let result = node.build(&[input.to_path_buf()], out.path());
    (out, result)
}

#[test]
fn test_processes_css() {
    let fixture = make_fixture(&[("success.css", SUCCESS_CSS)]);
    let node = CssNode::with_plugins(
        vec![fixture.path().to_path_buf()],
        "success.css",
        "output.css",
        basic_plugin_set(),
        external_map(),
        None,
    )
    .unwrap();
    let stream = StreamStub::new();
    node.set_warning_stream(stream.clone());

    let (out, result) = build_into(&node, fixture.path());
    result.unwrap();

    let content = fs::read_to_string(out.path().join("output.css")).unwrap();
    assert_eq!(content.trim(), "a:before { content: \"test\"; }");

    let map: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("output.css.map")).unwrap())
            .unwrap();
    assert_eq!(map["version"], 3);
    assert_eq!(map["sources"][0], "success.css");
    assert!(map["mappings"].as_str().is_some_and(|m| !m.is_empty()));

    assert!(stream.collected().is_empty());
}

#[test]
fn test_rejects_scalar_input_argument() {
    let err = CssNode::with_plugins(
        "fixture",
        "syntax-error.css",
        "output.css",
        warn_plugin_set(),
        external_map(),
        None,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Expected array for first argument");
}

#[test]
fn test_rejects_empty_plugin_list() {
    let err = CssNode::with_plugins(
        vec!["fixture"],
        "syntax-error.css",
        "output.css",
        Vec::new(),
        external_map(),
        None,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "You must provide at least 1 plugin in the plugin array"
    );
}

#[test]
fn test_creates_stats_json() {
    let fixture = make_fixture(&[("success.css", SUCCESS_CSS)]);
    let node = CssNode::new(
        vec![fixture.path().to_path_buf()],
        "success.css",
        "output.css",
        NodeOptions {
            plugins: basic_plugin_set(),
            map: external_map(),
            stats: Some(StatsConfig { enabled: true }),
        },
    )
    .unwrap();
    let stream = StreamStub::new();
    node.set_warning_stream(stream.clone());

    let (out, result) = build_into(&node, fixture.path());
    result.unwrap();

    let stats: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(out.path().join("output.css.stats.json")).unwrap(),
    )
    .unwrap();

    assert_eq!(stats["size"], 30);
    assert_eq!(stats["rules"]["total"], 1);
    assert_eq!(stats["rules"]["size"]["graph"], serde_json::json!([1]));
    assert_eq!(stats["rules"]["size"]["max"], 1);
    assert_eq!(stats["declarations"]["total"], 1);
    assert_eq!(
        stats["declarations"]["properties"]["content"],
        serde_json::json!(["\"test\""])
    );
    assert_eq!(stats["mediaQueries"]["total"], 0);
    assert_eq!(stats["mediaQueries"]["unique"], 0);
    assert_eq!(stats["mediaQueries"]["values"], serde_json::json!([]));
    assert_eq!(stats["mediaQueries"]["contents"], serde_json::json!([]));

    assert!(stream.collected().is_empty());
}

#[test]
fn test_exposes_warnings() {
    let fixture = make_fixture(&[("warning.css", WARNING_CSS)]);
    let node = CssNode::with_plugins(
        vec![fixture.path().to_path_buf()],
        "warning.css",
        "output.css",
        warn_plugin_set(),
        external_map(),
        None,
    )
    .unwrap();
    let stream = StreamStub::new();
    node.set_warning_stream(stream.clone());

    let (out, result) = build_into(&node, fixture.path());
    result.unwrap();

    let content = fs::read_to_string(out.path().join("output.css")).unwrap();
    assert_eq!(content.trim(), "a {}");
    assert_eq!(stream.collected(), vec!["test-warn: This is a warning."]);
}

#[test]
fn test_exposes_syntax_errors() {
    let fixture = make_fixture(&[("syntax-error.css", SYNTAX_ERROR_CSS)]);
    let node = CssNode::with_plugins(
        vec![fixture.path().to_path_buf()],
        "syntax-error.css",
        "output.css",
        warn_plugin_set(),
        external_map(),
        None,
    )
    .unwrap();
    let stream = StreamStub::new();
    node.set_warning_stream(stream.clone());

    let (_out, result) = build_into(&node, fixture.path());
    let err = result.unwrap_err();

    assert!(err.is_syntax());
    assert_eq!(err.name(), "CssSyntaxError");
    assert!(stream.collected().is_empty());
}

#[test]
fn test_exposes_non_syntax_errors() {
    let fixture = make_fixture(&[]);
    let node = CssNode::with_plugins(
        vec![fixture.path().to_path_buf()],
        "missing-file.css",
        "output.css",
        warn_plugin_set(),
        external_map(),
        None,
    )
    .unwrap();
    let stream = StreamStub::new();
    node.set_warning_stream(stream.clone());

    let (_out, result) = build_into(&node, fixture.path());
    let err = result.unwrap_err();

    assert!(!err.is_syntax());
    assert_eq!(err.name(), "Error");
    assert!(stream.collected().is_empty());
}

#[test]
fn test_repeated_passes_write_identical_artifacts() {
    let fixture = make_fixture(&[("success.css", SUCCESS_CSS)]);
    let node = CssNode::new(
        vec![fixture.path().to_path_buf()],
        "success.css",
        "output.css",
        NodeOptions {
            plugins: basic_plugin_set(),
            map: external_map(),
            stats: Some(StatsConfig { enabled: true }),
        },
    )
    .unwrap();

    let (first, result) = build_into(&node, fixture.path());
    result.unwrap();
    let (second, result) = build_into(&node, fixture.path());
    result.unwrap();

    for artifact in ["output.css", "output.css.map", "output.css.stats.json"] {
        let a = fs::read(first.path().join(artifact)).unwrap();
        let b = fs::read(second.path().join(artifact)).unwrap();
        assert_eq!(a, b, "artifact {artifact} differs between passes");
    }
}

#[test]
fn test_inline_map_writes_no_map_artifact() {
    let fixture = make_fixture(&[("success.css", SUCCESS_CSS)]);
    let node = CssNode::with_plugins(
        vec![fixture.path().to_path_buf()],
        "success.css",
        "output.css",
        basic_plugin_set(),
        MapConfig {
            inline: true,
            annotation: false,
        },
        None,
    )
    .unwrap();

    let (out, result) = build_into(&node, fixture.path());
    result.unwrap();

    let content = fs::read_to_string(out.path().join("output.css")).unwrap();
    assert!(content.contains("sourceMappingURL=data:application/json"));
    assert!(!out.path().join("output.css.map").exists());
}

#[test]
fn test_annotation_comment_references_map() {
    let fixture = make_fixture(&[("success.css", SUCCESS_CSS)]);
    let node = CssNode::with_plugins(
        vec![fixture.path().to_path_buf()],
        "success.css",
        "output.css",
        basic_plugin_set(),
        MapConfig {
            inline: false,
            annotation: true,
        },
        None,
    )
    .unwrap();

    let (out, result) = build_into(&node, fixture.path());
    result.unwrap();

    let content = fs::read_to_string(out.path().join("output.css")).unwrap();
    assert!(content.ends_with("/*# sourceMappingURL=output.css.map */"));
    assert!(out.path().join("output.css.map").exists());
}

#[test]
fn test_build_without_input_directories_fails() {
    let fixture = make_fixture(&[("success.css", SUCCESS_CSS)]);
    let node = CssNode::with_plugins(
        vec![fixture.path().to_path_buf()],
        "success.css",
        "output.css",
        basic_plugin_set(),
        external_map(),
        None,
    )
    .unwrap();

    let out = TempDir::new().unwrap();
    let err = node.build(&[], out.path()).unwrap_err();
    assert!(matches!(err, ProcessError::NoInput));
    assert_eq!(err.name(), "Error");
}

#[test]
fn test_node_is_shareable_across_build_workers() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CssNode>();
}

#[test]
fn test_input_directories_preserve_configured_order() {
    let node = CssNode::with_plugins(
        vec!["styles", "shared"],
        "app.css",
        "app.css",
        basic_plugin_set(),
        external_map(),
        None,
    )
    .unwrap();

    let dirs: Vec<_> = node
        .input_directories()
        .iter()
        .map(|d| d.display().to_string())
        .collect();
    assert_eq!(dirs, vec!["styles", "shared"]);
}

#[test]
fn test_output_file_may_contain_subdirectories() {
    let fixture = make_fixture(&[("success.css", SUCCESS_CSS)]);
    let node = CssNode::with_plugins(
        vec![fixture.path().to_path_buf()],
        "success.css",
        "assets/css/output.css",
        basic_plugin_set(),
        external_map(),
        None,
    )
    .unwrap();

    let (out, result) = build_into(&node, fixture.path());
    result.unwrap();
    assert!(out.path().join("assets/css/output.css").exists());
    assert!(out.path().join("assets/css/output.css.map").exists());
}
