//! The build-node adapter.
//!
//! Exposes the crate's externally visible unit: a node the external build
//! engine can schedule. The engine materializes the configured input
//! directories, hands them to `build` together with an output directory
//! owned exclusively by the pass, and decides retries on failure. The node
//! holds no state across passes beyond its immutable request and the
//! caller-attached warning sink.

mod write;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use crate::config::{ConfigError, InputArg, MapConfig, NodeOptions, StatsConfig};
use crate::diagnostics::{WarningSink, WarningStream};
use crate::plugin::PluginConfig;
use crate::process::{self, ProcessError, ProcessRequest};
use crate::{debug, log};

// ============================================================================
// BuildNode
// ============================================================================

/// A unit consumable by the external build engine.
///
/// One `build` call is one pass: the engine supplies the materialized
/// directories corresponding to `input_directories()` plus an output
/// directory assigned to this pass alone.
pub trait BuildNode {
    /// Directories this node consumes, in configured order.
    fn input_directories(&self) -> &[PathBuf];

    /// Run one build pass, populating `output_dir`.
    fn build(&self, input_dirs: &[PathBuf], output_dir: &Path) -> Result<(), ProcessError>;
}

// ============================================================================
// CssNode
// ============================================================================

/// CSS post-processing node.
///
/// Reads one source file from the first input directory, runs the plugin
/// chain, and writes the CSS, map, and stats artifacts into the output
/// directory.
#[derive(Debug)]
pub struct CssNode {
    inputs: Vec<PathBuf>,
    source_file: String,
    output_file: String,
    plugins: Vec<PluginConfig>,
    map: MapConfig,
    stats: Option<StatsConfig>,
    warning_stream: WarningStream,
}

impl CssNode {
    /// Construct with an options struct.
    ///
    /// Fails synchronously when the input argument is not a sequence or the
    /// plugin list is empty; nothing else is defence-checked here.
    pub fn new(
        inputs: impl Into<InputArg>,
        source_file: impl Into<String>,
        output_file: impl Into<String>,
        options: NodeOptions,
    ) -> Result<Self, ConfigError> {
        let inputs = inputs.into().into_list()?;
        options.validate()?;
        Ok(Self {
            inputs,
            source_file: source_file.into(),
            output_file: output_file.into(),
            plugins: options.plugins,
            map: options.map,
            stats: options.stats,
            warning_stream: WarningStream::new(),
        })
    }

    /// Flattened calling convention: plugins, map, and stats as positional
    /// arguments instead of an options struct.
    pub fn with_plugins(
        inputs: impl Into<InputArg>,
        source_file: impl Into<String>,
        output_file: impl Into<String>,
        plugins: Vec<PluginConfig>,
        map: MapConfig,
        stats: Option<StatsConfig>,
    ) -> Result<Self, ConfigError> {
        Self::new(
            inputs,
            source_file,
            output_file,
            NodeOptions {
                plugins,
                map,
                stats,
            },
        )
    }

    /// Attach the warning sink used by subsequent passes.
    pub fn set_warning_stream(&self, sink: impl WarningSink + 'static) {
        self.warning_stream.attach(sink);
    }
}

impl BuildNode for CssNode {
    fn input_directories(&self) -> &[PathBuf] {
        &self.inputs
    }

    fn build(&self, input_dirs: &[PathBuf], output_dir: &Path) -> Result<(), ProcessError> {
        let input = input_dirs.first().ok_or(ProcessError::NoInput)?;
        let source_path = input.join(&self.source_file);

        debug!("css"; "processing {}", source_path.display());
        let output = process::run(&ProcessRequest {
            source_path: &source_path,
            source_file: &self.source_file,
            output_file: &self.output_file,
            plugins: &self.plugins,
            map: self.map,
            stats: self.stats,
        })?;

        if !output.warnings.is_empty() {
            log!("warn"; "{} warning(s) from {}", output.warnings.len(), self.source_file);
        }
        self.warning_stream.forward(&output.warnings);

        write::write_artifacts(output_dir, &self.output_file, &output)
    }
}
