//! Single-file transform invocation.
//!
//! One build pass: read the source file, validate its syntax, run the
//! plugin chain in configured order, build the source map, and optionally
//! analyze the result. Parsing is delegated to lightningcss; this module
//! owns only the orchestration and the fatal-error taxonomy.

mod sourcemap;


use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use thiserror::Error;

use crate::config::{MapConfig, StatsConfig};
use crate::diagnostics::Warning;
use crate::plugin::{PluginConfig, PluginDiagnostics};
use crate::stats::{self, StatsDocument};

// ============================================================================
// Errors
// ============================================================================

/// A fatal build-pass failure.
///
/// `Syntax` is the only tagged kind; everything else is the opaque
/// "other error" class the build engine treats uniformly. At most one
/// fatal error occurs per pass, and a failing pass forwards no warnings
/// (the syntax gate runs before any plugin).
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The source CSS failed to parse.
    #[error("{file}:{line}:{column}: {message}")]
    Syntax {
        file: String,
        line: u32,
        column: u32,
        message: String,
    },

    /// Reading the source file failed (missing file, I/O failure).
    #[error("failed to read `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A plugin step failed; the original error is preserved as-is.
    #[error("plugin `{plugin}` failed")]
    Plugin {
        plugin: String,
        #[source]
        source: anyhow::Error,
    },

    /// Building or serializing the source map failed.
    #[error("source map generation failed: {message}")]
    Map { message: String },

    /// Analyzing or serializing the stats document failed.
    #[error("stats analysis failed: {message}")]
    Stats { message: String },

    /// Writing an output artifact failed.
    #[error("failed to write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The build engine supplied no materialized input directory.
    #[error("no input directory supplied for the build pass")]
    NoInput,
}

impl ProcessError {
    /// Engine-facing error tag: `CssSyntaxError` for parse failures,
    /// `Error` for everything else.
    pub fn name(&self) -> &'static str {
        match self {
            ProcessError::Syntax { .. } => "CssSyntaxError",
            _ => "Error",
        }
    }

    /// Whether this failure is a CSS parse failure.
    pub fn is_syntax(&self) -> bool {
        matches!(self, ProcessError::Syntax { .. })
    }
}

// ============================================================================
// Request / output
// ============================================================================

/// Inputs for one transform invocation.
#[derive(Debug)]
pub struct ProcessRequest<'a> {
    /// Resolved path of the source file inside the materialized input
    /// directory.
    pub source_path: &'a Path,
    /// Source filename, used for syntax diagnostics and the map's
    /// `sources` entry.
    pub source_file: &'a str,
    /// Output filename, referenced by the map annotation.
    pub output_file: &'a str,
    /// Plugin chain, applied in order.
    pub plugins: &'a [PluginConfig],
    pub map: MapConfig,
    pub stats: Option<StatsConfig>,
}

/// Output of a successful pass, ready for the artifact writer.
#[derive(Debug)]
pub struct TransformOutput {
    /// Processed CSS, annotation already applied.
    pub css: String,
    /// Serialized source map, present iff an external map was requested.
    pub map: Option<String>,
    /// Stats document, present iff requested.
    pub stats: Option<StatsDocument>,
    /// Plugin warnings in emission order.
    pub warnings: Vec<Warning>,
}

// ============================================================================
// Invocation
// ============================================================================

/// Run one transform pass.
pub fn run(request: &ProcessRequest<'_>) -> Result<TransformOutput, ProcessError> {
    let source = fs::read_to_string(request.source_path).map_err(|source| ProcessError::Io {
        path: request.source_path.to_path_buf(),
        source,
    })?;

    // Syntax gate before any plugin runs: a failing pass must not surface
    // plugin warnings.
    check_syntax(&source, request.source_file)?;

    let mut warnings = Vec::new();
    let mut css = source.clone();
    for config in request.plugins {
        let plugin = config.instantiate();
        let name = plugin.name().to_string();
        let mut diag = PluginDiagnostics::new(&name, &mut warnings);
        let result = plugin.transform(&css, &mut diag);
        css = result.map_err(|source| ProcessError::Plugin {
            plugin: name.clone(),
            source,
        })?;
    }

    let (css, map) = sourcemap::apply(
        css,
        &source,
        request.source_file,
        request.output_file,
        request.map,
    )?;

    let stats = match request.stats {
        Some(config) if config.enabled => Some(stats::analyze(&css)?),
        _ => None,
    };

    Ok(TransformOutput {
        css,
        map,
        stats,
        warnings,
    })
}

/// Parse the source with lightningcss, mapping failures to the tagged
/// syntax error.
fn check_syntax(source: &str, file: &str) -> Result<(), ProcessError> {
    let options = ParserOptions {
        filename: file.to_string(),
        ..ParserOptions::default()
    };
    match StyleSheet::parse(source, options) {
        Ok(_) => Ok(()),
        Err(err) => {
            let (line, column) = err
                .loc
                .as_ref()
                .map(|loc| (loc.line + 1, loc.column))
                .unwrap_or((0, 0));
            Err(ProcessError::Syntax {
                file: file.to_string(),
                line,
                column,
                message: err.kind.to_string(),
            })
        }
    }
}
