//! CSS transform plugins.
//!
//! A build pass instantiates each configured plugin fresh (its factory is
//! invoked with the configured options value) and runs the chain strictly
//! in configured order; every step receives the previous step's output.
//! Plugins transform stylesheet text and may report non-fatal warnings
//! through the diagnostics collector they are handed.

pub mod pseudo;


use crate::diagnostics::Warning;
use anyhow::Result;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Plugin trait
// ============================================================================

/// A single runnable transform step.
pub trait Plugin {
    /// Plugin name, used to attribute warnings.
    fn name(&self) -> &str;

    /// Transform the stylesheet text.
    ///
    /// Warnings go through `diag` and never abort the pass; a returned
    /// error fails the whole pass.
    fn transform(&self, css: &str, diag: &mut PluginDiagnostics<'_>) -> Result<String>;
}

/// Scoped warning collector handed to a plugin for one chain step.
///
/// Warnings recorded here are attributed to the step's plugin and kept in
/// emission order across the whole chain.
pub struct PluginDiagnostics<'a> {
    plugin: &'a str,
    warnings: &'a mut Vec<Warning>,
}

impl<'a> PluginDiagnostics<'a> {
    pub(crate) fn new(plugin: &'a str, warnings: &'a mut Vec<Warning>) -> Self {
        Self { plugin, warnings }
    }

    /// Record a non-fatal warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(Warning::new(self.plugin, message));
    }
}

// ============================================================================
// Plugin configuration
// ============================================================================

/// Factory invoked with the configured options to produce a runnable step.
type PluginModule = dyn Fn(&Value) -> Box<dyn Plugin> + Send + Sync;

/// One entry of the configured plugin chain: an opaque step producer plus
/// the options mapping it is instantiated with.
#[derive(Clone)]
pub struct PluginConfig {
    module: Arc<PluginModule>,
    options: Value,
}

impl PluginConfig {
    /// Wrap a step producer with no options.
    pub fn new<F>(module: F) -> Self
    where
        F: Fn(&Value) -> Box<dyn Plugin> + Send + Sync + 'static,
    {
        Self {
            module: Arc::new(module),
            options: Value::Null,
        }
    }

    /// Attach an options mapping, passed to the producer at instantiation.
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }

    /// Produce a runnable step for one build pass.
    pub(crate) fn instantiate(&self) -> Box<dyn Plugin> {
        (self.module)(&self.options)
    }
}

impl fmt::Debug for PluginConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginConfig")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
