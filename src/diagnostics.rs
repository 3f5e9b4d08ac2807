//! Warning collection and forwarding.
//!
//! Plugins report non-fatal diagnostics while a build pass runs. The node
//! forwards them, in emission order, to a caller-attached [`WarningSink`].
//! The attachment is per-node-instance so that concurrently building nodes
//! never cross-contaminate each other's diagnostics.

use parking_lot::Mutex;
use std::fmt;

// ============================================================================
// Warning
// ============================================================================

/// A non-fatal diagnostic emitted by a plugin during a build pass.
///
/// Warnings never abort processing; they are collected in emission order and
/// forwarded after the transform succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Name of the plugin that emitted the warning.
    pub plugin: String,
    /// Human-readable message.
    pub message: String,
}

impl Warning {
    pub fn new(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.plugin, self.message)
    }
}

// ============================================================================
// WarningSink
// ============================================================================

/// Receiver for formatted warning strings.
///
/// Implementors get one `write` call per warning, in emission order.
pub trait WarningSink: Send {
    fn write(&mut self, message: &str);
}

/// The node's sink attachment point.
///
/// Holds no warnings itself; when no sink is attached, forwarded warnings
/// are dropped without buffering.
#[derive(Default)]
pub struct WarningStream {
    sink: Mutex<Option<Box<dyn WarningSink>>>,
}

impl WarningStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install (or replace) the sink.
    pub fn attach(&self, sink: impl WarningSink + 'static) {
        *self.sink.lock() = Some(Box::new(sink));
    }

    /// Remove the sink; subsequent warnings are dropped.
    pub fn detach(&self) {
        *self.sink.lock() = None;
    }

    /// Forward a batch of warnings, one `write` per warning.
    pub fn forward(&self, warnings: &[Warning]) {
        let mut guard = self.sink.lock();
        if let Some(sink) = guard.as_mut() {
            for warning in warnings {
                sink.write(&warning.to_string());
            }
        }
    }
}

impl fmt::Debug for WarningStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attached = self.sink.lock().is_some();
        f.debug_struct("WarningStream")
            .field("attached", &attached)
            .finish()
    }
}
