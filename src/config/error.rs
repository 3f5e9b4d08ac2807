//! Configuration error types.

use thiserror::Error;

/// Errors raised synchronously at node construction.
///
/// The contract is deliberately narrow: only the shape of the input
/// argument and the presence of at least one plugin are checked here.
/// Everything else (missing directories, unreadable files) surfaces as a
/// pass failure when the build engine runs the node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The input-directories argument was a bare path, not a sequence.
    #[error("Expected array for first argument")]
    InputNotArray,

    /// The plugin list was empty.
    #[error("You must provide at least 1 plugin in the plugin array")]
    EmptyPluginList,
}
