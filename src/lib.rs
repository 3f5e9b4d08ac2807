//! Cassis - CSS post-processing node for file-tree build pipelines.
//!
//! A [`CssNode`] wires one CSS file through a configured chain of transform
//! plugins and writes the processed CSS, an optional source map, and an
//! optional statistics document into a build output directory. Scheduling,
//! caching, and output-tree assembly belong to the external build engine:
//! the node only implements [`BuildNode`], the input/output directory
//! contract, and reports fatal failures through `build`'s `Result`.
//! Non-fatal plugin warnings stream to a caller-attached [`WarningSink`].
//!
//! # Example
//!
//! ```no_run
//! use cassis::plugin::pseudo::PseudoElements;
//! use cassis::{BuildNode, CssNode, MapConfig, NodeOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let node = CssNode::new(
//!     ["styles"],
//!     "app.css",
//!     "app.css",
//!     NodeOptions {
//!         plugins: vec![PseudoElements::config()],
//!         map: MapConfig::default(),
//!         stats: None,
//!     },
//! )?;
//!
//! // Driven by the build engine: one materialized input directory in, one
//! // output directory populated per pass.
//! node.build(&["styles".into()], std::path::Path::new("out"))?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod diagnostics;
pub mod logger;
pub mod node;
pub mod plugin;
pub mod process;
pub mod stats;

pub use config::{ConfigError, InputArg, MapConfig, NodeOptions, StatsConfig};
pub use diagnostics::{Warning, WarningSink};
pub use node::{BuildNode, CssNode};
pub use plugin::{Plugin, PluginConfig, PluginDiagnostics};
pub use process::{ProcessError, TransformOutput};
pub use stats::StatsDocument;
