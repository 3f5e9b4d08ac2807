//! Artifact persistence for a successful build pass.

use std::fs;
use std::path::Path;

use crate::debug;
use crate::process::{ProcessError, TransformOutput};

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> ProcessError {
    let path = path.to_path_buf();
    move |source| ProcessError::Write { path, source }
}

/// Write the CSS, map, and stats artifacts into the output directory.
///
/// Any failed write fails the whole pass; partial output is discarded by
/// the engine together with the pass's output directory.
pub(crate) fn write_artifacts(
    output_dir: &Path,
    output_file: &str,
    output: &TransformOutput,
) -> Result<(), ProcessError> {
    let css_path = output_dir.join(output_file);
    if let Some(parent) = css_path.parent() {
        fs::create_dir_all(parent).map_err(write_error(parent))?;
    }
    fs::write(&css_path, &output.css).map_err(write_error(&css_path))?;
    debug!("write"; "{} ({} bytes)", css_path.display(), output.css.len());

    if let Some(map) = &output.map {
        let map_path = output_dir.join(format!("{output_file}.map"));
        fs::write(&map_path, map).map_err(write_error(&map_path))?;
        debug!("write"; "{}", map_path.display());
    }

    if let Some(stats) = &output.stats {
        let json = serde_json::to_string_pretty(stats).map_err(|err| ProcessError::Stats {
            message: err.to_string(),
        })?;
        let stats_path = output_dir.join(format!("{output_file}.stats.json"));
        fs::write(&stats_path, json).map_err(write_error(&stats_path))?;
        debug!("write"; "{}", stats_path.display());
    }

    Ok(())
}
