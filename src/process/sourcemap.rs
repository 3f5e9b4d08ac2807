//! Source-map construction for the transformed stylesheet.
//!
//! The plugin chain transforms text, so per-token positions are not
//! tracked; the map is a line-identity mapping over the final CSS with the
//! original source attached as `sourcesContent`. Encoding and
//! serialization are delegated to `parcel_sourcemap`, the toolchain's map
//! library.

use parcel_sourcemap::{OriginalLocation, SourceMap};

use super::ProcessError;
use crate::config::MapConfig;

fn map_error(err: impl std::fmt::Display) -> ProcessError {
    ProcessError::Map {
        message: err.to_string(),
    }
}

/// Build the map for the final CSS, apply the configured annotation, and
/// serialize the external map when one was requested.
///
/// Returns the annotated CSS and the serialized map (present iff the map
/// is non-inline).
pub(crate) fn apply(
    css: String,
    source: &str,
    source_file: &str,
    output_file: &str,
    config: MapConfig,
) -> Result<(String, Option<String>), ProcessError> {
    let mut map = build(source_file, source, &css)?;

    // An inline map always carries its annotation; that is what makes it
    // inline.
    if config.inline {
        let url = map.to_data_url(None).map_err(map_error)?;
        let css = format!("{css}\n/*# sourceMappingURL={url} */");
        return Ok((css, None));
    }

    let json = map.to_json(None).map_err(map_error)?;
    let css = if config.annotation {
        format!("{css}\n/*# sourceMappingURL={output_file}.map */")
    } else {
        css
    };
    Ok((css, Some(json)))
}

/// Line-identity mapping: generated line N points at source line N,
/// clamped to the last source line.
fn build(source_file: &str, source: &str, generated: &str) -> Result<SourceMap, ProcessError> {
    let mut map = SourceMap::new("/");
    let source_index = map.add_source(source_file);
    map.set_source_content(source_index as usize, source)
        .map_err(map_error)?;

    let source_lines = source.lines().count().max(1) as u32;
    let generated_lines = generated.lines().count().max(1) as u32;
    for line in 0..generated_lines {
        map.add_mapping(
            line,
            0,
            Some(OriginalLocation {
                original_line: line.min(source_lines - 1),
                original_column: 0,
                source: source_index,
                name: None,
            }),
        );
    }
    Ok(map)
}
