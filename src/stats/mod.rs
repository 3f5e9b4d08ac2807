//! Stylesheet statistics.
//!
//! Summarizes the transformed CSS into a structured document: overall
//! size, rule/declaration shape, and media-query usage. Parsing is
//! lightningcss's job; this module only walks the AST and counts.


use std::collections::{BTreeMap, BTreeSet};

use lightningcss::printer::PrinterOptions;
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use lightningcss::traits::ToCss;
use serde::Serialize;

use crate::process::ProcessError;

// ============================================================================
// Document shape
// ============================================================================

/// Structured summary of a stylesheet, serialized as the stats artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsDocument {
    /// Size of the processed CSS in bytes.
    pub size: usize,
    pub rules: RuleStats,
    pub declarations: DeclarationStats,
    #[serde(rename = "mediaQueries")]
    pub media_queries: MediaQueryStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleStats {
    /// Style rules, including those nested in media blocks.
    pub total: usize,
    pub size: RuleSize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleSize {
    /// Declaration count per rule, in document order.
    pub graph: Vec<usize>,
    pub max: usize,
    pub average: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeclarationStats {
    pub total: usize,
    /// Property name to every value used with it, in document order.
    pub properties: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaQueryStats {
    pub total: usize,
    pub unique: usize,
    /// Query text per media block, in document order.
    pub values: Vec<String>,
    pub contents: Vec<MediaContent>,
}

/// Per-media-block summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaContent {
    pub value: String,
    pub rules: usize,
    pub declarations: usize,
}

// ============================================================================
// Analysis
// ============================================================================

fn stats_error(err: impl std::fmt::Display) -> ProcessError {
    ProcessError::Stats {
        message: err.to_string(),
    }
}

/// Analyze the transformed CSS.
pub fn analyze(css: &str) -> Result<StatsDocument, ProcessError> {
    let stylesheet = StyleSheet::parse(css, ParserOptions::default()).map_err(stats_error)?;

    let mut doc = StatsDocument {
        size: css.len(),
        ..StatsDocument::default()
    };
    collect(&stylesheet.rules.0, &mut doc)?;

    doc.rules.size.max = doc.rules.size.graph.iter().copied().max().unwrap_or(0);
    doc.rules.size.average = if doc.rules.total > 0 {
        doc.declarations.total as f64 / doc.rules.total as f64
    } else {
        0.0
    };
    doc.media_queries.unique = doc
        .media_queries
        .values
        .iter()
        .collect::<BTreeSet<_>>()
        .len();

    Ok(doc)
}

fn collect(rules: &[CssRule], doc: &mut StatsDocument) -> Result<(), ProcessError> {
    for rule in rules {
        match rule {
            CssRule::Style(style) => {
                let mut count = 0;
                let declarations = style
                    .declarations
                    .declarations
                    .iter()
                    .chain(style.declarations.important_declarations.iter());
                for property in declarations {
                    let name = property.property_id().name().to_string();
                    let value = property
                        .value_to_css_string(PrinterOptions::default())
                        .map_err(stats_error)?;
                    doc.declarations.properties.entry(name).or_default().push(value);
                    count += 1;
                }
                doc.declarations.total += count;
                doc.rules.total += 1;
                doc.rules.size.graph.push(count);

                // CSS nesting: child rules count like top-level ones.
                collect(&style.rules.0, doc)?;
            }
            CssRule::Media(media) => {
                let value = media
                    .query
                    .to_css_string(PrinterOptions::default())
                    .map_err(stats_error)?;
                let rules_before = doc.rules.total;
                let declarations_before = doc.declarations.total;
                collect(&media.rules.0, doc)?;

                doc.media_queries.total += 1;
                doc.media_queries.values.push(value.clone());
                doc.media_queries.contents.push(MediaContent {
                    value,
                    rules: doc.rules.total - rules_before,
                    declarations: doc.declarations.total - declarations_before,
                });
            }
            _ => {}
        }
    }
    Ok(())
}
