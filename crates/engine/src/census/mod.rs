//! Construct census: compare AsciiDoc source constructs with the HTML
//! structures they render to.

pub mod constructs;
pub mod render;
pub mod report;
pub mod source;
pub mod structural;
pub mod tally;

use crate::error::Result;
use constructs::CensusTables;
use render::Renderer;
use report::ComparisonRow;
use source::ConstructHit;
use tally::Tally;
use tracing::info;

#[derive(Debug, Clone)]
pub struct CensusReport {
    pub source: Tally,
    pub rendered: Tally,
    pub hits: Vec<ConstructHit>,
    pub rows: Vec<ComparisonRow>,
}

/// Classify `text`, render it, classify the rendered tree and compare.
///
/// # Errors
/// Any renderer failure aborts the run.
pub fn run_census(
    text: &str,
    origin: &str,
    renderer: &dyn Renderer,
    tables: &CensusTables,
) -> Result<CensusReport> {
    info!("Parsing AsciiDoc content...");
    let tree = renderer.render(text)?;
    let scan = source::classify_source(text, origin, &tables.source);
    info!("AsciiDoc parsing complete.");

    info!("Parsing HTML content...");
    let rendered = structural::classify_tree(&tree, &tables.structural);
    info!("HTML parsing complete.");

    let rows = report::compare(&scan.tally, &rendered, &tables.structural);
    Ok(CensusReport {
        source: scan.tally,
        rendered,
        hits: scan.hits,
        rows,
    })
}
