use crate::census::constructs::StructuralTable;
use crate::census::tally::Tally;
use serde::Serialize;
use std::cmp::Ordering;
use std::io::Write;

pub const CSV_HEADER: [&str; 4] = [
    "AsciiDoc Construct",
    "HTML Construct",
    "AsciiDoc Count",
    "HTML Count",
];

const NO_SELECTOR: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub construct: String,
    pub selector: String,
    pub source_count: usize,
    pub rendered_count: usize,
}

/// One row per construct present in either tally.
///
/// Rows follow the structural table order; names unknown to the table go
/// last, alphabetically, with an `N/A` selector.
pub fn compare(source: &Tally, rendered: &Tally, table: &StructuralTable) -> Vec<ComparisonRow> {
    let mut names: Vec<&str> = source.names().collect();
    names.extend(rendered.names().filter(|n| !source.contains(n)));

    names.sort_by(|a, b| match (table.position(a), table.position(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    });

    names
        .into_iter()
        .map(|name| ComparisonRow {
            construct: name.to_string(),
            selector: table.selector(name).unwrap_or(NO_SELECTOR).to_string(),
            source_count: source.get(name),
            rendered_count: rendered.get(name),
        })
        .collect()
}

/// Quote a field if it contains the separator, a quote or a line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// # Errors
/// Returns the writer's I/O error.
pub fn write_csv(rows: &[ComparisonRow], out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", CSV_HEADER.join(","))?;
    for row in rows {
        writeln!(
            out,
            "{},{},{},{}",
            escape_field(&row.construct),
            escape_field(&row.selector),
            row.source_count,
            row.rendered_count
        )?;
    }
    out.flush()
}
