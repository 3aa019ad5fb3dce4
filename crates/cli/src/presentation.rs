// crates/cli/src/presentation.rs
use crate::error::Result;
use crate::options::SummaryFormat;
use adoc_tally_engine::stats::FileMetrics;
use std::io::Write;

const SUMMARY_COLUMNS: [&str; 10] = [
    "path", "filename", "created", "modified", "size", "total", "alnum", "special", "comments",
    "defs",
];

/// # Errors
/// Returns the writer's I/O error or a JSON serialization error.
pub fn write_summary(
    records: &[FileMetrics],
    format: SummaryFormat,
    out: &mut impl Write,
) -> Result<()> {
    match format {
        SummaryFormat::Tsv => write_tsv(records, out)?,
        SummaryFormat::Json => write_json(records, out)?,
    }
    out.flush()?;
    Ok(())
}

fn write_tsv(records: &[FileMetrics], out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", SUMMARY_COLUMNS.join("\t"))?;
    for r in records {
        let row = [
            r.path.clone(),
            r.filename.clone(),
            r.created_str().unwrap_or_default(),
            r.modified_str().unwrap_or_default(),
            r.size.to_string(),
            r.counts.total_lines.to_string(),
            r.counts.alnum_start.to_string(),
            r.counts.special_start.to_string(),
            r.counts.comment_lines.to_string(),
            r.counts.definition_lines.to_string(),
        ];
        writeln!(out, "{}", row.join("\t"))?;
    }
    Ok(())
}

fn write_json(records: &[FileMetrics], out: &mut impl Write) -> Result<()> {
    let rows: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            serde_json::json!({
                "path": r.path,
                "filename": r.filename,
                "created": r.created_str(),
                "modified": r.modified_str(),
                "size": r.size,
                "total_lines": r.counts.total_lines,
                "alnum_start": r.counts.alnum_start,
                "special_start": r.counts.special_start,
                "comment_lines": r.counts.comment_lines,
                "definition_lines": r.counts.definition_lines,
                "definitions": r.definitions,
            })
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &rows)?;
    writeln!(out)?;
    Ok(())
}
