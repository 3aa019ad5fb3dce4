// crates/cli/src/index.rs
use crate::args::IndexArgs;
use crate::error::{AppError, Result};
use crate::presentation;
use adoc_tally_engine::config::IndexConfig;
use adoc_tally_engine::filesystem::InputSource;
use adoc_tally_engine::store::CorpusStore;
use clap::CommandFactory;
use std::io;
use std::path::Path;
use tracing::info;

/// Scan, write the corpus and optionally print the summary.
///
/// # Errors
/// `Usage` when no directory is given; engine errors for an invalid
/// directory or any storage failure.
pub fn run(args: &IndexArgs) -> Result<()> {
    let source = match args.directory.as_deref() {
        Some(dir) if dir == Path::new("-") => InputSource::from_reader(io::stdin().lock())?,
        Some(dir) => InputSource::directory(dir)?,
        None => {
            return Err(AppError::Usage(
                IndexArgs::command().render_usage().to_string(),
            ));
        }
    };
    let config = IndexConfig::try_from(args)?;

    let run = adoc_tally_engine::run_index(&source, &config)?;
    if !run.errors.is_empty() {
        info!("Skipped {} unreadable files.", run.errors.len());
    }

    let mut store = CorpusStore::open(&config.db_path, config.schema)?;
    let count = store.write_batch(&run.records)?;
    info!("Wrote {count} records to {}", config.db_path.display());

    if args.summary {
        presentation::write_summary(&run.records, args.summary_format, &mut io::stdout().lock())?;
    }
    Ok(())
}
