// crates/engine/src/lib.rs
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{error, info};

pub mod census;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod options;
pub mod processor;
pub mod stats;
pub mod store;

use crate::config::IndexConfig;
use crate::error::{EngineError, Result};
use crate::filesystem::InputSource;
use crate::stats::{FileMetrics, IndexRun};

/// Analyse every file of `source` on a bounded worker pool.
///
/// Records are collected before anything is written. A file that cannot be
/// stat'ed or read is logged, lands in `IndexRun::errors` and produces no
/// record; its siblings are unaffected.
///
/// # Errors
///
/// Returns an error only for setup failures (thread pool, walk root).
pub fn run_index(source: &InputSource, config: &IndexConfig) -> Result<IndexRun> {
    let workers = config.workers.max(1);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;

    let (tx, rx) = crossbeam_channel::bounded(1024);
    let (err_tx, err_rx) = std::sync::mpsc::channel();

    let walk_source = source.clone();
    let walk_cfg = config.walk.clone();
    let walker = std::thread::spawn(move || {
        if let Err(e) = crate::filesystem::send_inputs(&walk_source, &walk_cfg, &tx) {
            let _ = err_tx.send(e);
        }
    });

    let base = source.base();
    let classifier = &config.classifier;
    info!("Base directory: {}", base.display());
    info!("Starting analysis with {workers} workers");

    let outcomes: Vec<(PathBuf, Result<FileMetrics>)> = pool.install(|| {
        rx.into_iter()
            .par_bridge()
            .map(|path| {
                let outcome = processor::analyze_file(&path, base, classifier);
                (path, outcome)
            })
            .collect()
    });

    if walker.join().is_err() {
        return Err(EngineError::Config("walker thread panicked".to_string()));
    }
    if let Ok(walk_err) = err_rx.try_recv() {
        return Err(walk_err);
    }

    let mut run = IndexRun::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(record) => run.records.push(record),
            Err(e) => {
                error!("{e}");
                run.errors.push((path, e));
            }
        }
    }
    run.records.sort_by(|a, b| a.path.cmp(&b.path));

    info!("Analyzed {} files.", run.processed());
    Ok(run)
}
