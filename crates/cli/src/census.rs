// crates/cli/src/census.rs
use crate::args::CensusArgs;
use crate::error::{AppError, Result};
use adoc_tally_engine::census::constructs::CensusTables;
use adoc_tally_engine::census::report::write_csv;
use adoc_tally_engine::census::run_census;
use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::path::PathBuf;

/// Read the document from a path, or stdin for `-`. Returns the text and
/// the name used in log lines.
///
/// # Errors
/// `Input` if the document cannot be read.
pub fn read_input(source: &str) -> Result<(String, String)> {
    if source == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| AppError::Input {
                path: PathBuf::from("-"),
                source: e,
            })?;
        Ok((text, "stdin".to_string()))
    } else {
        let text = std::fs::read_to_string(source).map_err(|e| AppError::Input {
            path: PathBuf::from(source),
            source: e,
        })?;
        Ok((text, source.to_string()))
    }
}

/// # Errors
/// Any failure reading the input, rendering, or writing the CSV.
pub fn run(args: &CensusArgs) -> Result<()> {
    let (text, origin) = read_input(&args.input_source)?;
    let tables = match &args.constructs {
        Some(path) => CensusTables::load(path)?,
        None => CensusTables::builtin()?,
    };
    let renderer = args.renderer();

    let report = run_census(&text, &origin, &renderer, &tables)?;

    match &args.output {
        Some(path) => {
            let output_err = |e: io::Error| AppError::Output {
                path: path.clone(),
                source: e,
            };
            let file = File::create(path).map_err(output_err)?;
            write_csv(&report.rows, &mut BufWriter::new(file)).map_err(output_err)?;
        }
        None => write_csv(&report.rows, &mut io::stdout().lock())?,
    }
    Ok(())
}
