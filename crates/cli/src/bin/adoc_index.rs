use adoc_tally_cli::args::IndexArgs;
use adoc_tally_cli::error::AppError;
use adoc_tally_cli::{index, logging};
use clap::Parser;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let args = IndexArgs::parse();
    logging::init(args.verbose);

    match index::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Usage(usage)) => {
            eprintln!("{usage}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
