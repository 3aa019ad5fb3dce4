use adoc_tally_cli::args::CensusArgs;
use adoc_tally_cli::{census, logging};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CensusArgs::parse();
    logging::init(args.verbose);

    match census::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
