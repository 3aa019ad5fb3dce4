// crates/cli/src/args.rs
use crate::options::{SchemaArg, SummaryFormat};
use crate::parsers::{self, CharSet};
use adoc_tally_engine::config::DEFAULT_WORKERS;
use clap::{ArgAction, Parser, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "adoc_index",
    version,
    about = "Index .adoc files into SQLite with relative paths"
)]
pub struct IndexArgs {
    /// Directory to scan for .adoc files, or '-' to read file paths from stdin
    #[arg(value_hint = ValueHint::DirPath)]
    pub directory: Option<PathBuf>,

    /// SQLite database path
    #[arg(long, short = 'o', default_value = "files.db", value_hint = ValueHint::FilePath)]
    pub db: PathBuf,

    /// Print a summary of every indexed file to stdout
    #[arg(long)]
    pub summary: bool,

    /// Summary format
    #[arg(long, value_enum, default_value = "tsv")]
    pub summary_format: SummaryFormat,

    /// Number of parallel workers (0 = one per CPU)
    #[arg(long, default_value_t = DEFAULT_WORKERS, value_parser = parsers::parse_workers)]
    pub workers: usize,

    /// Schema normalization depth
    #[arg(long, value_enum, default_value = "flat")]
    pub schema: SchemaArg,

    /// File extensions to index (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub ext: Vec<String>,

    /// Leading characters kept out of the special bucket, e.g. ":/"
    #[arg(long, value_parser = parsers::parse_char_set)]
    pub exclude_special: Option<CharSet>,

    /// YAML file with classifier settings
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Maximum directory depth
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Follow symbolic links
    #[arg(long)]
    pub follow: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Parser, Debug)]
#[command(
    name = "adoc_census",
    version,
    about = "Parse AsciiDoc, convert to HTML, and generate statistics for both constructs"
)]
pub struct CensusArgs {
    /// Input file or '-' for stdin
    #[arg(value_hint = ValueHint::FilePath)]
    pub input_source: String,

    /// CSV output file (default: stdout)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Renderer program that reads AsciiDoc on stdin and writes HTML to stdout
    #[arg(long, default_value = "asciidoctor", value_hint = ValueHint::CommandName)]
    pub renderer: String,

    /// Argument passed to the renderer (repeatable)
    #[arg(long = "renderer-arg", allow_hyphen_values = true)]
    pub renderer_args: Vec<String>,

    /// YAML file overriding or extending the source construct patterns
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub constructs: Option<PathBuf>,

    /// More log output (-v logs every construct hit)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
