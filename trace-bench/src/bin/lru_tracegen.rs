// Standalone trace generator, equivalent to `trace-bench generate`

use clap::{ArgAction, Parser};
use std::process::ExitCode;
use trace_bench::cli::{run_generate, GenerateArgs};
use trace_bench::logging;
use tracing::error;

/// Generate exact-LRU insert/erase traces
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    generate: GenerateArgs,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run_generate(args.generate) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
