use clap::{ArgAction, Parser, Subcommand};
use std::process::ExitCode;
use trace_bench::cli::{run_generate, run_replay, GenerateArgs, ReplayArgs};
use trace_bench::logging;
use tracing::error;

/// Exact-LRU trace generator and hash table replay benchmark
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate LRU traces for a profile
    Generate(GenerateArgs),

    /// Replay a profile's traces and print a CSV report to stdout
    Replay(ReplayArgs),
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let result = match args.command {
        Commands::Generate(generate) => run_generate(generate),
        Commands::Replay(replay) => run_replay(replay),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
