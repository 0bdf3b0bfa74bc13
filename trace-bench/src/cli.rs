//! Command line arguments shared by the `trace-bench` and `lru-tracegen` binaries.

use crate::error::Result;
use crate::generator::CorpusGenerator;
use crate::models::{Candidate, ReplayConfig, DEFAULT_TRIALS};
use crate::runner::SweepRunner;
use crate::workload::{
    sizes_from_exponents, KeySource, WorkloadConfig, DEFAULT_MAX_EXP, DEFAULT_MIN_EXP,
    DEFAULT_PROFILE, DEFAULT_SEEDS, DEFAULT_TRACE_DIR, DEFAULT_WORD_LIST,
};
use clap::{Args, ValueEnum};
use lru_trace::ProbeStrategy;
use std::io;
use std::path::PathBuf;
use tracing::warn;

/// Probing discipline selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    /// Double hashing
    Double,
    /// Linear probing, step 1
    Single,
}

impl From<StrategyArg> for ProbeStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Double => ProbeStrategy::Double,
            StrategyArg::Single => ProbeStrategy::Single,
        }
    }
}

/// Trace generation options
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Profile name; traces go to <TRACE_DIR>/<PROFILE>/
    #[arg(short, long, default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Root directory for generated traces
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_TRACE_DIR)]
    pub trace_dir: PathBuf,

    /// Seeds to generate, one trace per seed and size (default: 23)
    #[arg(long, value_name = "SEEDS", num_args = 1.., value_delimiter = ',')]
    pub seeds: Option<Vec<u64>>,

    /// Smallest working-set size, as a power of two
    #[arg(long, default_value_t = DEFAULT_MIN_EXP, value_parser = clap::value_parser!(u32).range(0..=40))]
    pub min_exp: u32,

    /// Largest working-set size, as a power of two
    #[arg(long, default_value_t = DEFAULT_MAX_EXP, value_parser = clap::value_parser!(u32).range(0..=40))]
    pub max_exp: u32,

    /// Word list to draw keys from, one key per line
    #[arg(long, value_name = "PATH", default_value = DEFAULT_WORD_LIST)]
    pub word_list: PathBuf,

    /// Use generated keys instead of a word list
    #[arg(long, conflicts_with = "word_list")]
    pub synthetic_keys: bool,
}

impl GenerateArgs {
    pub fn into_config(self) -> WorkloadConfig {
        let keys = if self.synthetic_keys {
            KeySource::Synthetic
        } else {
            KeySource::WordList(self.word_list)
        };
        WorkloadConfig {
            profile: self.profile,
            seeds: self.seeds.unwrap_or_else(|| DEFAULT_SEEDS.to_vec()),
            sizes: sizes_from_exponents(self.min_exp, self.max_exp),
            trace_dir: self.trace_dir,
            keys,
        }
    }
}

/// Replay sweep options
#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Profile to replay; traces are read from <TRACE_DIR>/<PROFILE>/
    #[arg(short, long, default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Root directory holding per-profile trace directories
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_TRACE_DIR)]
    pub trace_dir: PathBuf,

    /// Timed replays per trace and strategy, after one warm-up
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    pub trials: usize,

    /// Probing strategies to measure (default: double,single)
    #[arg(short, long, value_name = "STRATEGIES", num_args = 1.., value_delimiter = ',')]
    pub strategies: Option<Vec<StrategyArg>>,
}

impl ReplayArgs {
    pub fn into_config(self) -> ReplayConfig {
        let candidates = match self.strategies {
            Some(strategies) => {
                let mut candidates: Vec<Candidate> = Vec::with_capacity(strategies.len());
                for strategy in strategies {
                    let candidate = Candidate::for_strategy(strategy.into());
                    if !candidates.contains(&candidate) {
                        candidates.push(candidate);
                    }
                }
                candidates
            }
            None => Candidate::all(),
        };
        ReplayConfig {
            trace_dir: self.trace_dir,
            profile: self.profile,
            trials: self.trials,
            candidates,
        }
    }
}

/// Generates a trace corpus.
pub fn run_generate(args: GenerateArgs) -> Result<()> {
    let config = args.into_config();
    if config.sizes.is_empty() {
        warn!("--min-exp is larger than --max-exp; no traces will be generated");
    }
    CorpusGenerator::new(config).generate()?;
    Ok(())
}

/// Runs a replay sweep, writing the CSV report to stdout.
pub fn run_replay(args: ReplayArgs) -> Result<()> {
    let runner = SweepRunner::new(args.into_config())?;
    let summary = runner.run(io::stdout().lock())?;
    if !summary.skipped.is_empty() {
        warn!(
            skipped = summary.skipped.len(),
            traces = summary.traces,
            "some trace files were malformed and left out of the report"
        );
    }
    Ok(())
}
