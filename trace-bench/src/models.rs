// Data models for trace generation and replay

use crate::trace::RunMetaData;
use crate::workload::{DEFAULT_PROFILE, DEFAULT_TRACE_DIR};
use lru_trace::ProbeStrategy;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Number of timed replays per measurement when none is configured
pub const DEFAULT_TRIALS: usize = 7;

/// A container variant measured by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// Value of the `impl` column
    pub label: &'static str,
    pub strategy: ProbeStrategy,
}

impl Candidate {
    pub const HASH_MAP_DOUBLE: Candidate = Candidate {
        label: "hash_map_double",
        strategy: ProbeStrategy::Double,
    };

    pub const HASH_MAP_SINGLE: Candidate = Candidate {
        label: "hash_map_single",
        strategy: ProbeStrategy::Single,
    };

    pub fn for_strategy(strategy: ProbeStrategy) -> Candidate {
        match strategy {
            ProbeStrategy::Double => Candidate::HASH_MAP_DOUBLE,
            ProbeStrategy::Single => Candidate::HASH_MAP_SINGLE,
        }
    }

    /// Get all candidates, in report order
    pub fn all() -> Vec<Candidate> {
        vec![Candidate::HASH_MAP_DOUBLE, Candidate::HASH_MAP_SINGLE]
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Configuration for a replay sweep
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Root directory; traces are read from `<trace_dir>/<profile>`
    pub trace_dir: PathBuf,
    /// Profile name, also the file name prefix of its traces
    pub profile: String,
    /// Timed replays per (trace, candidate)
    pub trials: usize,
    /// Candidates to measure, in report order
    pub candidates: Vec<Candidate>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            trace_dir: PathBuf::from(DEFAULT_TRACE_DIR),
            profile: DEFAULT_PROFILE.to_string(),
            trials: DEFAULT_TRIALS,
            candidates: Candidate::all(),
        }
    }
}

impl ReplayConfig {
    pub fn profile_dir(&self) -> PathBuf {
        self.trace_dir.join(&self.profile)
    }
}

/// One measurement: a trace replayed against one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub meta: RunMetaData,
    /// Candidate label
    pub implementation: String,
    /// Trace file name without its directory
    pub trace_path: String,
    pub inserts: u64,
    pub erases: u64,
    /// Median of the timed replays
    pub elapsed_ns: u64,
}

impl RunResult {
    /// Column names matching [`csv_fields`](Self::csv_fields).
    pub const CSV_HEADER: [&'static str; 8] = [
        "profile",
        "N",
        "seed",
        "impl",
        "trace_path",
        "inserts",
        "erases",
        "elapsed_ns",
    ];

    pub fn csv_fields(&self) -> [String; 8] {
        [
            self.meta.profile.clone(),
            self.meta.n.to_string(),
            self.meta.seed.to_string(),
            self.implementation.clone(),
            self.trace_path.clone(),
            self.inserts.to_string(),
            self.erases.to_string(),
            self.elapsed_ns.to_string(),
        ]
    }
}

/// Raw timings from one [`ReplayHarness::measure`](crate::runner::ReplayHarness::measure) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayTiming {
    /// Elapsed nanoseconds of each timed replay, in run order
    pub trials_ns: Vec<u64>,
    pub median_ns: u64,
}

/// A trace file that a sweep could not use.
#[derive(Debug, Clone)]
pub struct SkippedTrace {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a replay sweep
#[derive(Debug, Clone, Default)]
pub struct SweepSummary {
    /// Trace files found by discovery
    pub traces: usize,
    /// CSV rows written
    pub rows: usize,
    pub skipped: Vec<SkippedTrace>,
}

/// Manifest row describing one generated trace
#[derive(Debug, Clone, Serialize)]
pub struct ManifestRow {
    pub profile: String,
    #[serde(rename = "N")]
    pub n: u64,
    pub seed: u64,
    pub path: String,
    pub accesses: u64,
    pub inserts: u64,
    pub erases: u64,
    pub hits: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_in_report_order() {
        let labels: Vec<_> = Candidate::all().iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["hash_map_double", "hash_map_single"]);
        assert_eq!(
            Candidate::for_strategy(ProbeStrategy::Single),
            Candidate::HASH_MAP_SINGLE
        );
    }

    #[test]
    fn test_run_result_fields_match_header() {
        let result = RunResult {
            meta: RunMetaData {
                profile: "lru_profile".to_string(),
                n: 1024,
                seed: 23,
            },
            implementation: "hash_map_double".to_string(),
            trace_path: "lru_profile_N_1024_S_23.trace".to_string(),
            inserts: 12288,
            erases: 5000,
            elapsed_ns: 987654,
        };
        assert_eq!(
            result.csv_fields(),
            [
                "lru_profile",
                "1024",
                "23",
                "hash_map_double",
                "lru_profile_N_1024_S_23.trace",
                "12288",
                "5000",
                "987654"
            ]
        );
    }

    #[test]
    fn test_default_replay_config() {
        let config = ReplayConfig::default();
        assert_eq!(config.trials, 7);
        assert_eq!(config.profile_dir(), PathBuf::from("traceFiles/lru_profile"));
    }
}
