//! Replay sweeps
//!
//! A sweep discovers every trace of a profile, parses each one, sizes a fresh
//! container from the table for the trace's N, and times the trace replayed
//! into it. One CSV row is written per (trace, candidate) pair.
//!
//! Timing follows a warm-up-then-median scheme:
//!
//! 1. clear the container and replay once, untimed
//! 2. for each trial, clear the container and replay under a monotonic clock
//! 3. report the median trial
//!
//! Clearing also resets the container's statistics, so the stats columns of a
//! row describe the final trial.

use crate::capacity::table_size_for;
use crate::discovery::TraceDiscovery;
use crate::error::{BenchError, Result};
use crate::models::{
    Candidate, ReplayConfig, ReplayTiming, RunResult, SkippedTrace, SweepSummary,
};
use crate::stats::ReportWriter;
use crate::trace::{load_trace, OpCode, Operation};
use crate::workload::validate_profile;
use lru_trace::{HashTableDictionary, KeyedContainer, TableMetrics};
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Applies `ops` to `container` in order.
pub fn replay<C: KeyedContainer + ?Sized>(container: &mut C, ops: &[Operation]) {
    for op in ops {
        match op.tag {
            OpCode::Insert => {
                container.insert(&op.key);
            }
            OpCode::Erase => {
                container.remove(&op.key);
            }
        }
    }
}

/// Median of `samples`; the upper median for an even count.
///
/// Returns 0 for an empty slice.
pub fn median(samples: &[u64]) -> u64 {
    if samples.is_empty() {
        return 0;
    }
    let mut scratch = samples.to_vec();
    let mid = scratch.len() / 2;
    let (_, median, _) = scratch.select_nth_unstable(mid);
    *median
}

/// Times trace replays against a container.
#[derive(Debug, Clone, Copy)]
pub struct ReplayHarness {
    trials: usize,
}

impl ReplayHarness {
    pub fn new(trials: usize) -> Result<Self> {
        if trials == 0 {
            return Err(BenchError::InvalidTrials(trials));
        }
        Ok(Self { trials })
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Warms up once, then times `trials` replays of `ops`, each into a freshly
    /// cleared container.
    pub fn measure<C: KeyedContainer + ?Sized>(
        &self,
        container: &mut C,
        ops: &[Operation],
    ) -> ReplayTiming {
        container.clear();
        replay(container, ops);

        let mut trials_ns = Vec::with_capacity(self.trials);
        for _ in 0..self.trials {
            container.clear();
            let start = Instant::now();
            replay(container, ops);
            let elapsed = start.elapsed().as_nanos();
            trials_ns.push(u64::try_from(elapsed).unwrap_or(u64::MAX));
        }

        let median_ns = median(&trials_ns);
        ReplayTiming {
            trials_ns,
            median_ns,
        }
    }
}

/// Runs a replay sweep over one profile directory.
#[derive(Debug, Clone)]
pub struct SweepRunner {
    config: ReplayConfig,
    harness: ReplayHarness,
}

impl SweepRunner {
    pub fn new(config: ReplayConfig) -> Result<Self> {
        validate_profile(&config.profile)?;
        let harness = ReplayHarness::new(config.trials)?;
        Ok(Self { config, harness })
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Sweeps the configured candidates, each backed by a [`HashTableDictionary`]
    /// with statistics enabled, writing the CSV report to `out`.
    pub fn run<W: Write>(&self, out: W) -> Result<SweepSummary> {
        self.run_with(out, |candidate, capacity| {
            HashTableDictionary::new(capacity, candidate.strategy, true)
        })
    }

    /// Sweeps using containers built by `make`, which is called once per
    /// (trace, candidate) with the table size for the trace's N.
    pub fn run_with<C, F, W>(&self, out: W, mut make: F) -> Result<SweepSummary>
    where
        C: KeyedContainer + TableMetrics,
        F: FnMut(&Candidate, NonZeroUsize) -> C,
        W: Write,
    {
        let discovery = TraceDiscovery::new(self.config.profile_dir(), &self.config.profile);
        let files = discovery.find()?;
        if files.is_empty() {
            return Err(BenchError::NoTraceFiles {
                dir: discovery.dir().to_path_buf(),
                prefix: discovery.prefix().to_string(),
            });
        }
        info!(
            dir = %discovery.dir().display(),
            traces = files.len(),
            trials = self.harness.trials(),
            "starting replay sweep"
        );

        let mut report = ReportWriter::new(out, C::csv_stats_header())?;
        let mut summary = SweepSummary {
            traces: files.len(),
            ..SweepSummary::default()
        };

        for path in &files {
            let trace = match load_trace(path) {
                Ok(trace) => trace,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping trace");
                    summary.skipped.push(SkippedTrace {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let capacity = table_size_for(trace.meta.n)?;
            let (inserts, erases) = trace.counts();
            let trace_name = file_name(path);
            debug!(
                trace = %trace_name,
                n = trace.meta.n,
                events = trace.operations.len(),
                table_size = capacity.get(),
                "loaded trace"
            );

            for candidate in &self.config.candidates {
                let mut container = make(candidate, capacity);
                let timing = self.harness.measure(&mut container, &trace.operations);
                let result = RunResult {
                    meta: trace.meta.clone(),
                    implementation: candidate.label.to_string(),
                    trace_path: trace_name.clone(),
                    inserts,
                    erases,
                    elapsed_ns: timing.median_ns,
                };
                report.write_row(&result, &container.csv_stats())?;
                summary.rows += 1;
                debug!(
                    trace = %trace_name,
                    candidate = candidate.label,
                    algorithm = container.algorithm_name(),
                    median_ns = timing.median_ns,
                    stats = ?TableMetrics::metrics(&container),
                    "measured"
                );
            }
        }

        report.finish()?;
        info!(
            rows = summary.rows,
            skipped = summary.skipped.len(),
            "replay sweep finished"
        );
        Ok(summary)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
