//! LRU trace synthesis
//!
//! A trace for working-set size N is produced in three steps:
//!
//! 1. [`AccessBagBuilder`] takes the first 4N keys of the pool and repeats them
//!    with fixed reuse frequencies: the first N keys once, the next N five times,
//!    and the last two blocks of N three times each. That is 12N accesses over
//!    4N distinct keys.
//! 2. The bag is shuffled with the seed's PRNG.
//! 3. [`LruTraceSimulator`] replays the shuffled accesses through an exact LRU
//!    cache of capacity N and emits `I key` for every access, preceded by
//!    `E victim` whenever the access had to evict.
//!
//! [`CorpusGenerator`] runs this for every configured seed and size and writes
//! one trace file per pair plus a `manifest.csv` summary.

use crate::error::{BenchError, Result};
use crate::models::ManifestRow;
use crate::trace::{OpCode, RunMetaData, TraceSink, TraceWriter};
use crate::workload::{load_key_pool, WorkloadConfig};
use lru_trace::{Access, LruTracker, TableMetrics};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// How many times each block of N keys appears in the access bag.
pub const REUSE_FREQUENCIES: [usize; 4] = [1, 5, 3, 3];

/// File name of the per-profile generation summary.
pub const MANIFEST_FILE: &str = "manifest.csv";

/// Builds the access multiset for a working-set size from an ordered key pool.
#[derive(Debug, Clone, Copy)]
pub struct AccessBagBuilder<'a> {
    pool: &'a [String],
}

impl<'a> AccessBagBuilder<'a> {
    pub fn new(pool: &'a [String]) -> Self {
        Self { pool }
    }

    /// Number of distinct keys a bag for `n` draws from the pool.
    pub fn keys_required(n: usize) -> usize {
        REUSE_FREQUENCIES.len() * n
    }

    /// Number of accesses in a bag for `n`.
    pub fn bag_len(n: usize) -> usize {
        REUSE_FREQUENCIES.iter().sum::<usize>() * n
    }

    /// Builds the unshuffled bag: block by block, each key repeated in place.
    pub fn build(&self, n: usize) -> Result<Vec<&'a str>> {
        let required = Self::keys_required(n);
        if self.pool.len() < required {
            return Err(BenchError::InsufficientKeys {
                n,
                required,
                available: self.pool.len(),
            });
        }

        let expected = Self::bag_len(n);
        let mut bag = Vec::with_capacity(expected);
        for (block, keys) in self.pool[..required].chunks(n.max(1)).enumerate() {
            let repeats = REUSE_FREQUENCIES[block];
            for key in keys {
                bag.extend(std::iter::repeat(key.as_str()).take(repeats));
            }
        }

        if bag.len() != expected {
            return Err(BenchError::BagSize {
                expected,
                actual: bag.len(),
            });
        }
        Ok(bag)
    }

    /// Builds the bag and shuffles it with `rng`.
    pub fn build_shuffled<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<&'a str>> {
        let mut bag = self.build(n)?;
        bag.shuffle(rng);
        Ok(bag)
    }
}

/// Event and access counts from one simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationSummary {
    pub accesses: u64,
    pub hits: u64,
    pub admissions: u64,
    pub evictions: u64,
    /// `I` events emitted; one per access
    pub inserts: u64,
    /// `E` events emitted; one per eviction
    pub erases: u64,
}

/// Exact LRU simulation that turns an access sequence into trace events.
#[derive(Debug)]
pub struct LruTraceSimulator<'a> {
    tracker: LruTracker<&'a str>,
    inserts: u64,
    erases: u64,
}

impl<'a> LruTraceSimulator<'a> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            tracker: LruTracker::new(capacity),
            inserts: 0,
            erases: 0,
        }
    }

    /// Processes `accesses` in order, emitting each resulting event into `sink`.
    ///
    /// Returns the totals since the simulator was created, so consecutive calls
    /// continue one simulation.
    pub fn run<S: TraceSink + ?Sized>(
        &mut self,
        accesses: &[&'a str],
        sink: &mut S,
    ) -> io::Result<SimulationSummary> {
        for &key in accesses {
            if let Access::Evicted(victim) = self.tracker.access(key) {
                sink.emit(OpCode::Erase, victim)?;
                self.erases += 1;
            }
            sink.emit(OpCode::Insert, key)?;
            self.inserts += 1;
        }
        Ok(self.summary())
    }

    /// Counts so far, with the access counters taken from the tracker.
    pub fn summary(&self) -> SimulationSummary {
        let metrics = self.tracker.metrics();
        SimulationSummary {
            accesses: metrics.accesses,
            hits: metrics.hits,
            admissions: metrics.admissions,
            evictions: metrics.evictions,
            inserts: self.inserts,
            erases: self.erases,
        }
    }

    /// The simulated cache state.
    pub fn tracker(&self) -> &LruTracker<&'a str> {
        &self.tracker
    }
}

/// Generates every trace of a workload.
#[derive(Debug, Clone)]
pub struct CorpusGenerator {
    config: WorkloadConfig,
}

impl CorpusGenerator {
    pub fn new(config: WorkloadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }

    /// Writes one trace per (seed, N) and the manifest.
    ///
    /// Seeds are processed in order, and within a seed every N is generated from
    /// the same PRNG in order, so a seed's traces are only reproducible as a set.
    pub fn generate(&self) -> Result<Vec<ManifestRow>> {
        self.config.validate()?;

        let profile_dir = self.config.profile_dir();
        fs::create_dir_all(&profile_dir).map_err(|e| BenchError::io(&profile_dir, e))?;

        let max_n = to_usize(self.config.max_size())?;
        let pool = load_key_pool(&self.config.keys, AccessBagBuilder::keys_required(max_n))?;
        let builder = AccessBagBuilder::new(&pool);
        info!(
            profile = %self.config.profile,
            keys = pool.len(),
            seeds = ?self.config.seeds,
            sizes = ?self.config.sizes,
            "Generating LRU traces"
        );

        let mut rows = Vec::new();
        for &seed in &self.config.seeds {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for &n in &self.config.sizes {
                rows.push(self.generate_trace(&builder, n, seed, &mut rng)?);
            }
        }

        let manifest = self.write_manifest(&rows)?;
        info!(
            traces = rows.len(),
            manifest = %manifest.display(),
            "Trace generation complete"
        );
        Ok(rows)
    }

    fn generate_trace<R: Rng + ?Sized>(
        &self,
        builder: &AccessBagBuilder<'_>,
        n: u64,
        seed: u64,
        rng: &mut R,
    ) -> Result<ManifestRow> {
        let capacity = NonZeroUsize::new(to_usize(n)?).ok_or(BenchError::UnsupportedN(n))?;
        let path = self.config.trace_path(n, seed);
        info!(path = %path.display(), "Generating LRU trace");
        let start = Instant::now();

        let bag = builder.build_shuffled(capacity.get(), rng)?;
        let meta = RunMetaData {
            profile: self.config.profile.clone(),
            n,
            seed,
        };

        let mut writer = TraceWriter::create(&path, &meta).map_err(|e| BenchError::io(&path, e))?;
        let mut simulator = LruTraceSimulator::new(capacity);
        let summary = simulator
            .run(&bag, &mut writer)
            .map_err(|e| BenchError::io(&path, e))?;
        writer.finish().map_err(|e| BenchError::io(&path, e))?;

        let tracker = simulator.tracker();
        debug!(
            n,
            seed,
            algorithm = tracker.algorithm_name(),
            hit_rate = tracker.metrics().hit_rate(),
            report = ?TableMetrics::metrics(tracker),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "trace written"
        );

        Ok(ManifestRow {
            profile: meta.profile,
            n,
            seed,
            path: path.display().to_string(),
            accesses: summary.accesses,
            inserts: summary.inserts,
            erases: summary.erases,
            hits: summary.hits,
        })
    }

    fn write_manifest(&self, rows: &[ManifestRow]) -> Result<PathBuf> {
        let path = self.config.profile_dir().join(MANIFEST_FILE);
        let mut writer = csv::Writer::from_path(&path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush().map_err(|e| BenchError::io(&path, e))?;
        Ok(path)
    }
}

fn to_usize(n: u64) -> Result<usize> {
    usize::try_from(n).map_err(|_| BenchError::UnsupportedN(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{load_trace, Operation};
    use crate::workload::KeySource;
    use std::collections::{HashMap, HashSet};
    use tempfile::TempDir;

    fn pool(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("w{i}")).collect()
    }

    fn simulate(bag: &[&str], n: usize) -> (Vec<Operation>, SimulationSummary) {
        let mut ops = Vec::new();
        let summary = LruTraceSimulator::new(NonZeroUsize::new(n).unwrap())
            .run(bag, &mut ops)
            .unwrap();
        (ops, summary)
    }

    #[test]
    fn test_bag_frequencies() {
        let keys = pool(40);
        let n = 8;
        let bag = AccessBagBuilder::new(&keys).build(n).unwrap();
        assert_eq!(bag.len(), 12 * n);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for &key in &bag {
            *counts.entry(key).or_default() += 1;
        }
        assert_eq!(counts.len(), 4 * n);
        for (i, key) in keys.iter().take(4 * n).enumerate() {
            let expected = REUSE_FREQUENCIES[i / n];
            assert_eq!(counts[key.as_str()], expected, "key {key}");
        }
        // keys beyond 4N are never used
        assert!(!counts.contains_key("w32"));
    }

    #[test]
    fn test_bag_is_block_ordered_before_shuffle() {
        let keys = pool(4);
        let bag = AccessBagBuilder::new(&keys).build(1).unwrap();
        assert_eq!(
            bag,
            vec!["w0", "w1", "w1", "w1", "w1", "w1", "w2", "w2", "w2", "w3", "w3", "w3"]
        );
    }

    #[test]
    fn test_insufficient_pool() {
        let keys = pool(15);
        let err = AccessBagBuilder::new(&keys).build(4).unwrap_err();
        assert!(matches!(
            err,
            BenchError::InsufficientKeys {
                n: 4,
                required: 16,
                available: 15
            }
        ));
    }

    #[test]
    fn test_shuffle_is_seed_deterministic() {
        let keys = pool(400);
        let builder = AccessBagBuilder::new(&keys);
        let a = builder
            .build_shuffled(100, &mut ChaCha8Rng::seed_from_u64(23))
            .unwrap();
        let b = builder
            .build_shuffled(100, &mut ChaCha8Rng::seed_from_u64(23))
            .unwrap();
        let c = builder
            .build_shuffled(100, &mut ChaCha8Rng::seed_from_u64(24))
            .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut sorted_a = a.clone();
        let mut unshuffled = builder.build(100).unwrap();
        sorted_a.sort_unstable();
        unshuffled.sort_unstable();
        assert_eq!(sorted_a, unshuffled);
    }

    #[test]
    fn test_simulator_small_example() {
        let (ops, summary) = simulate(&["a", "b", "a", "c", "b", "b"], 2);
        assert_eq!(
            ops,
            vec![
                Operation::insert("a"),
                Operation::insert("b"),
                Operation::insert("a"),
                Operation::erase("b"),
                Operation::insert("c"),
                Operation::erase("a"),
                Operation::insert("b"),
                Operation::insert("b"),
            ]
        );
        assert_eq!(
            summary,
            SimulationSummary {
                accesses: 6,
                hits: 2,
                admissions: 4,
                evictions: 2,
                inserts: 6,
                erases: 2,
            }
        );
    }

    #[test]
    fn test_simulator_trace_invariants() {
        let n = 64;
        let keys = pool(4 * n);
        let bag = AccessBagBuilder::new(&keys)
            .build_shuffled(n, &mut ChaCha8Rng::seed_from_u64(5))
            .unwrap();
        let (ops, summary) = simulate(&bag, n);

        assert_eq!(summary.inserts, (12 * n) as u64);
        assert_eq!(summary.hits + summary.admissions, summary.accesses);
        // the cache fills exactly once, every later admission evicts
        assert_eq!(summary.evictions, summary.admissions - n as u64);

        // replaying the events reproduces a resident set that never exceeds N
        let mut resident: HashSet<&str> = HashSet::new();
        for (i, op) in ops.iter().enumerate() {
            match op.tag {
                OpCode::Erase => {
                    assert!(resident.remove(op.key.as_str()), "erase of non-resident");
                    let next = &ops[i + 1];
                    assert_eq!(next.tag, OpCode::Insert, "erase not followed by insert");
                    assert!(!resident.contains(next.key.as_str()));
                }
                OpCode::Insert => {
                    resident.insert(op.key.as_str());
                }
            }
            assert!(resident.len() <= n);
        }
        assert_eq!(resident.len(), n);
    }

    #[test]
    fn test_resident_set_matches_recent_distinct_keys() {
        let n = 16;
        let keys = pool(4 * n);
        let bag = AccessBagBuilder::new(&keys)
            .build_shuffled(n, &mut ChaCha8Rng::seed_from_u64(9))
            .unwrap();
        let mut sim = LruTraceSimulator::new(NonZeroUsize::new(n).unwrap());
        let mut sink: Vec<Operation> = Vec::new();
        sim.run(&bag, &mut sink).unwrap();

        let mut expected = Vec::new();
        for key in bag.iter().rev() {
            if !expected.contains(key) {
                expected.push(*key);
            }
            if expected.len() == n {
                break;
            }
        }
        let actual: Vec<&str> = sim.tracker().iter().copied().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_corpus_reuses_rng_across_sizes() {
        let tmp = TempDir::new().unwrap();
        let config = WorkloadConfig {
            profile: "unit".to_string(),
            seeds: vec![23],
            sizes: vec![4, 8],
            trace_dir: tmp.path().to_path_buf(),
            keys: KeySource::Synthetic,
        };
        let rows = CorpusGenerator::new(config.clone()).generate().unwrap();
        assert_eq!(rows.len(), 2);

        // same PRNG stream, consumed in order
        let keys = load_key_pool(&KeySource::Synthetic, 32).unwrap();
        let builder = AccessBagBuilder::new(&keys);
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        for n in [4usize, 8] {
            let bag = builder.build_shuffled(n, &mut rng).unwrap();
            let (expected, _) = simulate(&bag, n);
            let parsed = load_trace(&config.trace_path(n as u64, 23)).unwrap();
            assert_eq!(parsed.meta.n, n as u64);
            assert_eq!(parsed.meta.seed, 23);
            assert_eq!(parsed.operations, expected);
        }

        let manifest = fs::read_to_string(config.profile_dir().join(MANIFEST_FILE)).unwrap();
        let mut lines = manifest.lines();
        assert_eq!(
            lines.next(),
            Some("profile,N,seed,path,accesses,inserts,erases,hits")
        );
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn test_corpus_short_word_list_fails() {
        let tmp = TempDir::new().unwrap();
        let words = tmp.path().join("words.txt");
        fs::write(&words, "a\nb\nc\n").unwrap();
        let config = WorkloadConfig {
            sizes: vec![1, 2],
            trace_dir: tmp.path().join("out"),
            keys: KeySource::WordList(words),
            ..WorkloadConfig::default()
        };
        let err = CorpusGenerator::new(config).generate().unwrap_err();
        assert!(matches!(
            err,
            BenchError::InsufficientKeys { n: 1, required: 4, available: 3 }
        ));
    }

    #[test]
    fn test_word_list_with_spaced_key_writes_no_traces() {
        let tmp = TempDir::new().unwrap();
        let words = tmp.path().join("words.txt");
        fs::write(&words, "oslo\nlima\nsan jose\nrome\n").unwrap();
        let config = WorkloadConfig {
            sizes: vec![1],
            trace_dir: tmp.path().join("out"),
            keys: KeySource::WordList(words),
            ..WorkloadConfig::default()
        };
        let err = CorpusGenerator::new(config.clone()).generate().unwrap_err();
        assert!(matches!(err, BenchError::InvalidKey { line: 3, .. }));
        assert!(!config.trace_path(1, 23).exists());
    }

    #[test]
    fn test_spaced_profile_rejected_before_output() {
        let tmp = TempDir::new().unwrap();
        let config = WorkloadConfig {
            profile: "lru profile".to_string(),
            sizes: vec![1],
            trace_dir: tmp.path().join("out"),
            ..WorkloadConfig::default()
        };
        let err = CorpusGenerator::new(config).generate().unwrap_err();
        assert!(matches!(err, BenchError::InvalidProfile(_)));
        assert!(!tmp.path().join("out").exists());
    }

    #[test]
    fn test_summary_accumulates_across_runs() {
        let mut sim = LruTraceSimulator::new(NonZeroUsize::new(2).unwrap());
        let mut sink: Vec<Operation> = Vec::new();
        let first = sim.run(&["a", "b", "a"], &mut sink).unwrap();
        assert_eq!(first.accesses, 3);
        assert_eq!(first.hits, 1);

        let second = sim.run(&["c", "b"], &mut sink).unwrap();
        assert_eq!(second, sim.summary());
        assert_eq!(second.accesses, 5);
        assert_eq!(second.admissions, 4);
        assert_eq!(second.evictions, 2);
        assert_eq!(second.inserts, 5);
        assert_eq!(second.erases, 2);
        assert_eq!(sink.len(), 7);
        assert_eq!(sim.tracker().metrics().hit_rate(), 0.2);
    }
}
