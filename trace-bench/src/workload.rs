//! Workload parameters and key pools.

use crate::error::{BenchError, Result};
use crate::trace::{is_profile_name, is_trace_token};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Profile name used when none is given.
pub const DEFAULT_PROFILE: &str = "lru_profile";
/// Root directory that per-profile trace directories live under.
pub const DEFAULT_TRACE_DIR: &str = "traceFiles";
/// Word list the key pool is read from by default.
pub const DEFAULT_WORD_LIST: &str = "20980712_uniq_words.txt";
/// Seeds generated when none are given.
pub const DEFAULT_SEEDS: [u64; 1] = [23];
/// Smallest and largest default working-set sizes, as powers of two.
pub const DEFAULT_MIN_EXP: u32 = 10;
pub const DEFAULT_MAX_EXP: u32 = 20;

/// Where keys for the access bag come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// The first non-empty lines of a word list, one key per line.
    WordList(PathBuf),
    /// Generated keys `key0000000`, `key0000001`, ...
    Synthetic,
}

/// Parameters for one generated corpus.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    pub profile: String,
    /// Seeds in generation order. One PRNG is created per seed.
    pub seeds: Vec<u64>,
    /// Working-set sizes in generation order.
    pub sizes: Vec<u64>,
    pub trace_dir: PathBuf,
    pub keys: KeySource,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            seeds: DEFAULT_SEEDS.to_vec(),
            sizes: sizes_from_exponents(DEFAULT_MIN_EXP, DEFAULT_MAX_EXP),
            trace_dir: PathBuf::from(DEFAULT_TRACE_DIR),
            keys: KeySource::WordList(PathBuf::from(DEFAULT_WORD_LIST)),
        }
    }
}

impl WorkloadConfig {
    pub fn validate(&self) -> Result<()> {
        validate_profile(&self.profile)
    }

    /// `<trace_dir>/<profile>`
    pub fn profile_dir(&self) -> PathBuf {
        self.trace_dir.join(&self.profile)
    }

    /// `<trace_dir>/<profile>/<profile>_N_<n>_S_<seed>.trace`
    pub fn trace_path(&self, n: u64, seed: u64) -> PathBuf {
        self.profile_dir()
            .join(format!("{}_N_{}_S_{}.trace", self.profile, n, seed))
    }

    /// Largest working-set size, which fixes how many keys the pool needs.
    pub fn max_size(&self) -> u64 {
        self.sizes.iter().copied().max().unwrap_or(0)
    }
}

/// Checks that `profile` can name a trace header, a directory and a file prefix.
pub fn validate_profile(profile: &str) -> Result<()> {
    if profile.is_empty() {
        return Err(BenchError::EmptyProfile);
    }
    if !is_profile_name(profile) {
        return Err(BenchError::InvalidProfile(profile.to_string()));
    }
    Ok(())
}

/// Powers of two `2^min_exp ..= 2^max_exp`.
pub fn sizes_from_exponents(min_exp: u32, max_exp: u32) -> Vec<u64> {
    (min_exp..=max_exp).map(|e| 1u64 << e).collect()
}

/// Loads `count` distinct keys from `source`, preserving their order.
pub fn load_key_pool(source: &KeySource, count: usize) -> Result<Vec<String>> {
    match source {
        KeySource::Synthetic => Ok((0..count).map(|i| format!("key{i:07}")).collect()),
        KeySource::WordList(path) => read_word_list(path, count),
    }
}

fn read_word_list(path: &Path, count: usize) -> Result<Vec<String>> {
    let word_list_err = |source| BenchError::WordList {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(word_list_err)?;
    let reader = BufReader::new(file);

    let mut words = Vec::with_capacity(count);
    for (idx, line) in reader.lines().enumerate() {
        if words.len() == count {
            break;
        }
        let line = line.map_err(word_list_err)?;
        let word = line.trim_end_matches('\r');
        if word.is_empty() {
            continue;
        }
        if !is_trace_token(word) {
            return Err(BenchError::InvalidKey {
                path: path.to_path_buf(),
                line: idx + 1,
                key: word.to_string(),
            });
        }
        words.push(word.to_string());
    }
    Ok(words)
}
