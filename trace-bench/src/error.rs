//! Error types for trace generation and replay.
//!
//! [`TraceError`] describes a single trace file that could not be parsed. A sweep
//! reports it and moves on to the next file. [`BenchError`] covers everything
//! that stops a whole generate or replay run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A trace file that violates the trace format.
///
/// Line numbers are 1-based; the header is line 1.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),

    #[error("trace is empty: missing `<profile> <N> <seed>` header")]
    MissingHeader,

    #[error("line 1: malformed header {content:?}: {reason}")]
    MalformedHeader {
        content: String,
        reason: &'static str,
    },

    #[error("line {line}: opcode {opcode:?} has no key")]
    MissingKey { line: usize, opcode: String },

    #[error("line {line}: unexpected token {token:?} after key")]
    UnexpectedToken { line: usize, token: String },

    #[error("line {line}: unknown opcode {opcode:?}")]
    UnknownOpcode { line: usize, opcode: String },
}

/// Fatal errors for a generate or replay run.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("trace directory '{}' not found", .0.display())]
    MissingTraceDir(PathBuf),

    #[error("invalid N = {0}: no table size configured")]
    UnsupportedN(u64),

    #[error("profile name must not be empty")]
    EmptyProfile,

    #[error("profile name {0:?} cannot contain whitespace or start with '#'")]
    InvalidProfile(String),

    #[error("trial count must be at least 1, got {0}")]
    InvalidTrials(usize),

    #[error("no trace files matching '{prefix}*.trace' in '{}'", dir.display())]
    NoTraceFiles { dir: PathBuf, prefix: String },

    #[error("failed to list trace directory: {0}")]
    DiscoveryIo(#[from] glob::GlobError),

    #[error("invalid trace search pattern: {0}")]
    DiscoveryPattern(#[from] glob::PatternError),

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("key pool has {available} keys but N = {n} needs {required}")]
    InsufficientKeys {
        n: usize,
        required: usize,
        available: usize,
    },

    #[error("word list '{}' line {line}: key {key:?} contains whitespace", path.display())]
    InvalidKey {
        path: PathBuf,
        line: usize,
        key: String,
    },

    #[error("failed to read word list '{}': {source}", path.display())]
    WordList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("internal error: access bag has {actual} keys, expected {expected}")]
    BagSize { expected: usize, actual: usize },
}

impl BenchError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BenchError::Io {
            path: path.into(),
            source,
        }
    }
}

/// A specialized `Result` type for generate and replay operations.
pub type Result<T, E = BenchError> = std::result::Result<T, E>;
