//! Trace file format
//!
//! A trace is a text file with a mandatory header followed by one event per line:
//!
//! ```text
//! lru_profile 1024 23
//! I apple
//! I banana
//! E apple
//! I cherry
//! ```
//!
//! The header carries the profile name, the working-set size N and the seed the
//! trace was generated with. Event lines are `I <key>` for an insert and
//! `E <key>` for an erase. After the header, blank lines and lines whose first
//! non-whitespace character is `#` are ignored. Anything else that does not fit
//! the format rejects the whole file.

use crate::error::TraceError;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Kind of trace event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    Insert,
    Erase,
}

impl OpCode {
    /// The single-letter token used in trace files.
    pub fn token(self) -> &'static str {
        match self {
            OpCode::Insert => "I",
            OpCode::Erase => "E",
        }
    }

    /// Parses a trace token. Only `I` and `E` are recognised.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "I" => Some(OpCode::Insert),
            "E" => Some(OpCode::Erase),
            _ => None,
        }
    }
}

/// One trace event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub tag: OpCode,
    pub key: String,
}

impl Operation {
    pub fn new(tag: OpCode, key: impl Into<String>) -> Self {
        Self {
            tag,
            key: key.into(),
        }
    }

    pub fn insert(key: impl Into<String>) -> Self {
        Self::new(OpCode::Insert, key)
    }

    pub fn erase(key: impl Into<String>) -> Self {
        Self::new(OpCode::Erase, key)
    }
}

/// Provenance of a trace, as written in its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetaData {
    pub profile: String,
    /// Working-set size the trace was generated for
    pub n: u64,
    pub seed: u64,
}

impl fmt::Display for RunMetaData {
    /// Formats as the header line, without the newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.profile, self.n, self.seed)
    }
}

/// A fully parsed trace file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTrace {
    pub meta: RunMetaData,
    pub operations: Vec<Operation>,
}

impl ParsedTrace {
    /// Number of insert and erase events, in that order.
    pub fn counts(&self) -> (u64, u64) {
        self.operations
            .iter()
            .fold((0, 0), |(inserts, erases), op| match op.tag {
                OpCode::Insert => (inserts + 1, erases),
                OpCode::Erase => (inserts, erases + 1),
            })
    }
}

/// Returns true if `token` is read back as exactly one field of a trace line.
pub fn is_trace_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

/// Returns true if `profile` can be written as the first header field.
pub fn is_profile_name(profile: &str) -> bool {
    is_trace_token(profile) && !profile.starts_with('#')
}

fn unwritable(what: &str, value: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{what} {value:?} cannot be written to a trace"),
    )
}

/// Destination for trace events produced by a simulation.
pub trait TraceSink {
    fn emit(&mut self, tag: OpCode, key: &str) -> io::Result<()>;
}

impl TraceSink for Vec<Operation> {
    fn emit(&mut self, tag: OpCode, key: &str) -> io::Result<()> {
        self.push(Operation::new(tag, key));
        Ok(())
    }
}

/// Streams a trace to any writer. The header is written on construction.
pub struct TraceWriter<W: Write> {
    out: W,
    events: u64,
}

impl TraceWriter<BufWriter<File>> {
    /// Creates (or truncates) the file at `path` and writes the header.
    pub fn create(path: &Path, meta: &RunMetaData) -> io::Result<Self> {
        let file = File::create(path)?;
        // 1MB buffer; traces run to tens of megabytes
        Self::new(BufWriter::with_capacity(1024 * 1024, file), meta)
    }
}

impl<W: Write> TraceWriter<W> {
    /// Writes the header. Fails with `InvalidInput` if the profile would not parse
    /// back as a header field.
    pub fn new(mut out: W, meta: &RunMetaData) -> io::Result<Self> {
        if !is_profile_name(&meta.profile) {
            return Err(unwritable("profile", &meta.profile));
        }
        writeln!(out, "{meta}")?;
        Ok(Self { out, events: 0 })
    }

    /// Number of events written so far.
    pub fn events(&self) -> u64 {
        self.events
    }

    /// Flushes buffered output and returns the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> TraceSink for TraceWriter<W> {
    fn emit(&mut self, tag: OpCode, key: &str) -> io::Result<()> {
        if !is_trace_token(key) {
            return Err(unwritable("key", key));
        }
        self.events += 1;
        writeln!(self.out, "{} {}", tag.token(), key)
    }
}

impl<W: Write> fmt::Debug for TraceWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceWriter")
            .field("events", &self.events)
            .finish()
    }
}

fn parse_header(line: &str) -> Result<RunMetaData, TraceError> {
    let malformed = |reason| TraceError::MalformedHeader {
        content: line.to_string(),
        reason,
    };

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [profile, n, seed] = tokens[..] else {
        return Err(malformed("expected exactly `<profile> <N> <seed>`"));
    };
    if profile.starts_with('#') {
        return Err(malformed("the header cannot be a comment"));
    }
    let n = n
        .parse::<u64>()
        .map_err(|_| malformed("N is not an unsigned integer"))?;
    let seed = seed
        .parse::<u64>()
        .map_err(|_| malformed("seed is not an unsigned integer"))?;

    Ok(RunMetaData {
        profile: profile.to_string(),
        n,
        seed,
    })
}

/// Parses one event line. Returns `Ok(None)` for blank and comment lines.
fn parse_line(line: &str, line_num: usize) -> Result<Option<Operation>, TraceError> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut tokens = line.split_whitespace();
    let Some(opcode) = tokens.next() else {
        return Ok(None);
    };
    let Some(key) = tokens.next() else {
        return Err(TraceError::MissingKey {
            line: line_num,
            opcode: opcode.to_string(),
        });
    };
    if let Some(extra) = tokens.next() {
        return Err(TraceError::UnexpectedToken {
            line: line_num,
            token: extra.to_string(),
        });
    }
    let tag = OpCode::from_token(opcode).ok_or_else(|| TraceError::UnknownOpcode {
        line: line_num,
        opcode: opcode.to_string(),
    })?;

    Ok(Some(Operation::new(tag, key)))
}

/// Parses a whole trace. Any format violation fails the entire trace.
pub fn parse_trace<R: BufRead>(reader: R) -> Result<ParsedTrace, TraceError> {
    let mut lines = reader.lines();
    let header = lines.next().ok_or(TraceError::MissingHeader)??;
    let meta = parse_header(&header)?;

    let mut operations = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line?;
        // header is line 1
        if let Some(op) = parse_line(&line, idx + 2)? {
            operations.push(op);
        }
    }

    Ok(ParsedTrace { meta, operations })
}

/// Opens and parses the trace at `path`.
pub fn load_trace(path: &Path) -> Result<ParsedTrace, TraceError> {
    let file = File::open(path)?;
    parse_trace(BufReader::with_capacity(1024 * 1024, file))
}
