//! Trace file discovery.

use crate::error::{BenchError, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name suffix every trace carries.
pub const TRACE_SUFFIX: &str = ".trace";

/// Finds the trace files of one profile inside a directory.
#[derive(Debug, Clone)]
pub struct TraceDiscovery {
    dir: PathBuf,
    prefix: String,
}

impl TraceDiscovery {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns every regular file in the directory whose name starts with the
    /// prefix and ends with `.trace`, sorted by path.
    ///
    /// An empty result is not an error here; a missing directory is.
    pub fn find(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Err(BenchError::MissingTraceDir(self.dir.clone()));
        }

        let dir = Pattern::escape(&self.dir.to_string_lossy());
        let name = format!("{}*{}", Pattern::escape(&self.prefix), TRACE_SUFFIX);
        let pattern = Path::new(&dir).join(name);
        debug!(pattern = %pattern.display(), "searching for trace files");

        let mut files = Vec::new();
        for entry in glob::glob(&pattern.to_string_lossy())? {
            let path = entry?;
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "p 1 2\n").unwrap();
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_filters_by_prefix_and_suffix() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "lru_profile_N_2048_S_23.trace");
        touch(tmp.path(), "lru_profile_N_1024_S_23.trace");
        touch(tmp.path(), "other_N_1024_S_23.trace");
        touch(tmp.path(), "lru_profile_N_1024_S_23.trace.bak");
        touch(tmp.path(), "lru_profile_notes.txt");
        fs::create_dir(tmp.path().join("lru_profile_dir.trace")).unwrap();

        let files = TraceDiscovery::new(tmp.path(), "lru_profile").find().unwrap();
        assert_eq!(
            names(&files),
            vec![
                "lru_profile_N_1024_S_23.trace",
                "lru_profile_N_2048_S_23.trace"
            ]
        );
    }

    #[test]
    fn test_empty_directory_is_empty_list() {
        let tmp = TempDir::new().unwrap();
        let files = TraceDiscovery::new(tmp.path(), "lru_profile").find().unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert!(matches!(
            TraceDiscovery::new(&missing, "p").find(),
            Err(BenchError::MissingTraceDir(dir)) if dir == missing
        ));
    }

    #[test]
    fn test_file_path_is_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "plain");
        assert!(matches!(
            TraceDiscovery::new(tmp.path().join("plain"), "p").find(),
            Err(BenchError::MissingTraceDir(_))
        ));
    }

    #[test]
    fn test_glob_metacharacters_are_literal() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("run[1]");
        fs::create_dir(&dir).unwrap();
        touch(&dir, "p*_a.trace");
        touch(&dir, "pz_b.trace");

        let files = TraceDiscovery::new(&dir, "p*").find().unwrap();
        assert_eq!(names(&files), vec!["p*_a.trace"]);
    }
}
