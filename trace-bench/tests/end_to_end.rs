// Generate a small corpus, then replay it and check the report

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use trace_bench::error::BenchError;
use trace_bench::generator::{CorpusGenerator, MANIFEST_FILE};
use trace_bench::models::{Candidate, ReplayConfig};
use trace_bench::runner::SweepRunner;
use trace_bench::trace::load_trace;
use trace_bench::workload::{KeySource, WorkloadConfig};

fn workload(root: &Path, seeds: Vec<u64>) -> WorkloadConfig {
    WorkloadConfig {
        profile: "lru_profile".to_string(),
        seeds,
        sizes: vec![1024],
        trace_dir: root.to_path_buf(),
        keys: KeySource::Synthetic,
    }
}

fn replay_config(root: &Path) -> ReplayConfig {
    ReplayConfig {
        trace_dir: root.to_path_buf(),
        profile: "lru_profile".to_string(),
        trials: 2,
        candidates: Candidate::all(),
    }
}

fn run_report(root: &Path) -> (Vec<HashMap<String, String>>, String) {
    let runner = SweepRunner::new(replay_config(root)).unwrap();
    let mut out = Vec::new();
    runner.run(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let mut lines = text.lines();
    let header: Vec<&str> = lines.next().unwrap().split(',').collect();
    let rows = lines
        .map(|line| {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), header.len(), "row width: {line}");
            header
                .iter()
                .zip(fields)
                .map(|(h, f)| (h.to_string(), f.to_string()))
                .collect()
        })
        .collect();
    (rows, text)
}

#[test]
fn test_generate_then_replay() {
    let root = TempDir::new().unwrap();
    let manifest = CorpusGenerator::new(workload(root.path(), vec![23, 24]))
        .generate()
        .unwrap();
    assert_eq!(manifest.len(), 2);
    assert!(root.path().join("lru_profile").join(MANIFEST_FILE).is_file());

    let trace_path = root.path().join("lru_profile/lru_profile_N_1024_S_23.trace");
    let trace = load_trace(&trace_path).unwrap();
    assert_eq!(trace.meta.n, 1024);
    assert_eq!(trace.meta.seed, 23);
    let (inserts, erases) = trace.counts();
    // every access emits an insert
    assert_eq!(inserts, 12 * 1024);
    assert_eq!(inserts, manifest[0].inserts);
    assert_eq!(erases, manifest[0].erases);

    let (rows, text) = run_report(root.path());
    assert!(text.starts_with(
        "profile,N,seed,impl,trace_path,inserts,erases,elapsed_ns,table_size,strategy,"
    ));
    // two traces, two candidates each
    assert_eq!(rows.len(), 4);

    let row = &rows[0];
    assert_eq!(row["profile"], "lru_profile");
    assert_eq!(row["N"], "1024");
    assert_eq!(row["seed"], "23");
    assert_eq!(row["impl"], "hash_map_double");
    assert_eq!(row["trace_path"], "lru_profile_N_1024_S_23.trace");
    assert_eq!(row["inserts"], inserts.to_string());
    assert_eq!(row["erases"], erases.to_string());
    assert_eq!(row["table_size"], "1279");
    assert_eq!(row["strategy"], "double");
    assert_eq!(rows[1]["impl"], "hash_map_single");
    assert_eq!(rows[1]["strategy"], "single");
    assert_eq!(rows[2]["seed"], "24");

    for (row, generated) in rows.iter().zip([&manifest[0], &manifest[0], &manifest[1], &manifest[1]]) {
        // the trace ends with the cache full and never erases a non-resident key
        assert_eq!(row["active"], "1024");
        assert_eq!(row["rejected_inserts"], "0");
        assert_eq!(row["missing_removes"], "0");
        assert_eq!(row["removes_ok"], generated.erases.to_string());
        assert_eq!(row["duplicate_inserts"], generated.hits.to_string());
        assert_eq!(
            row["inserts_ok"],
            (generated.inserts - generated.hits).to_string()
        );
        assert!(row["elapsed_ns"].parse::<u64>().is_ok());
    }
}

#[test]
fn test_generation_is_reproducible() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    CorpusGenerator::new(workload(first.path(), vec![7]))
        .generate()
        .unwrap();
    CorpusGenerator::new(workload(second.path(), vec![7]))
        .generate()
        .unwrap();

    let name = "lru_profile/lru_profile_N_1024_S_7.trace";
    let a = fs::read(first.path().join(name)).unwrap();
    let b = fs::read(second.path().join(name)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_replay_skips_malformed_trace() {
    let root = TempDir::new().unwrap();
    CorpusGenerator::new(workload(root.path(), vec![23]))
        .generate()
        .unwrap();
    fs::write(
        root.path().join("lru_profile/lru_profile_broken.trace"),
        "lru_profile 1024\nI a\n",
    )
    .unwrap();

    let runner = SweepRunner::new(replay_config(root.path())).unwrap();
    let summary = runner.run(Vec::new()).unwrap();
    assert_eq!(summary.traces, 2);
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.skipped.len(), 1);
    assert!(summary.skipped[0]
        .path
        .ends_with("lru_profile_broken.trace"));
}

#[test]
fn test_replay_unsupported_n_is_fatal() {
    let root = TempDir::new().unwrap();
    let dir = root.path().join("lru_profile");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("lru_profile_N_1000_S_1.trace"), "lru_profile 1000 1\nI a\n").unwrap();

    let runner = SweepRunner::new(replay_config(root.path())).unwrap();
    assert!(matches!(
        runner.run(Vec::new()),
        Err(BenchError::UnsupportedN(1000))
    ));
}

#[test]
fn test_replay_empty_profile_dir() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("lru_profile")).unwrap();

    let runner = SweepRunner::new(replay_config(root.path())).unwrap();
    assert!(matches!(
        runner.run(Vec::new()),
        Err(BenchError::NoTraceFiles { .. })
    ));
}
