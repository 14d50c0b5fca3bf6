//! End-to-end tests of the stockbench binary.
//!
//! Validates:
//! - A full run emits a JSON document and writes its report file
//! - Config files and CLI overrides resolve together
//! - Invalid mixes exit with the config error code
//! - The utility subcommands (catalog, version, completions)

mod common;

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Result of running a stockbench command.
#[derive(Debug)]
struct BenchResult {
    stdout: String,
    stderr: String,
    success: bool,
    code: Option<i32>,
}

/// Run stockbench in a specific directory.
fn run_in_dir<I, S>(root: &Path, args: I) -> BenchResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("stockbench"));
    cmd.current_dir(root);
    cmd.args(args);
    cmd.env("NO_COLOR", "1");
    cmd.env("RUST_BACKTRACE", "1");

    let output = cmd.output().expect("run stockbench");
    BenchResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        success: output.status.success(),
        code: output.status.code(),
    }
}

#[test]
fn e2e_run_emits_json_and_writes_the_default_report() {
    let _log = common::test_log("e2e_run_emits_json_and_writes_the_default_report");
    let temp = TempDir::new().expect("create temp dir");

    let result = run_in_dir(
        temp.path(),
        [
            "run", "--workers", "2", "--runs", "20", "--warmup", "0", "--seed", "3", "--json",
        ],
    );
    assert!(result.success, "run failed: {}", result.stderr);

    let doc: Value = serde_json::from_str(&result.stdout).expect("stdout is one JSON document");
    assert_eq!(doc["workers"], 2);
    assert_eq!(doc["measured_runs"], 20);
    let rows = doc["results"].as_array().expect("results array");
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row["total_runs"], 20);
    }

    let report = temp.path().join("memory_2_workers.txt");
    let contents = fs::read_to_string(&report).expect("default report file");
    assert!(contents.contains("Workload run: memory store, 2 workers"));
    assert!(contents.contains("Runs per worker: 0 warm-up + 20 measured"));
}

#[test]
fn e2e_run_honors_a_custom_report_path() {
    let _log = common::test_log("e2e_run_honors_a_custom_report_path");
    let temp = TempDir::new().expect("create temp dir");

    let result = run_in_dir(
        temp.path(),
        [
            "run",
            "-w",
            "2",
            "-r",
            "10",
            "--warmup",
            "0",
            "--report",
            "custom_report.txt",
        ],
    );
    assert!(result.success, "run failed: {}", result.stderr);
    assert!(result.stdout.contains("Workload run: memory store, 2 workers"));
    assert!(result.stderr.contains("Report written to custom_report.txt"));
    assert!(temp.path().join("custom_report.txt").exists());
}

#[test]
fn e2e_quiet_run_still_writes_the_report() {
    let _log = common::test_log("e2e_quiet_run_still_writes_the_report");
    let temp = TempDir::new().expect("create temp dir");

    let result = run_in_dir(
        temp.path(),
        ["run", "-w", "2", "-r", "10", "--warmup", "0", "--quiet"],
    );
    assert!(result.success, "run failed: {}", result.stderr);
    assert!(
        result.stdout.is_empty(),
        "quiet run printed: {}",
        result.stdout
    );
    assert!(temp.path().join("memory_2_workers.txt").exists());
}

#[test]
fn e2e_config_file_and_flags_resolve_together() {
    let _log = common::test_log("e2e_config_file_and_flags_resolve_together");
    let temp = TempDir::new().expect("create temp dir");
    fs::write(
        temp.path().join("bench.yaml"),
        "workers: 3\nfrequent_percent: 20.0\n",
    )
    .expect("write config");

    let result = run_in_dir(
        temp.path(),
        ["run", "-c", "bench.yaml", "--runs", "5", "--warmup", "0", "--json"],
    );
    assert!(result.success, "run failed: {}", result.stderr);

    let doc: Value = serde_json::from_str(&result.stdout).expect("stdout is one JSON document");
    // workers comes from the file, the measured-run count from the flag.
    assert_eq!(doc["workers"], 3);
    assert_eq!(doc["measured_runs"], 5);
    assert_eq!(doc["mix"]["frequent_percent"], 20.0);
    assert_eq!(doc["results"].as_array().map(Vec::len), Some(3));
    assert!(temp.path().join("memory_3_workers.txt").exists());
}

#[test]
fn e2e_invalid_mix_exits_with_the_config_code() {
    let _log = common::test_log("e2e_invalid_mix_exits_with_the_config_code");
    let temp = TempDir::new().expect("create temp dir");

    let result = run_in_dir(temp.path(), ["run", "--rare", "80", "--frequent", "30"]);
    assert!(!result.success);
    assert_eq!(result.code, Some(6));
    // stdout is piped, so the error handler picks the structured rendering.
    assert!(
        result.stderr.contains("CONFIG_ERROR"),
        "stderr: {}",
        result.stderr
    );
    assert!(result.stderr.contains("must not exceed 100"));
}

#[test]
fn e2e_catalog_prints_the_seed_set() {
    let _log = common::test_log("e2e_catalog_prints_the_seed_set");
    let temp = TempDir::new().expect("create temp dir");

    let json_run = run_in_dir(temp.path(), ["catalog", "--json"]);
    assert!(json_run.success, "catalog failed: {}", json_run.stderr);
    let records: Value = serde_json::from_str(&json_run.stdout).expect("catalog JSON");
    assert_eq!(records.as_array().map(Vec::len), Some(12));

    let text_run = run_in_dir(temp.path(), ["catalog"]);
    assert!(text_run.success);
    assert!(text_run.stdout.contains("12 records, 5 editor picks"));
    assert!(text_run.stdout.contains("[pick]"));
}

#[test]
fn e2e_version_reports_the_package_version() {
    let _log = common::test_log("e2e_version_reports_the_package_version");

    Command::new(assert_cmd::cargo::cargo_bin!("stockbench"))
        .arg("version")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("stockbench version")
                .and(predicate::str::contains(env!("CARGO_PKG_VERSION"))),
        );

    let temp = TempDir::new().expect("create temp dir");
    let json_run = run_in_dir(temp.path(), ["version", "--json"]);
    let doc: Value = serde_json::from_str(&json_run.stdout).expect("version JSON");
    assert_eq!(doc["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn e2e_completions_cover_the_subcommands() {
    let _log = common::test_log("e2e_completions_cover_the_subcommands");
    let temp = TempDir::new().expect("create temp dir");

    let result = run_in_dir(temp.path(), ["completions", "bash"]);
    assert!(result.success, "completions failed: {}", result.stderr);
    assert!(result.stdout.contains("stockbench"));

    let to_file = run_in_dir(
        temp.path(),
        ["completions", "zsh", "--output", "stockbench.zsh"],
    );
    assert!(to_file.success);
    let script = fs::read_to_string(temp.path().join("stockbench.zsh")).expect("completion file");
    assert!(!script.is_empty());
}
