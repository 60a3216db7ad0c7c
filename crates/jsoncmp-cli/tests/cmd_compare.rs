//! Integration tests for `jsoncmp compare`.
#![allow(clippy::expect_used)]

use std::io::Write as _;
use std::path::PathBuf;
use std::process::Command;

/// Path to the compiled `jsoncmp` binary.
fn jsoncmp_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("jsoncmp");
    path
}

/// Path to a shared fixture file.
fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../../tests/fixtures");
    path.push(name);
    path
}

// ---------------------------------------------------------------------------
// compare: identical files (exit 0)
// ---------------------------------------------------------------------------

/// Comparing a file against itself must exit 0 with similarity 1.
#[test]
fn compare_identical_files_exits_0() {
    let out = Command::new(jsoncmp_bin())
        .args([
            "compare",
            fixture("grade-base.json").to_str().expect("path"),
            fixture("grade-base.json").to_str().expect("path"),
        ])
        .output()
        .expect("run jsoncmp compare");
    assert_eq!(
        out.status.code(),
        Some(0),
        "expected exit 0 for identical files; stdout: {}; stderr: {}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("similarity: 1.0000"), "stdout: {stdout}");
}

// ---------------------------------------------------------------------------
// compare: tolerated differences (exit 0 with rules)
// ---------------------------------------------------------------------------

/// Float rounding, list reordering, and ignored keys together make the
/// reordered document an exact match.
#[test]
fn compare_reordered_with_rules_exits_0() {
    let out = Command::new(jsoncmp_bin())
        .args([
            "compare",
            fixture("grade-base.json").to_str().expect("path"),
            fixture("grade-match.json").to_str().expect("path"),
            "--rules",
            fixture("rules-sample.json").to_str().expect("path"),
        ])
        .output()
        .expect("run jsoncmp compare");
    assert_eq!(
        out.status.code(),
        Some(0),
        "stdout: {}; stderr: {}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
}

/// Without the ignore rules the volatile key differs and the exit code is 1.
#[test]
fn compare_reordered_without_rules_exits_1() {
    let out = Command::new(jsoncmp_bin())
        .args([
            "compare",
            fixture("grade-base.json").to_str().expect("path"),
            fixture("grade-match.json").to_str().expect("path"),
        ])
        .output()
        .expect("run jsoncmp compare");
    assert_eq!(out.status.code(), Some(1));
}

// ---------------------------------------------------------------------------
// compare: differences found (exit 1)
// ---------------------------------------------------------------------------

/// A genuinely different document exits 1 and reports a similarity below 1.
#[test]
fn compare_mismatch_exits_1() {
    let out = Command::new(jsoncmp_bin())
        .args([
            "compare",
            fixture("grade-base.json").to_str().expect("path"),
            fixture("grade-mismatch.json").to_str().expect("path"),
        ])
        .output()
        .expect("run jsoncmp compare");
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("similarity: 0."), "stdout: {stdout}");
    assert!(stdout.contains("failed:"), "stdout: {stdout}");
}

/// JSON output carries the metrics and the diff tree in one object.
#[test]
fn compare_mismatch_json_output() {
    let out = Command::new(jsoncmp_bin())
        .args([
            "compare",
            fixture("grade-base.json").to_str().expect("path"),
            fixture("grade-mismatch.json").to_str().expect("path"),
            "--format",
            "json",
        ])
        .output()
        .expect("run jsoncmp compare");
    assert_eq!(out.status.code(), Some(1));

    let json: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout must be valid JSON");
    assert!(json["similarity"].is_number());
    assert!(json["failed"].as_u64().expect("failed count") > 0);
    assert!(
        json["diff"].as_object().map(|m| !m.is_empty()).expect("diff object"),
        "diff must be non-empty: {json}"
    );
    assert_eq!(json["diff"]["name"]["_error"], "ValuesNotEqual");
}

/// Weights change the reported weighted metrics but not the diff shape.
#[test]
fn compare_with_weights_reports_weighted_metrics() {
    let out = Command::new(jsoncmp_bin())
        .args([
            "compare",
            fixture("grade-base.json").to_str().expect("path"),
            fixture("grade-mismatch.json").to_str().expect("path"),
            "--weights",
            fixture("weights-sample.json").to_str().expect("path"),
            "--format",
            "json",
        ])
        .output()
        .expect("run jsoncmp compare");
    assert_eq!(out.status.code(), Some(1));

    let json: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout must be valid JSON");
    let weighted = json["weighted_count"].as_f64().expect("weighted count");
    let unweighted = json["count"].as_u64().expect("count") as f64;
    assert!(
        weighted > unweighted,
        "weights must raise the weighted count: {weighted} vs {unweighted}"
    );
}

// ---------------------------------------------------------------------------
// compare: console and file output from config
// ---------------------------------------------------------------------------

/// `output.console: true` prints the rendered diff after the summary.
#[test]
fn compare_console_output_prints_the_diff() {
    let out = Command::new(jsoncmp_bin())
        .args([
            "compare",
            fixture("grade-base.json").to_str().expect("path"),
            fixture("grade-mismatch.json").to_str().expect("path"),
            "--config",
            fixture("config-console.json").to_str().expect("path"),
        ])
        .output()
        .expect("run jsoncmp compare");
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("\"_error\""), "stdout: {stdout}");
}

/// `output.file.name` writes the rendered diff to the configured path.
#[test]
fn compare_writes_the_configured_report_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let report_path = dir.path().join("diff-report.json");
    let config_path = dir.path().join("config.json");

    let config = serde_json::json!({
        "output": {"file": {"name": report_path.to_string_lossy(), "indent": 2}}
    });
    let mut file = std::fs::File::create(&config_path).expect("create config");
    write!(file, "{config}").expect("write config");

    let out = Command::new(jsoncmp_bin())
        .args([
            "compare",
            fixture("grade-base.json").to_str().expect("path"),
            fixture("grade-mismatch.json").to_str().expect("path"),
            "--config",
            config_path.to_str().expect("path"),
        ])
        .output()
        .expect("run jsoncmp compare");
    assert_eq!(out.status.code(), Some(1));

    let report = std::fs::read_to_string(&report_path).expect("report file must exist");
    let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON report");
    assert!(parsed.as_object().map(|m| !m.is_empty()).expect("report object"));
}

// ---------------------------------------------------------------------------
// compare: input failures (exit 2)
// ---------------------------------------------------------------------------

/// A missing input file exits 2 before any comparison runs.
#[test]
fn compare_missing_file_exits_2() {
    let out = Command::new(jsoncmp_bin())
        .args([
            "compare",
            fixture("no-such-file.json").to_str().expect("path"),
            fixture("grade-base.json").to_str().expect("path"),
        ])
        .output()
        .expect("run jsoncmp compare");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("cannot read"), "stderr: {stderr}");
}

/// A malformed weight specification exits 2 and names the offending key.
#[test]
fn compare_invalid_weights_exits_2() {
    let out = Command::new(jsoncmp_bin())
        .args([
            "compare",
            fixture("grade-base.json").to_str().expect("path"),
            fixture("grade-base.json").to_str().expect("path"),
            "--weights",
            fixture("weights-invalid.json").to_str().expect("path"),
        ])
        .output()
        .expect("run jsoncmp compare");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("`reading`"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// version
// ---------------------------------------------------------------------------

/// `jsoncmp version` prints the core library version.
#[test]
fn version_prints_the_library_version() {
    let out = Command::new(jsoncmp_bin())
        .args(["version"])
        .output()
        .expect("run jsoncmp version");
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim(), "0.1.0");
}
