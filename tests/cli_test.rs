//! CLI contract tests
//!
//! Runs the built binary in an isolated temp directory and verifies output
//! formats, exit codes and config handling.

use std::path::{Path, PathBuf};
use std::process::Command;

fn credence_bin() -> String {
    env!("CARGO_BIN_EXE_credence").to_string()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Run in `dir` so no stray credence.toml is picked up; returns (code, stdout, stderr)
fn run(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(credence_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run credence");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn venues_path() -> String {
    fixture("venues.json").display().to_string()
}

#[test]
fn assess_json_keeps_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run(dir.path(), &["assess", &venues_path(), "--format", "json"]);
    assert_eq!(code, 0, "stderr: {stderr}");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    let reports = parsed.as_array().expect("array of reports");
    let ids: Vec<&str> = reports
        .iter()
        .map(|r| r["assessment"]["venue_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["symp-systems", "regional-workshop", "ijamr"]);
    assert_eq!(reports[2]["assessment"]["risk_level"], "critical");
    assert!(reports[0]["citation"].is_object());
    assert!(reports[1]["citation"].is_null());
}

#[test]
fn assess_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["assess", &venues_path()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("International Journal of Advanced Multidisciplinary Research"));
    assert!(stdout.contains("RECOMMENDATIONS"));
}

#[test]
fn compare_reports_best_and_worst() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run(
        dir.path(),
        &["compare", &venues_path(), "--format", "json", "--workers", "2"],
    );
    assert_eq!(code, 0, "stderr: {stderr}");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(parsed["total_venues"], 3);
    assert_eq!(parsed["best"]["venue_id"], "symp-systems");
    assert_eq!(parsed["worst"]["venue_id"], "ijamr");
    assert_eq!(parsed["ranking"].as_array().unwrap().len(), 3);
}

#[test]
fn fail_on_threshold_sets_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run(
        dir.path(),
        &["assess", &venues_path(), "--format", "json", "--fail-on", "critical"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("--fail-on=critical"));
}

#[test]
fn failing_venue_sets_exit_code_without_hiding_others() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("mixed.json");
    std::fs::write(
        &input,
        r#"[
            {"signal": {"venue_id": "ok", "website": {"has_tls": true, "structural_completeness": 0.8}}},
            {"signal": {"venue_id": "empty"}}
        ]"#,
    )
    .unwrap();

    let (code, stdout, stderr) = run(
        dir.path(),
        &["assess", input.to_str().unwrap(), "--format", "json"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("insufficient data"), "stderr: {stderr}");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}

#[test]
fn init_then_config_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("credence.toml"));
    assert!(dir.path().join("credence.toml").exists());

    let (code, _, stderr) = run(dir.path(), &["assess", &venues_path(), "--format", "json"]);
    assert_eq!(code, 0, "stderr: {stderr}");
}

#[test]
fn tampered_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(
        &config,
        "[scoring.component_weights]\ncfp_credibility = 0.9\n",
    )
    .unwrap();

    let (code, _, stderr) = run(
        dir.path(),
        &["assess", &venues_path(), "--config", config.to_str().unwrap()],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("component weights must sum to 1.0"), "stderr: {stderr}");
}

#[test]
fn oversized_configured_workers_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("credence.toml"), "[defaults]\nworkers = 100000\n").unwrap();

    let (code, _, stderr) = run(dir.path(), &["assess", &venues_path()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("workers cannot exceed 64"), "stderr: {stderr}");
}
