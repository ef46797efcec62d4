// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use deadlock::Tool;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CIRCULAR_WAIT_FIELDS: [&str; 12] = [
    "n=2",
    "m=2",
    "alloc_0_0=1",
    "alloc_0_1=0",
    "alloc_1_0=0",
    "alloc_1_1=1",
    "req_0_0=0",
    "req_0_1=1",
    "req_1_0=1",
    "req_1_1=0",
    "avail_0=0",
    "avail_1=0",
];

fn setup() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("deadlock.yaml");
    std::fs::write(&config_path, "storage:\n  dir: history\n").unwrap();
    (dir, config_path)
}

async fn run(config: &Path, args: &[&str]) -> Result<String, String> {
    let mut argv = vec!["deadlock", "--config", config.to_str().unwrap()];
    argv.extend_from_slice(args);
    Tool::try_parse_from(argv).unwrap().execute().await
}

fn with_fields<'a>(base: &[&'a str]) -> Vec<&'a str> {
    let mut args = base.to_vec();
    for field in CIRCULAR_WAIT_FIELDS {
        args.push("--field");
        args.push(field);
    }
    args
}

#[tokio::test]
async fn test_detect_then_history() {
    let (dir, config) = setup();

    let output = run(&config, &with_fields(&["detect"])).await.unwrap();
    assert!(output.contains("Result: Deadlock detected in processes: [0, 1]."));
    assert!(output.contains("Recommendation: Terminate Process P0 (holds fewest resources)."));
    assert!(output.contains("Saved as history record #1"));
    assert!(dir.path().join("history").join("deadlock_history.db").exists());

    let input = dir.path().join("safe.json");
    std::fs::write(
        &input,
        r#"{"n":1,"m":1,"allocation":[[1]],"request":[[0]],"available":[0]}"#,
    )
    .unwrap();
    run(&config, &["detect", "--input-file", input.to_str().unwrap()])
        .await
        .unwrap();

    let output = run(&config, &["--output", "json", "history"]).await.unwrap();
    let json: Value = serde_json::from_str(&output).unwrap();
    let records = json["Result"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], 2);
    assert_eq!(records[0]["result"], "No deadlock detected.");
    assert_eq!(records[1]["state"]["allocation"], serde_json::json!([[1, 0], [0, 1]]));

    let output = run(&config, &["history", "--id", "1"]).await.unwrap();
    assert!(output.starts_with("#1  "));
}

#[tokio::test]
async fn test_validation_error_is_reported_and_not_stored() {
    let (_dir, config) = setup();
    let error = run(
        &config,
        &[
            "detect", "--field", "n=1", "--field", "m=1", "--field", "alloc_0_0=-1",
            "--field", "req_0_0=0", "--field", "avail_0=0",
        ],
    )
    .await
    .unwrap_err();
    assert_eq!(error, "Error: Input error: Values must be non-negative.");

    let output = run(&config, &["history"]).await.unwrap();
    assert_eq!(output, "No detections recorded yet.");
}

#[tokio::test]
async fn test_parse_error_is_distinct() {
    let (_dir, config) = setup();
    let error = run(&config, &["--output", "json", "detect", "--field", "n=x", "--field", "m=0"])
        .await
        .unwrap_err();
    let json: Value = serde_json::from_str(&error).unwrap();
    let message = json["Error"].as_str().unwrap();
    assert!(message.starts_with("Invalid input. Enter integers only."));
}

#[tokio::test]
async fn test_no_history_flag() {
    let (_dir, config) = setup();
    let output = run(&config, &with_fields(&["detect", "--no-history"]))
        .await
        .unwrap();
    assert!(!output.contains("Saved as history record"));
    let output = run(&config, &["history"]).await.unwrap();
    assert_eq!(output, "No detections recorded yet.");
}

#[tokio::test]
async fn test_missing_input() {
    let (_dir, config) = setup();
    let error = run(&config, &["detect"]).await.unwrap_err();
    assert!(error.contains("--input-file"));
}

#[tokio::test]
async fn test_config_init_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("conf").join("deadlock.yaml");

    let output = run(&config, &["config", "init"]).await.unwrap();
    assert!(output.starts_with("Wrote default config"));
    assert!(config.exists());
    assert!(run(&config, &["config", "init"]).await.is_err());
    assert!(run(&config, &["config", "init", "--force"]).await.is_ok());

    let output = run(&config, &["--output", "json", "config", "show"]).await.unwrap();
    let json: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["Result"]["storage"]["db_file_name"], "deadlock_history.db");
    assert_eq!(json["Result"]["logger"]["level"], "WARN");
}
