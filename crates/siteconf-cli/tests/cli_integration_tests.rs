//! CLI integration tests
//!
//! Run the `siteconf` binary against a fixture and check stdout, stderr and
//! the exit status.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("site_history.yaml")
}

fn siteconf(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_siteconf"))
        .args(["--log-format", "test"])
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// base64url("SiteConfiguration:<n>")
const REV_1: &str = "U2l0ZUNvbmZpZ3VyYXRpb246MQ==";
const REV_2: &str = "U2l0ZUNvbmZpZ3VyYXRpb246Mg==";
const REV_3: &str = "U2l0ZUNvbmZpZ3VyYXRpb246Mw==";
const REV_6: &str = "U2l0ZUNvbmZpZ3VyYXRpb246Ng==";

#[test]
fn test_history_prints_newest_first_page() {
    let fixture = fixture();
    let output = siteconf(&["history", "--fixture", fixture.to_str().unwrap(), "--first", "2"]);

    let json = stdout_json(&output);
    assert_eq!(json["totalCount"], 6);
    assert_eq!(json["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(json["nodes"][0]["id"], REV_6);
    assert_eq!(json["pageInfo"]["hasNextPage"], true);
    assert_eq!(json["pageInfo"]["hasPreviousPage"], false);
}

#[test]
fn test_history_last_page_reaches_first_revision() {
    let fixture = fixture();
    let output = siteconf(&["history", "--fixture", fixture.to_str().unwrap(), "--last", "1"]);

    let json = stdout_json(&output);
    assert_eq!(json["nodes"][0]["id"], REV_1);
    assert!(json["nodes"][0]["previousId"].is_null());
    assert_eq!(json["nodes"][0]["author"]["kind"], "system");
}

#[test]
fn test_show_prints_node_without_secrets() {
    let fixture = fixture();
    let output = siteconf(&["show", "--fixture", fixture.to_str().unwrap(), "--id", REV_2]);

    let json = stdout_json(&output);
    assert_eq!(json["id"], REV_2);
    assert_eq!(json["previousId"], REV_1);
    assert_eq!(json["author"]["username"], "ops");
    assert!(!String::from_utf8_lossy(&output.stdout).contains("hunter2"));
}

#[test]
fn test_diff_prints_raw_text() {
    let fixture = fixture();
    let output = siteconf(&["diff", "--fixture", fixture.to_str().unwrap(), "--id", REV_6]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "--- previous\n+++ current\n-maxReposToSearch: 10\n+maxReposToSearch: 20\n"
    );
}

#[test]
fn test_secret_only_revision_prints_empty_diff() {
    let fixture = fixture();
    let output = siteconf(&["diff", "--fixture", fixture.to_str().unwrap(), "--id", REV_3]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unknown_revision_exits_with_error() {
    let fixture = fixture();
    // base64url("SiteConfiguration:99")
    let output = siteconf(&[
        "show",
        "--fixture",
        fixture.to_str().unwrap(),
        "--id",
        "U2l0ZUNvbmZpZ3VyYXRpb246OTk=",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: [ERR_NOT_FOUND]"), "stderr: {}", stderr);
}

#[test]
fn test_malformed_id_exits_with_error() {
    let fixture = fixture();
    let output = siteconf(&["diff", "--fixture", fixture.to_str().unwrap(), "--id", "nope"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_MALFORMED_ID"));
}

#[test]
fn test_config_file_changes_default_page_size() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("siteconf.yaml");
    fs::write(&config_path, "history:\n  default_page_size: 4\n").unwrap();
    let fixture = fixture();

    let output = siteconf(&[
        "--config",
        config_path.to_str().unwrap(),
        "history",
        "--fixture",
        fixture.to_str().unwrap(),
    ]);

    let json = stdout_json(&output);
    assert_eq!(json["nodes"].as_array().unwrap().len(), 4);
}

#[test]
fn test_invalid_config_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("siteconf.yaml");
    fs::write(&config_path, "history:\n  max_page_size: 0\n").unwrap();
    let fixture = fixture();

    let output = siteconf(&[
        "--config",
        config_path.to_str().unwrap(),
        "history",
        "--fixture",
        fixture.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_INVALID_CONFIG"));
}

#[test]
fn test_missing_fixture_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.yaml");

    let output = siteconf(&["history", "--fixture", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error: "));
}
