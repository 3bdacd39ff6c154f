//! Runs the sumdiff binary end to end

use super::test_utils::build_tree;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn sumdiff(config_home: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_sumdiff");
    Command::new(bin)
        .env("XDG_CONFIG_HOME", config_home.as_os_str())
        .env("HOME", config_home.join("home").as_os_str())
        .env_remove("SUMDIFF_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_add_list_diff_round() {
    let temp_dir = TempDir::new().unwrap();
    let config_home = temp_dir.path().join("config");
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    build_tree(&src, &[("b/", ""), ("b/old.txt", "old"), ("same.txt", "s")]);
    build_tree(&dst, &[("same.txt", "s"), ("n/", "")]);

    let output = sumdiff(
        &config_home,
        &["add", "--source", src.to_str().unwrap(), "--target", dst.to_str().unwrap()],
    );
    assert!(
        output.status.success(),
        "add should succeed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(config_home.join("sumdiff").join("resource.json").exists());

    let output = sumdiff(&config_home, &["list"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("src"));

    let output = sumdiff(&config_home, &["--quiet", "diff"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "delete `b/old.txt`\ndelete `b`\ncreate `n`\n"
    );
}

#[test]
fn test_diff_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let config_home = temp_dir.path().join("config");
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    build_tree(&src, &[("f.txt", "one")]);
    build_tree(&dst, &[("f.txt", "two")]);

    let output = sumdiff(
        &config_home,
        &[
            "diff",
            "--source",
            src.to_str().unwrap(),
            "--target",
            dst.to_str().unwrap(),
            "--format",
            "json",
        ],
    );
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{"operation": "copy", "path": "f.txt", "is_directory": false}])
    );
}

#[test]
fn test_identical_trees_print_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let config_home = temp_dir.path().join("config");
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    build_tree(&src, &[("f.txt", "same")]);
    build_tree(&dst, &[("f.txt", "same")]);

    let output = sumdiff(
        &config_home,
        &["diff", "--source", src.to_str().unwrap(), "--target", dst.to_str().unwrap()],
    );
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_diff_without_resource_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = sumdiff(temp_dir.path(), &["diff"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("`source` and `target` are required"));
}

#[test]
fn test_add_without_flags_prints_usage() {
    let temp_dir = TempDir::new().unwrap();
    let output = sumdiff(temp_dir.path(), &["add"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Usage: sumdiff add"));
}

#[test]
fn test_add_rejects_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing");
    let output = sumdiff(
        temp_dir.path(),
        &["add", "--source", missing.to_str().unwrap()],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}
