//! Integration tests for the agentmarkdown CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::process::{self, Stdio};
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_agentmarkdown"))
}

#[test]
fn test_basic_stdin() {
    cli()
        .write_stdin("<em>emphasis</em>")
        .assert()
        .success()
        .stdout("*emphasis*");
}

#[test]
fn test_file_input() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("input.html");
    fs::write(&input_path, "<h1>Title</h1><p>Content</p>").unwrap();

    cli()
        .arg(input_path.to_str().unwrap())
        .assert()
        .success()
        .stdout("# Title #\n\nContent");
}

#[test]
fn test_usage_without_input() {
    cli()
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Usage: agentmarkdown [filePath]"));
}

#[test]
fn test_usage_on_empty_stdin() {
    cli()
        .write_stdin("")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("the standard input is used"));
}

#[test]
fn test_missing_file_is_a_conversion_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.html");

    cli()
        .arg(missing.to_str().unwrap())
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error converting HTML to markdown."));
}

#[test]
fn test_layout_flags() {
    cli()
        .args(["--bullet=-", "--hr=---"])
        .write_stdin("<ul><li>a</li><li>b</li></ul><hr>")
        .assert()
        .success()
        .stdout("- a\n- b\n\n---");
}

#[test]
fn test_invalid_bullet_is_rejected() {
    cli()
        .args(["--bullet", "x"])
        .write_stdin("<p>x</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bullet"));
}

#[test]
fn test_closed_stdout_is_a_write_error() {
    let mut child = process::Command::new(env!("CARGO_BIN_EXE_agentmarkdown"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // Close the read end before any output is written.
    drop(child.stdout.take());
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"<p>text</p>")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error writing to stdout."));
}
