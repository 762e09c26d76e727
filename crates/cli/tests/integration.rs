//! Integration tests for ss3 against a real bucket
//!
//! Run with:
//! ```bash
//! TEST_S3_BUCKET=my-bucket AWS_REGION=us-east-1 cargo test --features integration
//! ```
//!
//! The bucket must exist and be readable with the ambient AWS credentials.

#![cfg(feature = "integration")]

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn test_bucket() -> Option<String> {
    std::env::var("TEST_S3_BUCKET").ok()
}

/// Run ss3 with `input` piped to stdin
fn run_ss3(args: &[&str], input: &str, work_dir: &std::path::Path) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ss3"))
        .args(args)
        .current_dir(work_dir)
        .env("SS3_CONFIG_DIR", work_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run ss3");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_open_bucket_and_quit() {
    let Some(bucket) = test_bucket() else {
        eprintln!("TEST_S3_BUCKET not set, skipping");
        return;
    };
    let dir = TempDir::new().unwrap();

    let output = run_ss3(&[&bucket], "q\n", dir.path());

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("Current Bucket: {bucket}")), "{stdout}");
    assert!(stdout.contains("(Page 1 of"), "{stdout}");
}

#[test]
fn test_missing_bucket_keeps_session_alive() {
    if test_bucket().is_none() {
        eprintln!("TEST_S3_BUCKET not set, skipping");
        return;
    }
    let dir = TempDir::new().unwrap();

    let output = run_ss3(&[], "ss3-bucket-that-does-not-exist-4242\nq\n", dir.path());

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Exiting..."), "{stdout}");
}

#[test]
fn test_interactive_paging_commands() {
    let Some(bucket) = test_bucket() else {
        eprintln!("TEST_S3_BUCKET not set, skipping");
        return;
    };
    let dir = TempDir::new().unwrap();

    let output = run_ss3(&[&bucket], "h\nf\np\nb\nn\nq\n", dir.path());

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Help"), "{stdout}");
}
