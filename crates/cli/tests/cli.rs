//! Tests for the ss3 binary that need no S3 access

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn ss3() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ss3"))
}

#[test]
fn test_help_exits_successfully() {
    for flag in ["-h", "--help"] {
        let output = ss3().arg(flag).output().expect("failed to run ss3");

        assert!(output.status.success(), "{flag} should exit 0");
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Usage: ss3 [BUCKET]"), "{stdout}");
        assert!(stdout.contains("ss3 my-bucket"), "{stdout}");
    }
}

#[test]
fn test_unknown_flag_is_a_usage_error() {
    let output = ss3().arg("--bogus").output().expect("failed to run ss3");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_region_fails_to_start() {
    let home = TempDir::new().unwrap();
    let output = ss3()
        .env_clear()
        .env("HOME", home.path())
        .env("SS3_CONFIG_DIR", home.path())
        .env("AWS_CONFIG_FILE", home.path().join("config"))
        .env("AWS_SHARED_CREDENTIALS_FILE", home.path().join("credentials"))
        .env("AWS_EC2_METADATA_DISABLED", "true")
        .output()
        .expect("failed to run ss3");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No AWS region configured"), "{stderr}");
}

#[test]
fn test_quit_at_bucket_prompt() {
    let home = TempDir::new().unwrap();
    let mut child = ss3()
        .env("SS3_CONFIG_DIR", home.path())
        .env("AWS_REGION", "us-east-1")
        .env("AWS_ACCESS_KEY_ID", "test")
        .env("AWS_SECRET_ACCESS_KEY", "test")
        .env("AWS_EC2_METADATA_DISABLED", "true")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to run ss3");

    child.stdin.take().unwrap().write_all(b"q\n").unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Enter the S3 bucket name"), "{stdout}");
    assert!(stdout.contains("Exiting..."), "{stdout}");
}

#[test]
fn test_invalid_config_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "defaults = 3").unwrap();

    let output = ss3()
        .env("SS3_CONFIG_DIR", dir.path())
        .output()
        .expect("failed to run ss3");

    assert_eq!(output.status.code(), Some(2));
}
