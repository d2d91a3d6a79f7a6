use std::{io::Write, process::Command};

use tempfile::NamedTempFile;

fn table(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn rr_model() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rr_model"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_prints_averages() {
    let input = table("3\n1, 0, 5\n2, 1, 3\n3, 2, 1\n");
    let output = rr_model().arg(input.path()).arg("2").output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Average waiting time: 3.33\nAverage response time: 1.00\n"
    );
}

#[test]
fn test_zero_quantum_prints_zero_averages() {
    let input = table("2\n1 0 5\n2 1 3\n");
    let output = rr_model().arg(input.path()).arg("0").output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Average waiting time: 0.00\nAverage response time: 0.00\n"
    );
}

#[test]
fn test_events_and_table() {
    let input = table("2\n1 0 2\n2 10 1\n");
    let output = rr_model()
        .arg(input.path())
        .arg("5")
        .arg("--events")
        .arg("--table")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("t=2 Idle { from: 2, until: 10 }"));
    assert!(stdout.contains("Average waiting time: 0.00"));
    assert!(stdout.contains("first start"));
}

#[test]
fn test_wrong_arity_is_usage_error() {
    let output = rr_model().arg("only-one").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_quantum() {
    let input = table("1\n1 0 1\n");
    let output = rr_model().arg(input.path()).arg("fast").output().unwrap();

    assert_eq!(output.status.code(), Some(22));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_truncated_table() {
    let input = table("3\n1 0 5\n2 1\n");
    let output = rr_model().arg(input.path()).arg("2").output().unwrap();

    assert_eq!(output.status.code(), Some(22));
    assert!(String::from_utf8_lossy(&output.stderr).contains("end of file"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = rr_model()
        .arg(dir.path().join("nope.txt"))
        .arg("2")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2)); // ENOENT
    assert!(output.stdout.is_empty());
}
