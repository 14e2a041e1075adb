//! CLI integration tests

use std::process::Command;

fn heartbeat_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_heartbeat-tone"))
}

#[test]
fn help_output() {
    let output = heartbeat_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--device"));
    assert!(stdout.contains("--interval"));
    assert!(stdout.contains("--tone-duration"));
    assert!(stdout.contains("--frequency"));
    assert!(stdout.contains("--on-remove"));
    assert!(stdout.contains("devices"));
}

#[test]
fn version_output() {
    let output = heartbeat_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("heartbeat-tone"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    let output = heartbeat_bin()
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("heartbeat-tone"));
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_help() {
    let output = heartbeat_bin()
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[test]
fn invalid_removal_policy_rejected_by_parser() {
    let output = heartbeat_bin()
        .args(["--on-remove", "whenever"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid value"),
        "Expected clap error, got: {}",
        stderr
    );
}

// Valid settings start the controller, which runs until signalled;
// those paths are covered by the controller tests instead.
