//! General CLI tests covering help, version, error handling and global flags

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper function to create a command instance for the wod-bench binary
fn cli_command() -> Command {
    Command::cargo_bin("wod-bench").expect("Failed to find wod-bench binary")
}

#[test]
fn test_cli_help_and_version() {
    let mut cmd = cli_command();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "CLI tool for running wod-gen load-test scenarios",
        ))
        .stdout(predicate::str::contains("Commands:"));

    let mut cmd = cli_command();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("wod-bench"));
}

#[test]
fn test_cli_invalid_command() {
    let mut cmd = cli_command();
    cmd.arg("invalid-command");

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("error: unrecognized subcommand"));
}

#[test]
fn test_subcommand_help() {
    let subcommands = vec![
        ("list", "List available scenarios"),
        ("profile", "Print the runner options"),
        ("run", "Run a scenario against the service"),
        ("token", "Mint an HS256 bearer token"),
    ];

    for (cmd, description) in subcommands {
        let mut command = cli_command();
        command.args([cmd, "--help"]);
        command
            .assert()
            .success()
            .stdout(predicate::str::contains(description));
    }
}

#[test]
fn test_cli_verbose_flag_positioning() {
    let mut cmd = cli_command();
    cmd.args(["--verbose", "list"]);
    cmd.assert().success();

    // Global flag is accepted after the subcommand too
    let mut cmd = cli_command();
    cmd.args(["list", "-v"]);
    cmd.assert().success();
}

#[test]
fn test_logs_stay_off_stdout() {
    let mut cmd = cli_command();
    cmd.args(["--verbose", "profile", "load", "--vus", "2", "--duration", "10s"]);

    let output = cmd.output().expect("Failed to execute command");
    assert!(output.status.success());

    // Stdout must stay parseable even with the override being logged
    let stdout = String::from_utf8_lossy(&output.stdout);
    let options: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    assert_eq!(options["vus"], 2);
}
