//! Integration tests for the `scem` binary.
//!
//! Only paths that exit before the terminal is taken over are exercised:
//! help, version, argument errors and configuration errors.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Build a [`Command`] for the `scem` binary with env isolation.
fn scem_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("scem");
    cmd.env("HOME", "/tmp/scem-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/scem-cli-test-nonexistent")
        .env_remove("SCEM_CONFIG")
        .env_remove("SCEM_LOG_FILE")
        .env_remove("SCEM_STORE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_flag() {
    scem_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("critical plant equipment")
            .and(predicate::str::contains("--config"))
            .and(predicate::str::contains("--store"))
            .and(predicate::str::contains("--no-demo-alarms")),
    );
}

#[test]
fn test_version_flag() {
    scem_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("scem "));
}

#[test]
fn test_unknown_flag_is_rejected() {
    scem_cmd()
        .arg("--bogus")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unexpected argument"));
}

#[test]
fn test_invalid_config_fails_before_terminal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[ui]\ntick_rate_ms = 0\n").unwrap();

    scem_cmd()
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("tick_rate_ms"));
}
