//! Integration tests for the kitup binary.
//!
//! Nothing here installs anything: commands either only read, or run
//! with `--dry-run` against a temporary home directory.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A kitup invocation isolated in an empty home with no PATH.
fn kitup(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("kitup"));
    cmd.env_clear()
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("SHELL", "/bin/zsh")
        .env("PATH", "")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("kitup"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Provision a fresh macOS workstation"))
        .stdout(predicate::str::contains("verify"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("kitup"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_generates_zsh_completions() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("kitup"));
    cmd.args(["completions", "zsh"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("#compdef kitup"));
    Ok(())
}

#[test]
fn cli_rejects_unknown_mode() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("kitup"));
    cmd.args(["run", "--mode", "sometimes"]);
    cmd.assert().failure().code(2);
    Ok(())
}

#[test]
fn bare_invocation_honors_mode_env() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    kitup(&home)
        .env("KITUP_MODE", "sometimes")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("KITUP_MODE"));
    assert!(!home.path().join(".zshrc").exists());
    Ok(())
}

#[test]
fn verify_in_empty_environment_fails() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    kitup(&home)
        .arg("verify")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Claude Code: not found"));
    Ok(())
}

#[test]
fn verify_json_reports_missing_assistant() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let output = kitup(&home).args(["verify", "--json"]).output()?;
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let tools = value["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 9);
    let claude = tools.iter().find(|t| t["command"] == "claude").unwrap();
    assert!(claude["path"].is_null());
    Ok(())
}

#[test]
fn missing_explicit_config_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    kitup(&home)
        .args(["verify", "--config", "/nonexistent/kitup.yml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn malformed_config_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let config = home.path().join("kitup.yml");
    fs::write(&config, "packages: {not: [a, list")?;
    kitup(&home)
        .arg("--config")
        .arg(&config)
        .args(["run", "--dry-run", "--non-interactive"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
    assert!(!home.path().join(".zshrc").exists());
    Ok(())
}

#[test]
fn dry_run_does_not_touch_startup_file() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    kitup(&home)
        .env("KITUP_PROMPT_GIT_NAME", "Test User")
        .args(["run", "--dry-run", "--non-interactive"])
        .assert()
        .stdout(predicate::str::contains("Would append to"))
        .stdout(predicate::str::contains("Dry run: nothing was changed."));
    assert!(!home.path().join(".zshrc").exists());
    Ok(())
}
