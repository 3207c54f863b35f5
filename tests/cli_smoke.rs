#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! These tests ensure that the binary starts correctly, validates its
//! startup configuration and runs the chat loop on piped input without
//! crashing. None of them needs a reachable model.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn termchat(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("termchat").unwrap();
    // Run inside the temp dir so no stray .env is picked up
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG")
        .current_dir(config_home.path());
    cmd
}

fn write_config(config_home: &TempDir, contents: &str) {
    let dir = config_home.path().join("termchat");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    termchat(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Interactive AI chat"))
        .stdout(predicate::str::contains("--model"))
        .stdout(predicate::str::contains("--system"))
        .stdout(predicate::str::contains("--no-render"))
        .stdout(predicate::str::contains("--no-typing"))
        .stdout(predicate::str::contains("--no-emoji"))
        .stdout(predicate::str::contains("--delay"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    termchat(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_api_key_fails_before_chat() {
    let home = TempDir::new().unwrap();
    termchat(&home)
        .env_remove("OPENROUTER_API_KEY")
        .write_stdin("hello\n")
        .assert()
        .failure()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("OPENROUTER_API_KEY"))
        .stderr(predicate::str::contains(".env"))
        .stdout(predicate::str::contains("Goodbye!").not());
}

#[test]
fn test_api_key_from_dotenv_file() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join(".env"), "OPENROUTER_API_KEY=from-dotenv\n").unwrap();

    termchat(&home)
        .env_remove("OPENROUTER_API_KEY")
        .write_stdin("/exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_unknown_provider_fails() {
    let home = TempDir::new().unwrap();
    termchat(&home)
        .args(["--provider", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_invalid_config_file_fails() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[termchat\nmodel =");

    termchat(&home)
        .env("OPENROUTER_API_KEY", "test-key")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_piped_clear_and_exit() {
    let home = TempDir::new().unwrap();
    termchat(&home)
        .env("OPENROUTER_API_KEY", "test-key")
        .args(["--model", "some/model"])
        .write_stdin("\n/clear\n/exit\nnot read\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("some/model"))
        .stdout(predicate::str::contains("Conversation cleared."))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let home = TempDir::new().unwrap();
    termchat(&home)
        .env("OPENROUTER_API_KEY", "test-key")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_unreachable_endpoint_is_reported_and_session_continues() {
    let home = TempDir::new().unwrap();
    write_config(
        &home,
        r#"
[termchat]
provider = "local"

[providers.local]
endpoint = "http://127.0.0.1:9"
"#,
    );

    termchat(&home)
        .write_stdin("hello\n/clear\n/exit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Error from model:"))
        .stdout(predicate::str::contains("Conversation cleared."))
        .stdout(predicate::str::contains("Goodbye!"));
}
