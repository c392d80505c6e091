//! CLI end-to-end tests
//!
//! Tests for the movieweb command-line interface against a temporary
//! database file.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::{tempdir, TempDir};

/// Get a command for the movieweb binary
#[allow(deprecated)]
fn movieweb_cmd() -> Command {
    Command::cargo_bin("movieweb").unwrap()
}

/// A temp dir with a config file pointing at a database inside it.
fn setup(extra: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("movies.db");
    let config_path = dir.path().join("movieweb.toml");
    fs::write(
        &config_path,
        format!("[database]\npath = '{}'\n{extra}", db_path.display()),
    )
    .unwrap();
    (dir, config_path)
}

fn run_json(config: &PathBuf, args: &[&str]) -> serde_json::Value {
    let output = movieweb_cmd()
        .arg("--config")
        .arg(config)
        .arg("--json")
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "command {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cli_no_args_shows_help() {
    movieweb_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    movieweb_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("movieweb"));
}

#[test]
fn test_cli_init_creates_database() {
    let (dir, config) = setup("");
    movieweb_cmd()
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("sqlite"));
    assert!(dir.path().join("movies.db").exists());
}

#[test]
fn test_cli_seeded_users_listed() {
    let (_dir, config) = setup("seed_sample_data = true\n");
    movieweb_cmd()
        .arg("--config")
        .arg(&config)
        .args(["users", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("Diana"));
}

#[test]
fn test_cli_movie_and_review_flow() {
    let (_dir, config) = setup("");

    let user = run_json(&config, &["users", "add", "alice"]);
    assert_eq!(user["username"], "alice");
    let user_id = user["id"].as_i64().unwrap().to_string();

    let movie = run_json(
        &config,
        &[
            "movies", "add", &user_id, "--title", "Inception", "--director",
            "Christopher Nolan", "--year", "2010", "--rating", "8.8",
        ],
    );
    let movie_id = movie["id"].as_i64().unwrap().to_string();

    // Only the rating changes; the CLI keeps the other fields.
    let updated = run_json(&config, &["movies", "update", &movie_id, "--rating", "9"]);
    assert_eq!(updated["title"], "Inception");
    assert_eq!(updated["director"], "Christopher Nolan");
    assert_eq!(updated["rating"], 9.0);

    let review = run_json(
        &config,
        &["reviews", "add", &user_id, &movie_id, "--text", "Great", "--rating", "9"],
    );
    assert_eq!(review["text"], "Great");

    let reviews = run_json(&config, &["reviews", "for-movie", &movie_id]);
    assert_eq!(reviews.as_array().unwrap().len(), 1);

    run_json(&config, &["movies", "delete", &movie_id]);
    let reviews = run_json(&config, &["reviews", "for-user", &user_id]);
    assert!(reviews.as_array().unwrap().is_empty());
}

#[test]
fn test_cli_duplicate_user_fails() {
    let (_dir, config) = setup("");
    movieweb_cmd()
        .arg("--config")
        .arg(&config)
        .args(["users", "add", "bob"])
        .assert()
        .success();
    movieweb_cmd()
        .arg("--config")
        .arg(&config)
        .args(["users", "add", "bob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_cli_show_missing_movie_fails() {
    let (_dir, config) = setup("");
    movieweb_cmd()
        .arg("--config")
        .arg(&config)
        .args(["movies", "show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("movie 42 not found"));
}

#[test]
fn test_cli_invalid_config_rejected() {
    let (_dir, config) = setup("pool_size = 0\n");
    movieweb_cmd()
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pool_size"));
}
