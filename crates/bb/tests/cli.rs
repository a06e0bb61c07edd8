//! End-to-end tests for the `bb` binary. Everything here runs offline:
//! the covered paths fail (or finish) before any network request is made.

use assert_cmd::Command;
use predicates::prelude::*;

/// A `bb` invocation isolated from the developer's real config and
/// credentials, running in the given directory.
fn bb_in(dir: &std::path::Path, config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("bb").unwrap();
    cmd.current_dir(dir)
        .env("BB_CONFIG_DIR", config_dir)
        .env_remove("BITBUCKET_USERNAME")
        .env_remove("BITBUCKET_API_TOKEN")
        .env_remove("BITBUCKET_WORKSPACE");
    cmd
}

#[test]
fn help_lists_command_groups() {
    Command::cargo_bin("bb")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pull request"))
        .stdout(predicate::str::contains("auth"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag_reports_name_and_version() {
    Command::cargo_bin("bb")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bb"));
}

#[test]
fn pr_list_outside_a_repo_explains_resolution() {
    let temp = tempfile::tempdir().unwrap();
    let config = tempfile::tempdir().unwrap();

    bb_in(temp.path(), config.path())
        .args(["pr", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Could not determine workspace and repository",
        ));
}

#[test]
fn pr_list_without_credentials_points_at_login() {
    let temp = tempfile::tempdir().unwrap();
    let config = tempfile::tempdir().unwrap();

    bb_in(temp.path(), config.path())
        .args(["pr", "list", "--workspace", "acme", "--repo", "rocket"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API credentials found"))
        .stderr(predicate::str::contains("bb auth login"));
}

#[test]
fn pr_update_requires_a_change() {
    let temp = tempfile::tempdir().unwrap();
    let config = tempfile::tempdir().unwrap();

    bb_in(temp.path(), config.path())
        .args(["pr", "update", "7", "--workspace", "acme", "--repo", "rocket"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to update"));
}

#[test]
fn config_shows_unset_fields_and_file_location() {
    let temp = tempfile::tempdir().unwrap();
    let config = tempfile::tempdir().unwrap();

    bb_in(temp.path(), config.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("(not set)"))
        .stdout(predicate::str::contains("config.json"));
}

#[test]
fn config_masks_a_stored_token() {
    let temp = tempfile::tempdir().unwrap();
    let config = tempfile::tempdir().unwrap();
    std::fs::write(
        config.path().join("config.json"),
        r#"{ "username": "jo@example.com", "apiToken": "super-secret-token" }"#,
    )
    .unwrap();

    bb_in(temp.path(), config.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("****oken"))
        .stdout(predicate::str::contains("super-secret-token").not());
}

#[test]
fn completions_emit_a_script() {
    Command::cargo_bin("bb")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bb"));
}

#[test]
fn unknown_subcommand_fails_with_usage() {
    Command::cargo_bin("bb")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
