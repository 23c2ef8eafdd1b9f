use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::prelude::*;
use std::path::Path;

fn pagekeep(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pagekeep").unwrap();
    cmd.env("PAGEKEEP_DATA_DIR", data_dir)
        .env("NO_COLOR", "1")
        .env_remove("PAGEKEEP_LOG");
    cmd
}

#[test]
fn test_first_run_lists_seed_pages() {
    let temp_dir = tempfile::tempdir().unwrap();

    pagekeep(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Getting Started"))
        .stdout(predicate::str::contains("Team Projects"));

    assert!(temp_dir.path().join("pages.json").exists());
}

#[test]
fn test_create_nested_page_and_show_it() {
    let temp_dir = tempfile::tempdir().unwrap();

    pagekeep(temp_dir.path())
        .args(["create", "Roadmap", "--parent", "Work", "--tag", "planning"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page created: Roadmap"));

    pagekeep(temp_dir.path())
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::contains("Roadmap #planning"));

    pagekeep(temp_dir.path())
        .args(["show", "roadmap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Work"))
        .stdout(predicate::str::contains("tags planning"));
}

#[test]
fn test_template_export_as_markdown() {
    let temp_dir = tempfile::tempdir().unwrap();

    pagekeep(temp_dir.path())
        .args(["create", "Q3 Plan", "--template", "project-plan"])
        .assert()
        .success();

    pagekeep(temp_dir.path())
        .args(["export", "Q3 Plan"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Q3 Plan"))
        .stdout(predicate::str::contains("## Goals"));
}

#[test]
fn test_favorite_and_delete() {
    let temp_dir = tempfile::tempdir().unwrap();

    pagekeep(temp_dir.path())
        .args(["favorite", "Goals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added to favorites"));

    pagekeep(temp_dir.path())
        .arg("favorites")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goals").and(predicate::str::contains("Personal").not()));

    pagekeep(temp_dir.path())
        .args(["delete", "Goals"])
        .assert()
        .success();

    pagekeep(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goals").not());
}

#[test]
fn test_unknown_page_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    pagekeep(temp_dir.path())
        .args(["show", "does not exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Page not found"));
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = tempfile::tempdir().unwrap();

    pagekeep(temp_dir.path())
        .args(["config", "debounce_ms", "250"])
        .assert()
        .success()
        .stdout(predicate::str::contains("debounce_ms set to 250"));

    pagekeep(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("debounce_ms = 250"));
}

#[test]
fn test_write_saves_stdin_to_the_page() {
    let temp_dir = tempfile::tempdir().unwrap();

    pagekeep(temp_dir.path())
        .args(["write", "Goals"])
        .write_stdin("Ship the bridge.\n\nThen rest.\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved: "))
        .stdout(predicate::str::contains("Goals"));

    pagekeep(temp_dir.path())
        .args(["export", "Goals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ship the bridge."))
        .stdout(predicate::str::contains("Then rest."));
}

#[test]
fn test_write_with_unreachable_remote_keeps_local_copy() {
    let temp_dir = tempfile::tempdir().unwrap();

    pagekeep(temp_dir.path())
        .args(["config", "remote_url", "http://127.0.0.1:9"])
        .assert()
        .success();

    pagekeep(temp_dir.path())
        .args(["write", "Goals"])
        .write_stdin("offline draft")
        .assert()
        .failure()
        .stdout(predicate::str::contains("remote save failed"));

    pagekeep(temp_dir.path())
        .args(["export", "Goals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offline draft"));
}
