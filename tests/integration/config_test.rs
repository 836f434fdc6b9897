//! Integration tests for the config subcommands

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use crate::helpers::{imgcsv, run_imgcsv};

#[test]
fn path_honors_environment_override() {
    let home = TempDir::new().unwrap();
    let expected = home.path().join("config.toml");
    imgcsv(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_string_lossy().as_ref()));
}

#[test]
fn show_prints_defaults_without_a_file() {
    let home = TempDir::new().unwrap();
    imgcsv(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[mapping]"))
        .stdout(predicate::str::contains("link_header = \"ImageLink\""));
}

#[test]
fn init_writes_defaults_once() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("config.toml");

    imgcsv(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(path.exists());

    imgcsv(&home)
        .args(["config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    imgcsv(&home)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn migrate_with_yes_adds_missing_fields_and_keeps_comments() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("config.toml");
    fs::write(&path, "# shop settings\n[mapping]\nseparators = [\"_\"]\n").unwrap();

    let (stdout, _stderr, code) = run_imgcsv(&home, &["config", "migrate", "--yes"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("missing field(s)"));
    assert!(stdout.contains("Config updated successfully."));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# shop settings\n"));
    assert!(content.contains("separators = [\"_\"]"));
    assert!(content.contains("strip_extension = true"));
    assert!(content.contains("[export]"));
}

#[test]
fn migrate_without_terminal_makes_no_changes() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("config.toml");
    let original = "[mapping]\nseparators = [\"_\"]\n";
    fs::write(&path, original).unwrap();

    imgcsv(&home)
        .args(["config", "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes made."));

    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn migrate_of_current_file_is_a_no_op() {
    let home = TempDir::new().unwrap();
    imgcsv(&home).args(["config", "init"]).assert().success();

    imgcsv(&home)
        .args(["config", "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"));
}

#[test]
fn invalid_config_file_fails_commands() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("config.toml"), "[mapping\n").unwrap();

    imgcsv(&home)
        .args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn explicit_config_flag_must_exist() {
    let home = TempDir::new().unwrap();
    imgcsv(&home)
        .args(["--config", "/nonexistent/imgcsv.toml", "config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config file not found"));
}
