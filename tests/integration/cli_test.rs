//! Integration tests for top-level CLI behavior

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{imgcsv, run_imgcsv};

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    imgcsv(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Image CSV export"))
        .stdout(predicate::str::contains("template"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_shows_package_version() {
    let home = TempDir::new().unwrap();
    imgcsv(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn export_without_source_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    let (_stdout, stderr, code) = run_imgcsv(&home, &["export", "--convention"]);

    assert_eq!(code, 2);
    assert!(stderr.contains("<SOURCE>"));
}

#[test]
fn completions_are_generated() {
    let home = TempDir::new().unwrap();
    imgcsv(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("imgcsv"));
}
