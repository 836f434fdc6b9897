//! Shared fixtures for the integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create empty files at the given relative paths below a fresh directory.
pub fn image_tree(paths: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for rel in paths {
        touch(dir.path(), rel);
    }
    dir
}

pub fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture dir");
    }
    fs::write(path, b"img").expect("Failed to write fixture");
}

/// The imgcsv binary with an isolated config location and plain logs.
pub fn imgcsv(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("imgcsv").expect("imgcsv binary not built");
    cmd.env("IMGCSV_CONFIG", config_home.path().join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

/// Run imgcsv and capture stdout, stderr and the exit code.
pub fn run_imgcsv(config_home: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = imgcsv(config_home)
        .args(args)
        .output()
        .expect("Failed to execute imgcsv");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

/// Path argument as a string.
pub fn arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
