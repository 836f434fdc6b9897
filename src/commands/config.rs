//! Config subcommands handler

use anyhow::{bail, Result};
use std::collections::HashSet;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use imgcsv::config::migrate_config;
use imgcsv::Config;

use super::load_config;

const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

fn target_path(config_path: Option<&Path>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Config::config_path()?),
    }
}

/// Show the effective configuration as TOML.
pub fn handle_show(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

/// Print where the config file is read from.
pub fn handle_path(config_path: Option<&Path>) -> Result<()> {
    println!("{}", target_path(config_path)?.display());
    Ok(())
}

/// Write the default configuration.
pub fn handle_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = target_path(config_path)?;
    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite, or `imgcsv config migrate` to add missing fields)",
            path.display()
        );
    }
    Config::default().save_to(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

/// Migrate the config file by adding missing fields.
///
/// Shows a preview of the added lines and asks for confirmation unless
/// `yes` is set.
pub fn handle_migrate(config_path: Option<&Path>, yes: bool) -> Result<()> {
    let path = target_path(config_path)?;
    let file_exists = path.exists();

    let content = if file_exists {
        fs::read_to_string(&path)?
    } else {
        String::new()
    };

    let result = migrate_config(&content)?;

    if !result.has_changes() {
        println!("Config is already up to date.");
        return Ok(());
    }

    if file_exists {
        if result.sections_added.is_empty() {
            println!("Found {} missing field(s):", result.added_fields.len());
        } else {
            println!(
                "Found {} missing field(s) in {} new section(s):",
                result.added_fields.len(),
                result.sections_added.len()
            );
        }
    } else {
        println!("Config file does not exist. Will create with default settings.");
    }
    println!();
    print!(
        "{}",
        diff_preview(&result.content, &result.added_fields, !file_exists, use_color())
    );
    println!();

    let question = if file_exists {
        format!("Apply these changes to {}?", path.display())
    } else {
        format!("Create {}?", path.display())
    };
    if !yes && !prompt_confirmation(&question)? {
        println!("No changes made.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, &result.content)?;
    if file_exists {
        println!("Config updated successfully.");
    } else {
        println!("Config file created successfully.");
    }
    Ok(())
}

fn use_color() -> bool {
    atty::is(atty::Stream::Stdout) && std::env::var_os("NO_COLOR").is_none()
}

/// Diff-style preview: added lines get a `+` prefix, and section headers are
/// shown once for every section with additions.
fn diff_preview(new_content: &str, added_fields: &[String], is_new_file: bool, color: bool) -> String {
    let added: HashSet<&str> = added_fields.iter().map(String::as_str).collect();
    let (start, end) = if color { (GREEN, RESET) } else { ("", "") };

    let mut out = String::new();
    let mut section = String::new();
    let mut pending_header: Option<&str> = None;

    for line in new_content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            section = trimmed[1..trimmed.len() - 1].trim().to_string();
            pending_header = Some(line);
            continue;
        }

        let is_added = match trimmed.split_once('=') {
            Some((key, _)) => added.contains(format!("{}.{}", section, key.trim()).as_str()),
            None => is_new_file && !trimmed.is_empty(),
        };
        if !(is_new_file || is_added) || trimmed.is_empty() {
            continue;
        }

        if let Some(header) = pending_header.take() {
            if is_new_file || section_is_new(&section, new_content, added_fields) {
                out.push_str(&format!("{}+ {}{}\n", start, header, end));
            } else {
                out.push_str(&format!("  {}\n", header));
            }
        }
        out.push_str(&format!("{}+ {}{}\n", start, line, end));
    }
    out
}

/// Every key of the section was added, so the section itself is new.
fn section_is_new(section: &str, content: &str, added_fields: &[String]) -> bool {
    let mut current = String::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            current = trimmed[1..trimmed.len() - 1].trim().to_string();
            continue;
        }
        if current != section {
            continue;
        }
        if let Some((key, _)) = trimmed.split_once('=') {
            if !added_fields.contains(&format!("{}.{}", section, key.trim())) {
                return false;
            }
        }
    }
    true
}

/// Prompt user for yes/no confirmation.
///
/// Returns true if user confirms (y/yes), false otherwise.
/// If stdin is not a TTY (non-interactive), returns false.
fn prompt_confirmation(message: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        println!("Non-interactive mode: use --yes to apply changes automatically");
        return Ok(false);
    }

    print!("{} [y/N] ", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
