//! Subcommand handlers and the plumbing they share.

pub mod completions;
pub mod config;
pub mod export;
pub mod template;

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::info;

use imgcsv::cli::SourceArgs;
use imgcsv::listing::{DirectorySource, ItemSource, ListingFile, NamedFiles};
use imgcsv::{Config, Mode, RawItem, Tokenizer};

/// Load the config from `--config` or the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            Config::load_from(path)?
        }
        None => Config::load()?,
    };
    Ok(config)
}

/// Mode used when `--mode` is not given: folder levels for a directory or a
/// listing, file names for individual files.
pub fn default_mode(args: &SourceArgs) -> Mode {
    match (&args.list, args.sources.as_slice()) {
        (Some(_), _) => Mode::Folder,
        (None, [single]) if single.is_dir() => Mode::Folder,
        _ => Mode::Filename,
    }
}

/// List the images of the requested source, in listing order.
pub fn collect_items(args: &SourceArgs, config: &Config) -> Result<Vec<RawItem>> {
    let mut listing = config.listing.clone();
    if !args.extensions.is_empty() {
        listing.extensions = args.extensions.clone();
    }
    let filter = listing.filter();

    let source: Box<dyn ItemSource> = match (&args.list, args.sources.as_slice()) {
        (Some(list), _) => Box::new(ListingFile::new(list, filter)),
        (None, [dir]) if dir.is_dir() => Box::new(
            DirectorySource::new(dir, filter).include_hidden(args.hidden || listing.include_hidden),
        ),
        (None, paths) => {
            if let Some(dir) = paths.iter().find(|p| p.is_dir()) {
                bail!(
                    "{} is a directory; pass a single directory or only image files",
                    dir.display()
                );
            }
            Box::new(NamedFiles::new(paths.to_vec(), filter))
        }
    };

    let items = source.list().context("Failed to list images")?;
    info!(count = items.len(), "Listed images");
    Ok(items)
}

/// Tokenizer from the config, with command-line overrides applied.
pub fn build_tokenizer(args: &SourceArgs, config: &Config, mode: Mode) -> Result<Tokenizer> {
    let mut mapping = config.mapping.clone();
    if !args.separators.is_empty() {
        mapping.separators = args.separators.clone();
    }
    if !args.remove_keywords.is_empty() {
        mapping.remove_keywords = args.remove_keywords.clone();
    }
    if args.keep_extension {
        mapping.strip_extension = false;
    }
    if args.include_leaf {
        mapping.include_leaf = true;
    }
    mapping
        .tokenizer(mode)
        .context("Invalid separator settings")
}
