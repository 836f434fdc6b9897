//! Configuration loading and defaults.
//!
//! The config file lives at `<config_dir>/imgcsv/config.toml` unless
//! `IMGCSV_CONFIG` points elsewhere. Every field has a default, so a missing
//! file or a partial one both load.

mod migrate;

pub use migrate::{migrate_config, MigrateResult};

use crate::export::Headers;
use crate::listing::{ExtensionFilter, DEFAULT_EXTENSIONS};
use crate::mapping::{MappingError, Mode, SeparatorSet, Tokenizer, DEFAULT_TAG_LABEL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "IMGCSV_CONFIG";

/// Errors that can occur while loading, saving or migrating the config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine the config directory")]
    NoConfigDir,

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config is not valid TOML: {0}")]
    Document(#[from] toml_edit::TomlError),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mapping: MappingConfig,
    pub listing: ListingConfig,
    pub export: ExportConfig,
    pub link: LinkConfig,
}

/// Tokenization defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Literal separators for filename mode
    pub separators: Vec<String>,
    /// Substrings removed before splitting
    pub remove_keywords: Vec<String>,
    /// Drop the file extension before splitting
    pub strip_extension: bool,
    /// Folder mode: emit the file name as the last token
    pub include_leaf: bool,
    /// Column label for `tag` roles without an explicit label
    pub custom_tag_label: String,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            separators: vec!["-".to_string()],
            remove_keywords: Vec::new(),
            strip_extension: true,
            include_leaf: false,
            custom_tag_label: DEFAULT_TAG_LABEL.to_string(),
        }
    }
}

impl MappingConfig {
    /// Build the tokenizer for `mode` from these settings.
    pub fn tokenizer(&self, mode: Mode) -> Result<Tokenizer, MappingError> {
        let tokenizer = match mode {
            Mode::Filename => Tokenizer::filename(
                SeparatorSet::new(self.separators.iter().cloned())?,
                self.remove_keywords.clone(),
            )?,
            Mode::Folder => {
                Tokenizer::folder(self.remove_keywords.clone()).with_leaf(self.include_leaf)
            }
        };
        Ok(tokenizer.with_strip_extension(self.strip_extension))
    }
}

/// Which files count as images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub extensions: Vec<String>,
    pub include_hidden: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: false,
        }
    }
}

impl ListingConfig {
    pub fn filter(&self) -> ExtensionFilter {
        ExtensionFilter::new(&self.extensions)
    }
}

/// Column headers of the exported table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub itemcode_header: String,
    pub colorcode_header: String,
    pub link_header: String,
    /// Append a `Filename` column with each item's display name
    pub include_filename: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let headers = Headers::default();
        Self {
            itemcode_header: headers.itemcode,
            colorcode_header: headers.colorcode,
            link_header: headers.link,
            include_filename: false,
        }
    }
}

impl ExportConfig {
    pub fn headers(&self) -> Headers {
        Headers {
            itemcode: self.itemcode_header.clone(),
            colorcode: self.colorcode_header.clone(),
            link: self.link_header.clone(),
            filename: self.include_filename.then(|| "Filename".to_string()),
        }
    }
}

/// Default link resolution. Both unset means links are the identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
}

impl Config {
    /// Location of the config file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        dirs::config_dir()
            .map(|dir| dir.join("imgcsv").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location; defaults when the file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`; defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, content).map_err(write_err)
    }
}
