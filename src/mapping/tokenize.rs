//! Identifier tokenization for filename and folder mode.

use super::error::MappingError;
use super::separator::SeparatorSet;
use crate::item::leaf_name;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which part of an identifier carries the tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Tokens are the folder levels of a relative path.
    #[default]
    Folder,
    /// Tokens are the pieces of the leaf file name.
    Filename,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Folder => write!(f, "folder"),
            Mode::Filename => write!(f, "filename"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "folder" | "folders" | "path" => Ok(Mode::Folder),
            "filename" | "file" | "name" => Ok(Mode::Filename),
            other => Err(format!("unknown mode '{}' (expected folder or filename)", other)),
        }
    }
}

/// Splits identifiers into ordered tokens.
///
/// One tokenizer is built per export and shared by template building and
/// every `apply`, so the template positions line up with the item tokens.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    mode: Mode,
    separators: SeparatorSet,
    remove_keywords: Vec<String>,
    strip_extension: bool,
    include_leaf: bool,
}

impl Tokenizer {
    /// Tokenizer for file names. Needs at least one separator.
    pub fn filename(
        separators: SeparatorSet,
        remove_keywords: Vec<String>,
    ) -> Result<Self, MappingError> {
        if separators.is_empty() {
            return Err(MappingError::NoSeparators);
        }
        Ok(Self {
            mode: Mode::Filename,
            separators,
            remove_keywords: clean_keywords(remove_keywords),
            strip_extension: true,
            include_leaf: false,
        })
    }

    /// Tokenizer for relative paths; the path separator is implicit.
    pub fn folder(remove_keywords: Vec<String>) -> Self {
        Self {
            mode: Mode::Folder,
            separators: SeparatorSet::path(),
            remove_keywords: clean_keywords(remove_keywords),
            strip_extension: true,
            include_leaf: false,
        }
    }

    /// Keep (`false`) or drop (`true`, default) the final `.ext` of file names.
    pub fn with_strip_extension(mut self, strip: bool) -> Self {
        self.strip_extension = strip;
        self
    }

    /// Folder mode only: also emit the leaf file name as the last token.
    pub fn with_leaf(mut self, include: bool) -> Self {
        self.include_leaf = include;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn separators(&self) -> &SeparatorSet {
        &self.separators
    }

    pub fn remove_keywords(&self) -> &[String] {
        &self.remove_keywords
    }

    /// Split an identifier into tokens.
    pub fn tokenize(&self, identifier: &str) -> Vec<String> {
        match self.mode {
            Mode::Filename => self.tokenize_filename(identifier),
            Mode::Folder => self.tokenize_folder(identifier),
        }
    }

    fn tokenize_filename(&self, identifier: &str) -> Vec<String> {
        let name = leaf_name(identifier);
        let name = if self.strip_extension {
            file_stem(name)
        } else {
            name
        };
        let cleaned = strip_keywords(name, &self.remove_keywords);
        self.separators.split(&cleaned)
    }

    fn tokenize_folder(&self, identifier: &str) -> Vec<String> {
        let normalized = identifier.replace('\\', "/");
        let mut levels: Vec<&str> = normalized
            .split('/')
            .filter(|part| !part.is_empty())
            .collect();
        // The leaf is split off before keyword removal so a keyword can
        // never empty it and shift the folder levels.
        let leaf = levels.pop();

        // A level emptied by keyword removal stays as an empty token.
        let mut parts: Vec<String> = levels
            .into_iter()
            .map(|level| strip_keywords(level, &self.remove_keywords))
            .collect();

        if self.include_leaf {
            if let Some(leaf) = leaf {
                let leaf = if self.strip_extension {
                    file_stem(leaf)
                } else {
                    leaf
                };
                parts.push(strip_keywords(leaf, &self.remove_keywords));
            }
        }
        parts
    }
}

/// Remove every occurrence of each keyword, keyword by keyword in order.
///
/// Later keywords see the result of earlier removals, so overlapping
/// keywords depend on list order.
pub fn strip_keywords(input: &str, keywords: &[String]) -> String {
    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .fold(input.to_string(), |acc, keyword| acc.replace(keyword.as_str(), ""))
}

/// File name without its final extension. Dotfiles keep their name.
fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => name,
        Some(pos) => &name[..pos],
    }
}

fn clean_keywords(keywords: Vec<String>) -> Vec<String> {
    keywords.into_iter().filter(|k| !k.is_empty()).collect()
}
