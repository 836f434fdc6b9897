//! Pre-made listings, one relative path per line.

use super::error::ListingError;
use super::filter::ExtensionFilter;
use super::ItemSource;
use crate::item::RawItem;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;

/// Reads identifiers from a text listing, e.g. the dump of a remote folder.
///
/// Blank lines and lines starting with `#` are skipped; order is preserved.
#[derive(Debug, Clone)]
pub struct ListingFile {
    path: PathBuf,
    filter: ExtensionFilter,
}

impl ListingFile {
    pub fn new(path: impl Into<PathBuf>, filter: ExtensionFilter) -> Self {
        Self {
            path: path.into(),
            filter,
        }
    }

    /// Parse a listing from any reader.
    pub fn parse<R: Read>(reader: R, filter: &ExtensionFilter) -> Result<Vec<RawItem>, ListingError> {
        let mut items = Vec::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let entry = line.trim().trim_start_matches("./");
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            if filter.matches(entry) {
                items.push(RawItem::new(entry));
            }
        }
        Ok(items)
    }
}

impl ItemSource for ListingFile {
    fn list(&self) -> Result<Vec<RawItem>, ListingError> {
        if !self.path.is_file() {
            return Err(ListingError::NotFound {
                path: self.path.clone(),
            });
        }
        let file = std::fs::File::open(&self.path)?;
        Self::parse(file, &self.filter)
    }
}
