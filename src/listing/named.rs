//! Individually named files.

use super::error::ListingError;
use super::filter::ExtensionFilter;
use super::ItemSource;
use crate::item::RawItem;
use std::path::PathBuf;
use tracing::debug;

/// Files given one by one; each identifier is the bare file name, as with a
/// multi-file upload.
#[derive(Debug, Clone)]
pub struct NamedFiles {
    paths: Vec<PathBuf>,
    filter: ExtensionFilter,
}

impl NamedFiles {
    pub fn new(paths: Vec<PathBuf>, filter: ExtensionFilter) -> Self {
        Self { paths, filter }
    }
}

impl ItemSource for NamedFiles {
    fn list(&self) -> Result<Vec<RawItem>, ListingError> {
        let mut items = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            if !path.exists() {
                return Err(ListingError::NotFound { path: path.clone() });
            }
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            if !self.filter.matches(&name) {
                debug!(path = %path.display(), "Skipping non-image file");
                continue;
            }
            items.push(RawItem::new(name));
        }
        Ok(items)
    }
}
