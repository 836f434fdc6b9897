//! Local directory tree walker.

use super::error::ListingError;
use super::filter::ExtensionFilter;
use super::ItemSource;
use crate::item::RawItem;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Lists images below a root directory, keeping the folder hierarchy in each
/// identifier (`Season/Item/Color/file.jpg`).
///
/// Entries are visited sorted by file name, so listings are stable across
/// platforms.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    filter: ExtensionFilter,
    include_hidden: bool,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, filter: ExtensionFilter) -> Self {
        Self {
            root: root.into(),
            filter,
            include_hidden: false,
        }
    }

    /// Also descend into dot-directories and list dotfiles.
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn relative_identifier(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        (!parts.is_empty()).then(|| parts.join("/"))
    }
}

impl ItemSource for DirectorySource {
    fn list(&self) -> Result<Vec<RawItem>, ListingError> {
        if !self.root.exists() {
            return Err(ListingError::NotFound {
                path: self.root.clone(),
            });
        }
        if !self.root.is_dir() {
            return Err(ListingError::NotADirectory {
                path: self.root.clone(),
            });
        }

        let include_hidden = self.include_hidden;
        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| e.depth() == 0 || include_hidden || !is_hidden(e));

        let mut items = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    // A broken link or unreadable subfolder should not hide
                    // the rest of the tree; a failing root should.
                    if e.depth() == 0 {
                        return Err(ListingError::Walk {
                            path: self.root.clone(),
                            message: e.to_string(),
                        });
                    }
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.filter.matches(entry.file_name()) {
                continue;
            }
            if let Some(identifier) = self.relative_identifier(entry.path()) {
                items.push(RawItem::new(identifier));
            }
        }

        debug!(root = %self.root.display(), count = items.len(), "Listed directory");
        Ok(items)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.') || s == "__MACOSX")
        .unwrap_or(false)
}
