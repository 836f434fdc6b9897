//! File listing errors.

use std::path::PathBuf;

/// Errors that abort a listing.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("Source not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("Failed to read listing: {0}")]
    Io(#[from] std::io::Error),
}
