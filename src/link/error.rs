//! Link resolution errors.

use std::path::PathBuf;

/// Errors from resolving a single item's public link.
///
/// Per-item failures never abort an export; the row keeps an empty link.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("No link known for '{0}'")]
    NotFound(String),

    #[error("Cannot build a link for '{identifier}': {reason}")]
    Unresolvable { identifier: String, reason: String },

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Failed to read link manifest {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    #[error("Malformed link manifest: {0}")]
    Csv(#[from] csv::Error),
}
