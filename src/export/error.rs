//! Export errors.

/// Errors that can occur while producing or reading an export table.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No images found after filtering")]
    EmptyInput,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export is missing the '{0}' column")]
    MissingColumn(String),
}
