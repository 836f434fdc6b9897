//! Tabular export of mapped rows.

mod error;
mod table;

pub use error::ExportError;
pub use table::{read_csv, write_csv, Headers};

use crate::item::RawItem;
use crate::mapping::{ExportRow, Mapper};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tracing::info;

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Csv,
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown format '{}' (expected csv or json)", other)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Csv => write!(f, "csv"),
            Format::Json => write!(f, "json"),
        }
    }
}

/// Rows of one export together with their custom column labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub custom_labels: Vec<String>,
    pub rows: Vec<ExportRow>,
}

impl ExportTable {
    /// Map every item in listing order.
    ///
    /// An empty collection is reported as [`ExportError::EmptyInput`] so the
    /// caller can warn instead of writing a header-only file.
    pub fn build(items: &[RawItem], mapper: &Mapper<'_>) -> Result<Self, ExportError> {
        if items.is_empty() {
            return Err(ExportError::EmptyInput);
        }
        let rows = mapper.apply_all(items);
        let unlinked = rows.iter().filter(|r| r.image_link.is_empty()).count();
        info!(rows = rows.len(), unlinked, "Mapped export rows");

        Ok(Self {
            custom_labels: mapper.custom_labels().to_vec(),
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize in the given format. Returns the number of rows written.
    pub fn write<W: Write>(
        &self,
        format: Format,
        headers: &Headers,
        mut writer: W,
    ) -> Result<usize, ExportError> {
        match format {
            Format::Csv => write_csv(&self.rows, &self.custom_labels, headers, writer),
            Format::Json => {
                serde_json::to_writer_pretty(&mut writer, &self.rows)?;
                writeln!(writer)?;
                writer.flush()?;
                Ok(self.rows.len())
            }
        }
    }
}
