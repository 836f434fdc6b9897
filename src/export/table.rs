//! CSV serialization of export rows.

use super::error::ExportError;
use crate::item::leaf_name;
use crate::mapping::{CustomField, ExportRow};
use std::io::{Read, Write};

/// Column names of the fixed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headers {
    pub itemcode: String,
    pub colorcode: String,
    pub link: String,
    /// Trailing file name column, omitted when `None`.
    pub filename: Option<String>,
}

impl Default for Headers {
    fn default() -> Self {
        Self {
            itemcode: "Itemcode".to_string(),
            colorcode: "Colorcode".to_string(),
            link: "ImageLink".to_string(),
            filename: None,
        }
    }
}

impl Headers {
    /// Full header row: fixed fields, custom labels, link, optional file name.
    pub fn row(&self, custom_labels: &[String]) -> Vec<String> {
        let mut row = Vec::with_capacity(custom_labels.len() + 4);
        row.push(self.itemcode.clone());
        row.push(self.colorcode.clone());
        row.extend(custom_labels.iter().cloned());
        row.push(self.link.clone());
        if let Some(filename) = &self.filename {
            row.push(filename.clone());
        }
        row
    }
}

/// Writes rows as UTF-8, comma-delimited CSV with a header row.
///
/// Returns the number of data rows written.
pub fn write_csv<W: Write>(
    rows: &[ExportRow],
    custom_labels: &[String],
    headers: &Headers,
    writer: W,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    csv_writer.write_record(headers.row(custom_labels))?;

    for row in rows {
        let mut record: Vec<&str> = Vec::with_capacity(custom_labels.len() + 4);
        record.push(&row.itemcode);
        record.push(&row.colorcode);
        for label in custom_labels {
            record.push(row.custom_value(label).unwrap_or(""));
        }
        record.push(&row.image_link);
        if headers.filename.is_some() {
            record.push(&row.display_name);
        }
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(rows.len())
}

/// Reads an export written by [`write_csv`] back into rows.
///
/// Columns between the colorcode and link columns are custom fields. Without
/// a file name column the display name is taken from the link.
pub fn read_csv<R: Read>(reader: R, headers: &Headers) -> Result<Vec<ExportRow>, ExportError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    let header_row: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();

    let find = |name: &str| {
        header_row
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ExportError::MissingColumn(name.to_string()))
    };
    let itemcode_col = find(&headers.itemcode)?;
    let colorcode_col = find(&headers.colorcode)?;
    let link_col = find(&headers.link)?;
    let filename_col = headers
        .filename
        .as_deref()
        .and_then(|name| header_row.iter().position(|h| h == name));

    let custom_cols: Vec<usize> = (colorcode_col + 1..link_col).collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        let image_link = field(link_col);
        let display_name = match filename_col {
            Some(col) => field(col),
            None => leaf_name(&image_link).to_string(),
        };
        rows.push(ExportRow {
            itemcode: field(itemcode_col),
            colorcode: field(colorcode_col),
            custom: custom_cols
                .iter()
                .map(|&col| CustomField {
                    label: header_row[col].clone(),
                    value: field(col),
                })
                .collect(),
            image_link,
            display_name,
        });
    }
    Ok(rows)
}
