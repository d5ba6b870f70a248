//! # Table Formats
//!
//! Readers that turn a table file into name-keyed rows.
//!
//! Every reader produces the same shape, [`Row`]: column name to cell text,
//! with null or empty cells omitted. Typed records are built from rows in
//! the `store` module, so numeric coercion happens in exactly one place.

mod csv_reader;
#[cfg(feature = "parquet")]
mod parquet_reader;

pub use csv_reader::{read_csv, read_csv_from};

use crate::PapernetError;
use std::collections::BTreeMap;
use std::path::Path;

/// One table row: column name -> cell text.
pub type Row = BTreeMap<String, String>;

/// Table file formats, recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    /// Lookup order for a table found by name: parquet wins over csv.
    pub const LOOKUP_ORDER: [Self; 2] = [Self::Parquet, Self::Csv];

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }

    /// Format of a path, judged by its extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, PapernetError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            _ => Err(PapernetError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read every row of a table file.
pub fn read_table(path: &Path) -> Result<Vec<Row>, PapernetError> {
    match TableFormat::from_path(path)? {
        TableFormat::Csv => read_csv(path),
        TableFormat::Parquet => read_parquet_table(path),
    }
}

#[cfg(feature = "parquet")]
fn read_parquet_table(path: &Path) -> Result<Vec<Row>, PapernetError> {
    parquet_reader::read_parquet(path)
}

#[cfg(not(feature = "parquet"))]
fn read_parquet_table(path: &Path) -> Result<Vec<Row>, PapernetError> {
    Err(PapernetError::UnsupportedFormat(format!(
        "{} (built without parquet support)",
        path.display()
    )))
}

/// Wrap a reader failure with the offending path.
pub(crate) fn table_error(path: &Path, reason: impl ToString) -> PapernetError {
    PapernetError::TableRead {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
