//! Apache Parquet table reader (row API, no arrow).

use super::{Row, table_error};
use crate::PapernetError;
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::Field;
use std::fs::File;
use std::path::Path;

/// Read a Parquet file into rows.
pub fn read_parquet(path: &Path) -> Result<Vec<Row>, PapernetError> {
    let file = File::open(path).map_err(|e| table_error(path, e))?;
    let reader = SerializedFileReader::new(file).map_err(|e| table_error(path, e))?;
    let iter = reader.get_row_iter(None).map_err(|e| table_error(path, e))?;

    let mut rows = Vec::new();
    for record in iter {
        let record = record.map_err(|e| table_error(path, e))?;
        let row: Row = record
            .get_column_iter()
            .filter_map(|(name, field)| field_text(field).map(|text| (name.clone(), text)))
            .filter(|(_, text)| !text.is_empty())
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Cell text for a scalar field; `None` for nulls.
fn field_text(field: &Field) -> Option<String> {
    match field {
        Field::Null => None,
        Field::Str(s) => Some(s.clone()),
        Field::Bool(v) => Some(v.to_string()),
        Field::Byte(v) => Some(v.to_string()),
        Field::Short(v) => Some(v.to_string()),
        Field::Int(v) => Some(v.to_string()),
        Field::Long(v) => Some(v.to_string()),
        Field::UByte(v) => Some(v.to_string()),
        Field::UShort(v) => Some(v.to_string()),
        Field::UInt(v) => Some(v.to_string()),
        Field::ULong(v) => Some(v.to_string()),
        Field::Float(v) => Some(v.to_string()),
        Field::Double(v) => Some(v.to_string()),
        other => Some(other.to_string()),
    }
}
