//! CSV table reader.
//!
//! The first record is the header. Columns are matched by (trimmed) header
//! name; short records are allowed and their missing cells are absent.

use super::{Row, table_error};
use crate::PapernetError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read a CSV file into rows.
pub fn read_csv(path: &Path) -> Result<Vec<Row>, PapernetError> {
    let file = File::open(path).map_err(|e| table_error(path, e))?;
    read_csv_from(BufReader::new(file), path)
}

/// Read CSV text from any reader. `origin` is only used in error messages.
pub fn read_csv_from<R: Read>(input: R, origin: &Path) -> Result<Vec<Row>, PapernetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| table_error(origin, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| table_error(origin, e))?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(name, cell)| (name.clone(), cell.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<Row> {
        read_csv_from(text.as_bytes(), Path::new("inline.csv")).expect("parse")
    }

    #[test]
    fn rows_are_keyed_by_header() {
        let rows = parse("paper_id,title,year\np1,Graphs,2020\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("paper_id").map(String::as_str), Some("p1"));
        assert_eq!(rows[0].get("year").map(String::as_str), Some("2020"));
    }

    #[test]
    fn empty_and_missing_cells_are_absent() {
        let rows = parse("paper_id,title,year\np1,,\np2\n");
        assert!(!rows[0].contains_key("title"));
        assert_eq!(rows[1].len(), 1);
    }

    #[test]
    fn quoted_cells_keep_separators() {
        let rows = parse("paper_id,authors\np1,\"a1|Alice;a2|Bob, Jr\"\n");
        assert_eq!(
            rows[0].get("authors").map(String::as_str),
            Some("a1|Alice;a2|Bob, Jr")
        );
    }

    #[test]
    fn header_names_are_trimmed() {
        let rows = parse("source , target\np1,p2\n");
        assert!(rows[0].contains_key("source"));
        assert!(rows[0].contains_key("target"));
    }
}
