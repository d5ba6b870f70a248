//! # Raw Export Conversion
//!
//! Normalizes a raw bibliographic export into the three tables the store
//! loads.
//!
//! Raw input (all CSV, in one directory):
//! - `papers.csv`: `paper_id, title, year, cited_by_count`
//! - `citations.csv`: `citing_paper_id, cited_paper_id`
//! - `authors.csv`: `author_id, author_name, paper_ids, institutions`
//!   where `paper_ids` and `institutions` are `|`-separated
//!
//! Output: `papers.csv`, `citations.csv` and `authorships.csv` in the
//! normalized column layout, with the embedded `authors` column rebuilt
//! from the authorships.

use crate::formats::{Row, read_csv};
use crate::primitives::{AUTHOR_ID_SEPARATOR, AUTHOR_SEPARATOR, coerce_i64, coerce_u64};
use crate::store::{AUTHORSHIPS_TABLE, CITATIONS_TABLE, PAPERS_TABLE};
use crate::{Authorship, Citation, Paper, PapernetError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Raw author table name.
pub const RAW_AUTHORS_TABLE: &str = "authors";

/// Separator inside the raw `paper_ids` and `institutions` columns.
const RAW_LIST_SEPARATOR: char = '|';

const PAPER_COLUMNS: [&str; 7] = [
    "paper_id",
    "title",
    "year",
    "field",
    "institution",
    "patent_count",
    "authors",
];
const CITATION_COLUMNS: [&str; 3] = ["source", "target", "year"];
const AUTHORSHIP_COLUMNS: [&str; 4] = ["paper_id", "author_id", "author_name", "institution"];

/// Values filled in for columns the raw export does not carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// `field` of every converted paper.
    pub field: String,
    /// `institution` of every converted paper, and of authors with none listed.
    pub institution: String,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            field: "computer science".to_string(),
            institution: "Northeastern University".to_string(),
        }
    }
}

/// Row counts written by a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub papers: usize,
    pub citations: usize,
    pub authorships: usize,
}

/// The three normalized tables, before they are written out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertedTables {
    pub papers: Vec<Paper>,
    pub citations: Vec<Citation>,
    pub authorships: Vec<Authorship>,
}

impl ConvertedTables {
    #[must_use]
    pub fn report(&self) -> ConversionReport {
        ConversionReport {
            papers: self.papers.len(),
            citations: self.citations.len(),
            authorships: self.authorships.len(),
        }
    }
}

fn cell<'r>(row: &'r Row, column: &str) -> &'r str {
    row.get(column).map_or("", String::as_str)
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(RAW_LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Convert raw rows into normalized tables.
///
/// - Authorships referencing unknown papers are dropped
/// - An author's institution is the first listed, else the default
/// - Citations keep only rows with both endpoints among the papers, and
///   take the citing paper's year
#[must_use]
pub fn convert_rows(
    raw_papers: &[Row],
    raw_citations: &[Row],
    raw_authors: &[Row],
    options: &ConversionOptions,
) -> ConvertedTables {
    let mut papers: Vec<Paper> = raw_papers
        .iter()
        .map(|row| Paper {
            paper_id: cell(row, "paper_id").to_string(),
            title: cell(row, "title").to_string(),
            year: coerce_i64(cell(row, "year")),
            field: options.field.clone(),
            institution: options.institution.clone(),
            patent_count: coerce_u64(cell(row, "cited_by_count")),
            authors: String::new(),
        })
        .collect();

    let years: HashMap<&str, i64> = papers
        .iter()
        .map(|p| (p.paper_id.as_str(), p.year))
        .collect();

    let mut authorships = Vec::new();
    for row in raw_authors {
        let institution = split_list(cell(row, "institutions"))
            .next()
            .unwrap_or(options.institution.as_str());
        for paper_id in split_list(cell(row, "paper_ids")) {
            if !years.contains_key(paper_id) {
                continue;
            }
            authorships.push(Authorship::new(
                paper_id,
                cell(row, "author_id"),
                cell(row, "author_name"),
                institution,
            ));
        }
    }

    let citations: Vec<Citation> = raw_citations
        .iter()
        .filter_map(|row| {
            let source = cell(row, "citing_paper_id");
            let target = cell(row, "cited_paper_id");
            let year = *years.get(source)?;
            years
                .contains_key(target)
                .then(|| Citation::new(source, target, year))
        })
        .collect();

    let mut embedded: IndexMap<&str, Vec<String>> = IndexMap::new();
    for row in &authorships {
        let token = format!("{}{AUTHOR_ID_SEPARATOR}{}", row.author_id, row.author_name);
        embedded
            .entry(row.paper_id.as_str())
            .or_default()
            .push(token);
    }
    for paper in &mut papers {
        if let Some(tokens) = embedded.get(paper.paper_id.as_str()) {
            paper.authors = tokens.join(&AUTHOR_SEPARATOR.to_string());
        }
    }

    ConvertedTables {
        papers,
        citations,
        authorships,
    }
}

fn write_error(path: &Path, e: csv::Error) -> PapernetError {
    PapernetError::Serialization(format!("{}: {e}", path.display()))
}

fn write_table<T: Serialize>(
    path: &Path,
    columns: &[&str],
    records: &[T],
) -> Result<(), PapernetError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| write_error(path, e))?;
    writer
        .write_record(columns)
        .map_err(|e| write_error(path, e))?;
    for record in records {
        writer.serialize(record).map_err(|e| write_error(path, e))?;
    }
    writer.flush()?;
    Ok(())
}

/// Convert the raw export in `input` and write normalized tables to `output`.
///
/// `papers.csv` is required in `input`; missing citations or authors
/// tables convert as empty.
pub fn convert_dir(
    input: &Path,
    output: &Path,
    options: &ConversionOptions,
) -> Result<ConversionReport, PapernetError> {
    let papers_path = input.join(format!("{PAPERS_TABLE}.csv"));
    if !papers_path.is_file() {
        return Err(PapernetError::MissingTable(papers_path.display().to_string()));
    }
    let optional = |name: &str| -> Result<Vec<Row>, PapernetError> {
        let path = input.join(format!("{name}.csv"));
        if path.is_file() {
            read_csv(&path)
        } else {
            Ok(Vec::new())
        }
    };

    let tables = convert_rows(
        &read_csv(&papers_path)?,
        &optional(CITATIONS_TABLE)?,
        &optional(RAW_AUTHORS_TABLE)?,
        options,
    );

    fs::create_dir_all(output)?;
    write_table(
        &output.join(format!("{PAPERS_TABLE}.csv")),
        &PAPER_COLUMNS,
        &tables.papers,
    )?;
    write_table(
        &output.join(format!("{CITATIONS_TABLE}.csv")),
        &CITATION_COLUMNS,
        &tables.citations,
    )?;
    write_table(
        &output.join(format!("{AUTHORSHIPS_TABLE}.csv")),
        &AUTHORSHIP_COLUMNS,
        &tables.authorships,
    )?;

    Ok(tables.report())
}
