//! # Record Store
//!
//! The immutable, process-wide snapshot of the three input tables, and the
//! request-level operations that run against it.
//!
//! The store is built once at startup and only ever read afterwards, so it
//! can be shared across threads behind an `Arc` without locking. Every
//! request operation borrows the tables, builds transient structures, and
//! returns owned output.

use crate::aggregate::{PatentHistogram, YearCount, patent_histogram, timeline};
use crate::citation::CitationGraphBuilder;
use crate::collaboration::CollaborationGraphBuilder;
use crate::filter::PaperFilter;
use crate::formats::{Row, TableFormat, read_table};
use crate::primitives::{coerce_i64, coerce_u64};
use crate::{AuthorNode, Authorship, Citation, CitationNode, GraphOutcome, Paper, PapernetError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Table names, used both for file lookup and error messages.
pub const PAPERS_TABLE: &str = "papers";
pub const CITATIONS_TABLE: &str = "citations";
pub const AUTHORSHIPS_TABLE: &str = "authorships";

// =============================================================================
// DATA SOURCES
// =============================================================================

/// Where the tables are read from.
///
/// An explicit path wins; otherwise `<data_dir>/<table>.parquet` and then
/// `<data_dir>/<table>.csv` are tried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSources {
    pub data_dir: PathBuf,
    pub papers: Option<PathBuf>,
    pub citations: Option<PathBuf>,
    pub authorships: Option<PathBuf>,
}

impl DataSources {
    /// Look up all three tables in a single directory.
    #[must_use]
    pub fn from_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Resolve the file for a table, if one exists.
    #[must_use]
    pub fn locate(&self, table: &str, explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        let dir = &self.data_dir;
        TableFormat::LOOKUP_ORDER
            .iter()
            .map(|format| dir.join(format!("{table}.{}", format.extension())))
            .find(|candidate| candidate.is_file())
    }
}

// =============================================================================
// ROW NORMALIZATION
// =============================================================================

fn text(row: &Row, column: &str) -> String {
    row.get(column).cloned().unwrap_or_default()
}

fn int(row: &Row, column: &str) -> i64 {
    row.get(column).map_or(0, |v| coerce_i64(v))
}

fn count(row: &Row, column: &str) -> u64 {
    row.get(column).map_or(0, |v| coerce_u64(v))
}

impl From<&Row> for Paper {
    fn from(row: &Row) -> Self {
        Self {
            paper_id: text(row, "paper_id"),
            title: text(row, "title"),
            year: int(row, "year"),
            field: text(row, "field"),
            institution: text(row, "institution"),
            patent_count: count(row, "patent_count"),
            authors: text(row, "authors"),
        }
    }
}

impl From<&Row> for Citation {
    fn from(row: &Row) -> Self {
        Self {
            source: text(row, "source"),
            target: text(row, "target"),
            year: int(row, "year"),
        }
    }
}

impl From<&Row> for Authorship {
    fn from(row: &Row) -> Self {
        Self {
            paper_id: text(row, "paper_id"),
            author_id: text(row, "author_id"),
            author_name: text(row, "author_name"),
            institution: text(row, "institution"),
        }
    }
}

fn load_records<T>(path: &Path) -> Result<Vec<T>, PapernetError>
where
    for<'r> T: From<&'r Row>,
{
    Ok(read_table(path)?.iter().map(T::from).collect())
}

// =============================================================================
// RECORD STORE
// =============================================================================

/// Table sizes and year span, for status output and startup logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSummary {
    pub papers: usize,
    pub citations: usize,
    /// `None` when no authorships table was loaded.
    pub authorships: Option<usize>,
    pub min_year: Option<i64>,
    pub max_year: Option<i64>,
}

/// Immutable in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    papers: Vec<Paper>,
    citations: Vec<Citation>,
    authorships: Option<Vec<Authorship>>,
}

impl RecordStore {
    #[must_use]
    pub fn new(
        papers: Vec<Paper>,
        citations: Vec<Citation>,
        authorships: Option<Vec<Authorship>>,
    ) -> Self {
        Self {
            papers,
            citations,
            authorships,
        }
    }

    /// Load all tables.
    ///
    /// The papers table is required; a missing citations table loads as
    /// empty and a missing authorships table as `None`.
    pub fn load(sources: &DataSources) -> Result<Self, PapernetError> {
        let papers_path = sources
            .locate(PAPERS_TABLE, sources.papers.as_deref())
            .ok_or_else(|| {
                PapernetError::MissingTable(format!(
                    "{PAPERS_TABLE}.(csv|parquet) in {}",
                    sources.data_dir.display()
                ))
            })?;
        let papers = load_records(&papers_path)?;

        let citations = match sources.locate(CITATIONS_TABLE, sources.citations.as_deref()) {
            Some(path) => load_records(&path)?,
            None => Vec::new(),
        };

        let authorships = sources
            .locate(AUTHORSHIPS_TABLE, sources.authorships.as_deref())
            .map(|path| load_records(&path))
            .transpose()?;

        Ok(Self::new(papers, citations, authorships))
    }

    #[must_use]
    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    #[must_use]
    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }

    #[must_use]
    pub fn authorships(&self) -> Option<&[Authorship]> {
        self.authorships.as_deref()
    }

    #[must_use]
    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            papers: self.papers.len(),
            citations: self.citations.len(),
            authorships: self.authorships.as_ref().map(Vec::len),
            min_year: self.papers.iter().map(|p| p.year).min(),
            max_year: self.papers.iter().map(|p| p.year).max(),
        }
    }

    // =========================================================================
    // REQUEST OPERATIONS
    // =========================================================================

    /// Citation network over filtered papers.
    ///
    /// An empty citations table yields an empty graph, even when papers match.
    #[must_use]
    pub fn citation_network(
        &self,
        filter: &PaperFilter,
        builder: CitationGraphBuilder,
    ) -> GraphOutcome<CitationNode> {
        if self.citations.is_empty() {
            return GraphOutcome::empty();
        }
        builder.build(&filter.apply(&self.papers), &self.citations)
    }

    /// Co-authorship network over filtered papers.
    #[must_use]
    pub fn collaboration_network(
        &self,
        filter: &PaperFilter,
        builder: CollaborationGraphBuilder,
    ) -> GraphOutcome<AuthorNode> {
        builder.build(&filter.apply(&self.papers), self.authorships())
    }

    #[must_use]
    pub fn timeline(&self, filter: &PaperFilter, years: i64) -> Vec<YearCount> {
        timeline(&self.papers, filter, years)
    }

    #[must_use]
    pub fn patent_histogram(&self, filter: &PaperFilter, year: Option<i64>) -> PatentHistogram {
        patent_histogram(&self.papers, filter, year)
    }
}
