//! # Core Type Definitions
//!
//! This module contains the typed records and output rows shared by every
//! papernet component:
//! - Table records (`Paper`, `Citation`, `Authorship`)
//! - Edge weights (`EdgeWeight`)
//! - Flat graph output rows (`CitationNode`, `AuthorNode`, `Link`)
//! - Build outcomes (`GraphOutcome`)
//! - Error types (`PapernetError`)
//!
//! ## Normalization Guarantees
//!
//! Records are normalized once, at load time:
//! - Numeric columns are coerced with `primitives::coerce_i64` (bad input is 0)
//! - Missing text columns are the empty string, never `Option`
//! - Records are never mutated after the store is built

use crate::sampling::SamplingStrategy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// TABLE RECORDS
// =============================================================================

/// One row of the Papers table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Paper {
    pub paper_id: String,
    pub title: String,
    pub year: i64,
    pub field: String,
    pub institution: String,
    pub patent_count: u64,
    /// Embedded author list: `;`-separated `author_id|author_name` pairs.
    pub authors: String,
}

impl Paper {
    /// Create a paper with the given id and year; other columns empty.
    #[must_use]
    pub fn new(paper_id: impl Into<String>, year: i64) -> Self {
        Self {
            paper_id: paper_id.into(),
            year,
            ..Self::default()
        }
    }
}

/// One row of the Citations table: `source` cites `target`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Citation {
    pub source: String,
    pub target: String,
    pub year: i64,
}

impl Citation {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>, year: i64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            year,
        }
    }
}

/// One row of the optional Authorships table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Authorship {
    pub paper_id: String,
    pub author_id: String,
    pub author_name: String,
    pub institution: String,
}

impl Authorship {
    #[must_use]
    pub fn new(
        paper_id: impl Into<String>,
        author_id: impl Into<String>,
        author_name: impl Into<String>,
        institution: impl Into<String>,
    ) -> Self {
        Self {
            paper_id: paper_id.into(),
            author_id: author_id.into(),
            author_name: author_name.into(),
            institution: institution.into(),
        }
    }
}

// =============================================================================
// EDGE WEIGHT
// =============================================================================

/// Number of relation rows collapsed into one edge.
/// Uses saturating arithmetic; a stored edge always has weight >= 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct EdgeWeight(pub u64);

impl EdgeWeight {
    /// Weight of a freshly created edge.
    pub const ONE: Self = Self(1);

    #[must_use]
    pub const fn new(weight: u64) -> Self {
        Self(weight)
    }

    /// Increment the edge weight by 1 using saturating arithmetic.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Get the raw weight value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

// =============================================================================
// GRAPH OUTPUT ROWS
// =============================================================================

/// A paper node in the citation view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationNode {
    pub id: String,
    pub label: String,
    pub year: i64,
    pub patent_count: u64,
    /// In-degree + out-degree in the returned graph.
    pub degree: usize,
}

/// An author node in the collaboration view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorNode {
    pub id: String,
    pub name: String,
    pub affiliation: String,
    pub degree: usize,
}

/// A weighted edge between two returned nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub weight: u64,
}

impl Link {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: u64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

/// The flattened result of building (and possibly sampling) a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphOutcome<N> {
    pub nodes: Vec<N>,
    pub links: Vec<Link>,
    /// Node count before sampling.
    pub built_nodes: usize,
    /// Strategy applied, or `None` when the graph fit the budget.
    pub sampled_with: Option<SamplingStrategy>,
}

impl<N> GraphOutcome<N> {
    /// An outcome with no nodes and no links.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            built_nodes: 0,
            sampled_with: None,
        }
    }

    #[must_use]
    pub fn was_sampled(&self) -> bool {
        self.sampled_with.is_some()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while loading or converting tables.
///
/// Graph construction itself is total and never returns these.
#[derive(Debug, Error)]
pub enum PapernetError {
    /// A required table was not found.
    #[error("Missing required table: {0}")]
    MissingTable(String),

    /// A table file has an extension no reader handles.
    #[error("Unsupported file type for: {0}")]
    UnsupportedFormat(String),

    /// A table file exists but could not be decoded.
    #[error("Failed to read table {path}: {reason}")]
    TableRead { path: String, reason: String },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Output could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for PapernetError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_weight_saturating_increment() {
        let weight = EdgeWeight::new(u64::MAX);
        assert_eq!(weight.increment().value(), u64::MAX);
    }

    #[test]
    fn edge_weight_normal_increment() {
        assert_eq!(EdgeWeight::ONE.increment().value(), 2);
    }

    #[test]
    fn empty_outcome_is_not_sampled() {
        let outcome: GraphOutcome<AuthorNode> = GraphOutcome::empty();
        assert!(outcome.nodes.is_empty());
        assert!(outcome.links.is_empty());
        assert!(!outcome.was_sampled());
    }

    #[test]
    fn unsupported_format_message_names_path() {
        let err = PapernetError::UnsupportedFormat("data/papers.xlsx".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported file type for: data/papers.xlsx"
        );
    }
}
