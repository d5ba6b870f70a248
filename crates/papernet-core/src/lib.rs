//! # papernet-core
//!
//! The graph construction and sampling engine for papernet - THE LOGIC.
//!
//! This crate turns three tables (Papers, Citations, Authorships) into
//! bounded-size weighted graphs for a visualization frontend:
//! - a directed citation network between papers
//! - an undirected co-authorship network between authors
//!
//! plus two graph-free aggregations (publication timeline and patent
//! histogram).
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: NO async, NO network dependencies, NO logging
//! - Deterministic: identical tables and parameters always yield identical
//!   node and edge order
//! - Read-only: the [`RecordStore`] is built once and never mutated; every
//!   request works on transient graphs it owns
//! - Total: once tables are loaded, no operation fails

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregate;
pub mod citation;
pub mod collaboration;
pub mod convert;
pub mod filter;
pub mod formats;
pub mod graph;
pub mod pagerank;
pub mod primitives;
pub mod sampling;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    AuthorNode, Authorship, Citation, CitationNode, EdgeWeight, GraphOutcome, Link, Paper,
    PapernetError,
};

// =============================================================================
// RE-EXPORTS: Graph Engine
// =============================================================================

pub use aggregate::{HistogramBins, PatentHistogram, YearCount, patent_histogram, timeline};
pub use citation::CitationGraphBuilder;
pub use collaboration::{AuthorSource, CollaborationGraphBuilder, parse_embedded_authors};
pub use filter::PaperFilter;
pub use graph::{Direction, Graph};
pub use pagerank::{PageRankOutcome, pagerank};
pub use sampling::{SamplingStrategy, enforce_limit, sample};

// =============================================================================
// RE-EXPORTS: Loading and Conversion
// =============================================================================

pub use convert::{ConversionOptions, ConversionReport, convert_dir};
pub use formats::{Row, TableFormat, read_table};
pub use store::{DataSources, RecordStore, StoreSummary};
