//! # Primitives
//!
//! Fixed constants and the total numeric coercion used when normalizing
//! table rows. These are compiled in and immutable at runtime.

/// Node budget applied when a request does not name one.
pub const DEFAULT_LIMIT_NODES: usize = 500;

/// Default number of trailing years covered by the timeline view.
pub const DEFAULT_TIMELINE_YEARS: i64 = 10;

/// PageRank damping factor.
pub const PAGERANK_DAMPING: f64 = 0.85;

/// Upper bound on PageRank power iterations.
pub const PAGERANK_MAX_ITERATIONS: usize = 100;

/// Per-node PageRank convergence tolerance.
///
/// Iteration stops once the L1 change of the score vector drops below
/// `node_count * PAGERANK_TOLERANCE`.
pub const PAGERANK_TOLERANCE: f64 = 1.0e-6;

/// Score assigned to every node of an edgeless graph.
pub const EDGELESS_SCORE: f64 = 1.0;

/// Separator between authors in a paper's embedded `authors` column.
pub const AUTHOR_SEPARATOR: char = ';';

/// Separator between id and name within one embedded author token.
pub const AUTHOR_ID_SEPARATOR: char = '|';

// =============================================================================
// NUMERIC COERCION
// =============================================================================

/// Parse an integer column value, returning 0 for anything unparseable.
///
/// Accepts plain integers and float text (`"2020.0"`, as written by tools
/// that widen integer columns containing blanks); floats are truncated.
/// Blank, non-numeric, NaN and infinite inputs all yield 0.
#[must_use]
pub fn coerce_i64(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return v;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v as i64,
        _ => 0,
    }
}

/// Like [`coerce_i64`], for non-negative columns. Negative input yields 0.
#[must_use]
pub fn coerce_u64(raw: &str) -> u64 {
    u64::try_from(coerce_i64(raw)).unwrap_or(0)
}

/// Parse an optional query value leniently: blank or unparseable is `None`.
#[must_use]
pub fn parse_opt_i64(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok())
}
