//! # API Request/Response Types
//!
//! This module defines the query-string and JSON structures for the HTTP API.
//!
//! Every query field is an optional raw string and is interpreted leniently,
//! so a malformed parameter never rejects a request.

use papernet_core::{
    Link, PaperFilter, SamplingStrategy,
    primitives::{DEFAULT_LIMIT_NODES, DEFAULT_TIMELINE_YEARS, parse_opt_i64},
};
use serde::{Deserialize, Serialize};

/// Non-blank parameter value.
fn present(raw: Option<&String>) -> Option<String> {
    raw.filter(|s| !s.is_empty()).cloned()
}

fn filter_from(
    university: Option<&String>,
    field: Option<&String>,
    since: Option<&String>,
) -> PaperFilter {
    PaperFilter::new(
        present(university),
        present(field),
        parse_opt_i64(since.map(String::as_str)),
    )
}

/// Node budget from a raw parameter: absent or unparseable means the
/// default, negative means zero.
fn limit_from(raw: Option<&String>) -> usize {
    parse_opt_i64(raw.map(String::as_str))
        .map_or(DEFAULT_LIMIT_NODES, |n| usize::try_from(n).unwrap_or(0))
}

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// GRAPH RESPONSE
// =============================================================================

/// Node-link graph as consumed by the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphResponse<N> {
    pub nodes: Vec<N>,
    pub links: Vec<Link>,
}

// =============================================================================
// QUERY PARAMETERS
// =============================================================================

/// `GET /api/citations` parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationParams {
    pub university: Option<String>,
    pub field: Option<String>,
    pub since: Option<String>,
    pub limit_nodes: Option<String>,
    pub sampling: Option<String>,
}

impl CitationParams {
    #[must_use]
    pub fn filter(&self) -> PaperFilter {
        filter_from(
            self.university.as_ref(),
            self.field.as_ref(),
            self.since.as_ref(),
        )
    }

    #[must_use]
    pub fn limit_nodes(&self) -> usize {
        limit_from(self.limit_nodes.as_ref())
    }

    /// Sampling strategy; a blank value counts as absent.
    #[must_use]
    pub fn sampling(&self) -> SamplingStrategy {
        SamplingStrategy::from_param(present(self.sampling.as_ref()).as_deref())
    }
}

/// `GET /api/collaborations` parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollaborationParams {
    pub university: Option<String>,
    pub field: Option<String>,
    pub since: Option<String>,
    pub limit_nodes: Option<String>,
}

impl CollaborationParams {
    #[must_use]
    pub fn filter(&self) -> PaperFilter {
        filter_from(
            self.university.as_ref(),
            self.field.as_ref(),
            self.since.as_ref(),
        )
    }

    #[must_use]
    pub fn limit_nodes(&self) -> usize {
        limit_from(self.limit_nodes.as_ref())
    }
}

/// `GET /api/timeline` parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineParams {
    pub university: Option<String>,
    pub field: Option<String>,
    pub years: Option<String>,
}

impl TimelineParams {
    #[must_use]
    pub fn filter(&self) -> PaperFilter {
        filter_from(self.university.as_ref(), self.field.as_ref(), None)
    }

    #[must_use]
    pub fn years(&self) -> i64 {
        parse_opt_i64(self.years.as_deref()).unwrap_or(DEFAULT_TIMELINE_YEARS)
    }
}

/// `GET /api/patent_histogram` parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistogramParams {
    pub university: Option<String>,
    pub field: Option<String>,
    pub year: Option<String>,
}

impl HistogramParams {
    #[must_use]
    pub fn filter(&self) -> PaperFilter {
        filter_from(self.university.as_ref(), self.field.as_ref(), None)
    }

    #[must_use]
    pub fn year(&self) -> Option<i64> {
        parse_opt_i64(self.year.as_deref())
    }
}
