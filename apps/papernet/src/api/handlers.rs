//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Handlers never fail: bad parameters are normalized by the query types
//! and graph construction over the loaded store is total.

use super::{
    AppState,
    types::{
        CitationParams, CollaborationParams, GraphResponse, HealthResponse, HistogramParams,
        TimelineParams,
    },
};
use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use papernet_core::{
    AuthorNode, CitationGraphBuilder, CitationNode, CollaborationGraphBuilder, GraphOutcome,
    PatentHistogram, YearCount,
};

/// Log the shape of a built graph.
fn log_outcome<N>(view: &str, outcome: &GraphOutcome<N>) {
    match outcome.sampled_with {
        Some(strategy) => tracing::debug!(
            "{}: {} nodes, {} links (sampled from {} by {})",
            view,
            outcome.nodes.len(),
            outcome.links.len(),
            outcome.built_nodes,
            strategy
        ),
        None => tracing::debug!(
            "{}: {} nodes, {} links",
            view,
            outcome.nodes.len(),
            outcome.links.len()
        ),
    }
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// GRAPH HANDLERS
// =============================================================================

/// Citation network over filtered papers.
pub async fn citations_handler(
    State(state): State<AppState>,
    Query(params): Query<CitationParams>,
) -> Json<GraphResponse<CitationNode>> {
    let filter = params.filter();
    let builder = CitationGraphBuilder::new(params.limit_nodes(), params.sampling());
    tracing::debug!(
        ?filter,
        limit_nodes = builder.limit_nodes,
        sampling = %builder.sampling,
        "citations request"
    );

    let outcome = state.store.citation_network(&filter, builder);
    log_outcome("citations", &outcome);

    Json(GraphResponse {
        nodes: outcome.nodes,
        links: outcome.links,
    })
}

/// Co-authorship network over filtered papers. Always degree-sampled.
pub async fn collaborations_handler(
    State(state): State<AppState>,
    Query(params): Query<CollaborationParams>,
) -> Json<GraphResponse<AuthorNode>> {
    let filter = params.filter();
    let builder = CollaborationGraphBuilder::new(params.limit_nodes());
    tracing::debug!(?filter, limit_nodes = builder.limit_nodes, "collaborations request");

    let outcome = state.store.collaboration_network(&filter, builder);
    log_outcome("collaborations", &outcome);

    Json(GraphResponse {
        nodes: outcome.nodes,
        links: outcome.links,
    })
}

// =============================================================================
// AGGREGATION HANDLERS
// =============================================================================

/// Paper counts per year over the trailing window.
pub async fn timeline_handler(
    State(state): State<AppState>,
    Query(params): Query<TimelineParams>,
) -> Json<Vec<YearCount>> {
    let filter = params.filter();
    let years = params.years();
    tracing::debug!(?filter, years, "timeline request");
    Json(state.store.timeline(&filter, years))
}

/// Patent-count histogram, optionally for one year.
pub async fn patent_histogram_handler(
    State(state): State<AppState>,
    Query(params): Query<HistogramParams>,
) -> Json<PatentHistogram> {
    let filter = params.filter();
    let year = params.year();
    tracing::debug!(?filter, ?year, "patent histogram request");
    Json(state.store.patent_histogram(&filter, year))
}
