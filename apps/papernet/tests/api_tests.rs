//! Integration tests for the papernet HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::StatusCode;
use axum_test::TestServer;
use papernet::api::{AppState, HealthResponse, create_router};
use papernet::config::ServerConfig;
use papernet_core::{Authorship, Citation, Paper, RecordStore};
use serde_json::{Value, json};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn paper(id: &str, year: i64, institution: &str, authors: &str, patents: u64) -> Paper {
    Paper {
        title: format!("Paper {id}"),
        field: "Computer Science".to_string(),
        institution: institution.to_string(),
        authors: authors.to_string(),
        patent_count: patents,
        ..Paper::new(id, year)
    }
}

/// Test configuration with rate limiting disabled.
fn test_config() -> ServerConfig {
    ServerConfig {
        rate_limit: 0,
        ..ServerConfig::default()
    }
}

fn server_for(store: RecordStore) -> TestServer {
    TestServer::new(create_router(AppState::new(store), &test_config())).unwrap()
}

/// p1 (MIT, 2020) cites p2 (MIT, 2021); p3 is at Stanford.
fn demo_store() -> RecordStore {
    RecordStore::new(
        vec![
            paper("p1", 2020, "MIT", "a1|Alice;a2|Bob", 3),
            paper("p2", 2021, "MIT", "a2|Bob;a3|Carol", 0),
            paper("p3", 2019, "Stanford", "a4|Dan", 9),
        ],
        vec![Citation::new("p1", "p2", 2020)],
        None,
    )
}

fn demo_server() -> TestServer {
    server_for(demo_store())
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = demo_server();

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

// =============================================================================
// CITATIONS ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_citations_mit() {
    let server = demo_server();

    let response = server
        .get("/api/citations")
        .add_query_param("university", "MIT")
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "nodes": [
            {"id": "p1", "label": "Paper p1", "year": 2020, "patent_count": 3, "degree": 1},
            {"id": "p2", "label": "Paper p2", "year": 2021, "patent_count": 0, "degree": 1}
        ],
        "links": [
            {"source": "p1", "target": "p2", "weight": 1}
        ]
    }));
}

#[tokio::test]
async fn test_citations_respects_limit_nodes() {
    let server = demo_server();

    let response = server
        .get("/api/citations")
        .add_query_param("limit_nodes", "1")
        .add_query_param("sampling", "pagerank")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["nodes"].as_array().unwrap().len(), 1);
    // p2 is the only cited paper, so it ranks first
    assert_eq!(body["nodes"][0]["id"], "p2");
    assert!(body["links"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_citations_bad_parameters_are_lenient() {
    let server = demo_server();

    let response = server
        .get("/api/citations")
        .add_query_param("limit_nodes", "lots")
        .add_query_param("since", "recently")
        .add_query_param("sampling", "random")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["nodes"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_citations_negative_limit_is_empty() {
    let server = demo_server();

    let response = server
        .get("/api/citations")
        .add_query_param("limit_nodes", "-5")
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({"nodes": [], "links": []}));
}

#[tokio::test]
async fn test_citations_empty_table_gives_empty_graph() {
    let store = RecordStore::new(vec![paper("p1", 2020, "MIT", "", 0)], Vec::new(), None);
    let server = server_for(store);

    let response = server.get("/api/citations").await;

    response.assert_status_ok();
    response.assert_json(&json!({"nodes": [], "links": []}));
}

// =============================================================================
// COLLABORATIONS ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_collaborations_mit() {
    let server = demo_server();

    let response = server
        .get("/api/collaborations")
        .add_query_param("university", "mit")
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "nodes": [
            {"id": "a1", "name": "Alice", "affiliation": "MIT", "degree": 1},
            {"id": "a2", "name": "Bob", "affiliation": "MIT", "degree": 2},
            {"id": "a3", "name": "Carol", "affiliation": "MIT", "degree": 1}
        ],
        "links": [
            {"source": "a1", "target": "a2", "weight": 1},
            {"source": "a2", "target": "a3", "weight": 1}
        ]
    }));
}

#[tokio::test]
async fn test_collaborations_use_authorships_table() {
    let store = RecordStore::new(
        vec![paper("p1", 2020, "MIT", "x|Ignored;y|Ignored", 0)],
        Vec::new(),
        Some(vec![
            Authorship::new("p1", "a1", "Alice", "MIT"),
            Authorship::new("p1", "a2", "Bob", "Harvard"),
        ]),
    );
    let server = server_for(store);

    let response = server.get("/api/collaborations").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["nodes"][1]["affiliation"], "Harvard");
    assert_eq!(
        body["links"],
        json!([{"source": "a1", "target": "a2", "weight": 1}])
    );
}

#[tokio::test]
async fn test_collaborations_ignore_sampling_parameter() {
    let server = demo_server();

    let response = server
        .get("/api/collaborations")
        .add_query_param("limit_nodes", "1")
        .add_query_param("sampling", "truncate")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    // Degree ranking keeps Bob (degree 2), not the first author in order
    assert_eq!(body["nodes"][0]["id"], "a2");
}

// =============================================================================
// AGGREGATION ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_timeline_default_window() {
    let server = demo_server();

    let response = server.get("/api/timeline").await;

    response.assert_status_ok();
    response.assert_json(&json!([
        {"year": 2019, "count": 1},
        {"year": 2020, "count": 1},
        {"year": 2021, "count": 1}
    ]));
}

#[tokio::test]
async fn test_timeline_years_parameter() {
    let server = demo_server();

    let response = server
        .get("/api/timeline")
        .add_query_param("university", "MIT")
        .add_query_param("years", "1")
        .await;

    response.assert_status_ok();
    response.assert_json(&json!([{"year": 2021, "count": 1}]));
}

#[tokio::test]
async fn test_patent_histogram_for_year() {
    let server = demo_server();

    let response = server
        .get("/api/patent_histogram")
        .add_query_param("year", "2020")
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "raw": [3],
        "bins": {"0": 0, "1": 0, "2-3": 1, "4-7": 0, "8+": 0}
    }));
}

#[tokio::test]
async fn test_patent_histogram_all_years() {
    let server = demo_server();

    let response = server.get("/api/patent_histogram").await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "raw": [3, 0, 9],
        "bins": {"0": 1, "1": 0, "2-3": 1, "4-7": 0, "8+": 1}
    }));
}

// =============================================================================
// ROUTING AND MIDDLEWARE TESTS
// =============================================================================

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = demo_server();

    let response = server.get("/api/nothing").expect_failure().await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rate_limit_returns_429() {
    let config = ServerConfig {
        rate_limit: 1,
        ..ServerConfig::default()
    };
    let server = TestServer::new(create_router(AppState::new(demo_store()), &config)).unwrap();

    server.get("/api/health").await.assert_status_ok();
    let response = server.get("/api/health").expect_failure().await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let server = demo_server();

    let response = server
        .get("/api/health")
        .add_header("origin", "http://dashboard.example.org")
        .await;

    response.assert_status_ok();
    response.assert_header("access-control-allow-origin", "*");
}

#[tokio::test]
async fn test_cors_origin_list_is_honored() {
    let config = ServerConfig {
        cors_origins: Some("http://localhost:5173".to_string()),
        ..test_config()
    };
    let server = TestServer::new(create_router(AppState::new(demo_store()), &config)).unwrap();

    let response = server
        .get("/api/health")
        .add_header("origin", "http://localhost:5173")
        .await;

    response.assert_status_ok();
    response.assert_header("access-control-allow-origin", "http://localhost:5173");
}
