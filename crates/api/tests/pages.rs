//! Integration tests for the page endpoints and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_string, build_test_app, get, ok_body, test_config};

// ---------------------------------------------------------------------------
// Test: GET / serves the landing page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn landing_page_is_served_at_root() {
    let app = build_test_app(test_config());
    let body = ok_body(app, "/").await;

    assert!(body.contains("Galaxy SQL Tour"));
    assert!(body.contains("href=\"/databasetest\""));
}

// ---------------------------------------------------------------------------
// Test: GET /databasetest renders the full trace on success
// ---------------------------------------------------------------------------

#[tokio::test]
async fn database_test_renders_full_trace() {
    let app = build_test_app(test_config());
    let body = ok_body(app, "/databasetest").await;

    // The rendered page preserves trace order: connection banner first,
    // drops near the end, no error entry anywhere.
    let connected = body.find("Connected to sqlite::memory:").unwrap();
    let created = body.find("Create a table named: cities").unwrap();
    let dropped = body.find("Drop table: country").unwrap();
    let complete = body.find("Complete!").unwrap();
    assert!(connected < created && created < dropped && dropped < complete);

    assert!(body.contains("SQL: select * from cities"));
    assert!(body.contains("Result: ["));
    assert!(!body.contains("ERROR:"));
}

// ---------------------------------------------------------------------------
// Test: GET /databasetest reports a missing endpoint as an error trace
// ---------------------------------------------------------------------------

#[tokio::test]
async fn database_test_reports_missing_endpoint() {
    let mut config = test_config();
    config.database_url = None;

    // Still HTTP 200: the error is an annotated trace entry, rendered
    // through the same view as a successful run.
    let app = build_test_app(config);
    let body = ok_body(app, "/databasetest").await;

    assert!(body.contains("ERROR: no database endpoint configured"));
}

// ---------------------------------------------------------------------------
// Test: GET /databasetest reports a malformed credential document
// ---------------------------------------------------------------------------

#[tokio::test]
async fn database_test_reports_malformed_credential_document() {
    let mut config = test_config();
    config.database_url = None;
    config.vcap_services = Some("{not json".to_string());

    let app = build_test_app(config);
    let body = ok_body(app, "/databasetest").await;

    assert!(body.contains("ERROR: malformed service credential document"));
}

// ---------------------------------------------------------------------------
// Test: GET /health returns service status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = build_test_app(test_config());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

// ---------------------------------------------------------------------------
// Test: unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app(test_config());
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in responses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = build_test_app(test_config());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );

    // The value should be a UUID string (36 chars with hyphens).
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID string");
}
