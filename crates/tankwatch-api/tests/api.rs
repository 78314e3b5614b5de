//! End-to-end tests of the HTTP surface over an in-memory store.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tankwatch_analysis::Dashboard;
use tankwatch_api::{AppState, routes};
use tankwatch_core::EncroachmentRecord;
use tankwatch_storage::MemoryStore;
use tower::ServiceExt;

fn app() -> Router {
    app_with_static(Path::new("/nonexistent-static-dir"))
}

fn app_with_static(dir: &Path) -> Router {
    routes::app(AppState::new(Arc::new(MemoryStore::new())), dir)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::post("/api/encroachments")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    send(app, request).await
}

async fn post_report(app: &Router, tank: &str, kind: &str, observed: &str) -> Value {
    let (status, body) = post(
        app,
        json!({
            "tankName": tank,
            "location": "bund",
            "encroachmentType": kind,
            "observationDate": observed,
        })
        .to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn test_create_returns_stored_record() {
    let app = app();
    let (status, body) = post(
        &app,
        json!({
            "tankName": "Maha Wewa",
            "location": "East bund",
            "encroachmentType": "Structure",
            "observationDate": "2023-04-02",
            "description": "Concrete wall",
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["tankName"], "Maha Wewa");
    assert_eq!(body["observationDate"], "2023-04-02");
    assert_eq!(body["description"], "Concrete wall");
    assert!(body["id"].is_string());
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn test_create_missing_field_is_400() {
    let app = app();
    let (status, body) = post(
        &app,
        json!({
            "tankName": "T1",
            "encroachmentType": "Fence",
            "observationDate": "2023-01-10",
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Error saving to database");
    assert_eq!(body["fields"][0]["field"], "location");

    let (_, listed) = get(&app, "/api/encroachments").await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_create_unparsable_date_is_400() {
    let app = app();
    let (status, body) = post(
        &app,
        json!({
            "tankName": "T1",
            "location": "bund",
            "encroachmentType": "Fence",
            "observationDate": "last tuesday",
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "observationDate");
}

#[tokio::test]
async fn test_create_malformed_json_is_400() {
    let (status, body) = post(&app(), "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Error saving to database");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_filters_and_orders() {
    let app = app();
    let a = post_report(&app, "T1", "Fence", "2023-01-10").await;
    let b = post_report(&app, "T1", "Fence", "2023-02-15").await;
    post_report(&app, "T2", "Structure", "2023-01-20").await;

    let (status, t1) = get(&app, "/api/encroachments?tankName=T1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(t1, json!([b, a.clone()]));

    let (_, january) = get(&app, "/api/encroachments?tankName=T1&year=2023&month=1").await;
    assert_eq!(january, json!([a]));

    let (_, all) = get(&app, "/api/encroachments").await;
    let dates: Vec<_> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["observationDate"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(dates, vec!["2023-02-15", "2023-01-20", "2023-01-10"]);

    let (_, unknown) = get(&app, "/api/encroachments?tankName=T3").await;
    assert_eq!(unknown, json!([]));
}

#[tokio::test]
async fn test_list_ignores_empty_tank_and_lonely_month() {
    let app = app();
    post_report(&app, "T1", "Fence", "2022-05-10").await;
    post_report(&app, "T2", "Fence", "2023-06-10").await;

    let (_, all) = get(&app, "/api/encroachments?tankName=&month=5").await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, year) = get(&app, "/api/encroachments?year=2023").await;
    assert_eq!(year.as_array().unwrap().len(), 1);
    assert_eq!(year[0]["tankName"], "T2");
}

#[tokio::test]
async fn test_list_invalid_query_is_400() {
    let app = app();
    for uri in [
        "/api/encroachments?year=abc",
        "/api/encroachments?year=2023&month=13",
        "/api/encroachments?year=2023&month=0",
        "/api/encroachments?year=10000",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["msg"], "Invalid query parameters");
    }
}

#[tokio::test]
async fn test_health_reports_count() {
    let app = app();
    post_report(&app, "T1", "Fence", "2023-01-10").await;

    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "tankwatch");
    assert_eq!(body["records"], 1);
}

#[tokio::test]
async fn test_static_pages_served_outside_api() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Tankwatch</h1>").unwrap();
    let app = app_with_static(dir.path());

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("<h1>Tankwatch</h1>".to_string()));

    let (status, _) = get(&app, "/missing.html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let request = Request::get("/api/encroachments")
        .header(header::ORIGIN, "http://example.org")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_dashboard_over_listed_reports() {
    let app = app();
    post_report(&app, "T1", "Fence", "2023-01-10").await;
    post_report(&app, "T1", "Fence", "2023-02-15").await;
    post_report(&app, "T2", "Structure", "2023-01-20").await;

    let (_, listed) = get(&app, "/api/encroachments?tankName=T1").await;
    let records: Vec<EncroachmentRecord> = serde_json::from_value(listed).unwrap();
    let view = Dashboard::new("T1", records).view();

    let summary = view.summary.unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.most_common_type, "Fence");
    assert_eq!(summary.earliest.to_string(), "2023-01-10");
    assert_eq!(summary.latest.to_string(), "2023-02-15");
    assert_eq!(view.time_series.len(), 2);
    assert_eq!(view.breakdown[0].percentage, 100.0);
}
