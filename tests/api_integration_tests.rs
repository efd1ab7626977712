//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint, including how the
//! advisor cache behaves behind them.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use advisor_cache::{api::create_router, AppState, Config};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(cache_capacity: usize) -> Router {
    let config = Config {
        cache_capacity,
        ..Config::default()
    };
    create_router(AppState::from_config(&config).unwrap())
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_advisor(app: &Router, name: &str, sin: &str) -> Value {
    let (status, json) = send(
        app,
        "POST",
        "/api/advisors",
        Some(serde_json::json!({ "name": name, "sin": sin, "phone": "55501234" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json
}

async fn stats(app: &Router) -> Value {
    let (status, json) = send(app, "GET", "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    json
}

// == Create ==

#[tokio::test]
async fn test_create_advisor_success() {
    let app = create_test_app(5);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/advisors")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"name":"Advisor1","sin":"123456789"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()["location"], "/api/advisors/1");

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["name"], "Advisor1");
    let status = json["healthStatus"].as_str().unwrap();
    assert!(["Green", "Yellow", "Red"].contains(&status));
}

#[tokio::test]
async fn test_create_duplicate_sin_conflict() {
    let app = create_test_app(5);
    create_advisor(&app, "Advisor1", "123456789").await;

    let (status, json) = send(
        &app,
        "POST",
        "/api/advisors",
        Some(serde_json::json!({ "name": "Advisor2", "sin": "123456789" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "Advisor with this SIN already exists.");
}

#[tokio::test]
async fn test_create_invalid_sin() {
    let app = create_test_app(5);

    let (status, json) = send(
        &app,
        "POST",
        "/api/advisors",
        Some(serde_json::json!({ "name": "Advisor1", "sin": "123" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app(5);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/advisors")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"invalid json"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Axum returns 400 or 422 for JSON parsing errors
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

// == Read ==

#[tokio::test]
async fn test_list_advisors() {
    let app = create_test_app(5);
    create_advisor(&app, "Advisor1", "111111111").await;
    create_advisor(&app, "Advisor2", "222222222").await;

    let (status, json) = send(&app, "GET", "/api/advisors", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_advisor_served_from_cache() {
    let app = create_test_app(5);
    let created = create_advisor(&app, "Advisor1", "123456789").await;

    let (status, json) = send(&app, "GET", "/api/advisors/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, created);

    let stats = stats(&app).await;
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["misses"], 0);
}

#[tokio::test]
async fn test_get_advisor_not_found() {
    let app = create_test_app(5);

    let (status, json) = send(&app, "GET", "/api/advisors/42", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_evicted_advisor_reloaded_from_repository() {
    let app = create_test_app(2);
    create_advisor(&app, "Advisor1", "111111111").await;
    create_advisor(&app, "Advisor2", "222222222").await;
    create_advisor(&app, "Advisor3", "333333333").await;

    let before = stats(&app).await;
    assert_eq!(before["total_entries"], 2);
    assert_eq!(before["evictions"], 1);
    assert_eq!(before["capacity"], 2);

    // Advisor 1 was the least recently touched, so it is a miss now
    let (status, json) = send(&app, "GET", "/api/advisors/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Advisor1");

    let after = stats(&app).await;
    assert_eq!(after["misses"], 1);
    assert_eq!(after["evictions"], 2);
    assert_eq!(after["total_entries"], 2);
}

#[tokio::test]
async fn test_read_refreshes_recency() {
    let app = create_test_app(2);
    create_advisor(&app, "Advisor1", "111111111").await;
    create_advisor(&app, "Advisor2", "222222222").await;

    // Touch advisor 1 so advisor 2 becomes the eviction candidate
    send(&app, "GET", "/api/advisors/1", None).await;
    create_advisor(&app, "Advisor3", "333333333").await;

    send(&app, "GET", "/api/advisors/1", None).await;
    send(&app, "GET", "/api/advisors/2", None).await;

    let stats = stats(&app).await;
    assert_eq!(stats["hits"], 2);
    assert_eq!(stats["misses"], 1);
}

// == Update ==

#[tokio::test]
async fn test_update_advisor_refreshes_cached_copy() {
    let app = create_test_app(5);
    let mut advisor = create_advisor(&app, "Advisor1", "123456789").await;
    advisor["name"] = Value::from("Renamed");

    let (status, _) = send(&app, "PUT", "/api/advisors/1", Some(advisor)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = send(&app, "GET", "/api/advisors/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Renamed");
    assert_eq!(stats(&app).await["misses"], 0);
}

#[tokio::test]
async fn test_update_id_mismatch() {
    let app = create_test_app(5);
    let advisor = create_advisor(&app, "Advisor1", "123456789").await;

    let (status, _) = send(&app, "PUT", "/api/advisors/2", Some(advisor)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_missing_advisor() {
    let app = create_test_app(5);
    let ghost = serde_json::json!({ "id": 9, "name": "Ghost", "sin": "999999999" });

    let (status, _) = send(&app, "PUT", "/api/advisors/9", Some(ghost)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_to_taken_sin_conflict() {
    let app = create_test_app(5);
    create_advisor(&app, "Advisor1", "111111111").await;
    let mut second = create_advisor(&app, "Advisor2", "222222222").await;
    second["sin"] = Value::from("111111111");

    let (status, _) = send(&app, "PUT", "/api/advisors/2", Some(second)).await;

    assert_eq!(status, StatusCode::CONFLICT);
}

// == Delete ==

#[tokio::test]
async fn test_delete_advisor() {
    let app = create_test_app(5);
    create_advisor(&app, "Advisor1", "123456789").await;

    let (status, _) = send(&app, "DELETE", "/api/advisors/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/api/advisors/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/advisors/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(stats(&app).await["total_entries"], 0);
}

// == Health ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(5);

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}
