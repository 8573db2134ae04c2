mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{body_json, body_text, complete_request, TestApp};
use interview_service::config::HandlerProfile;
use interview_service::services::providers::mock::MockTextProvider;
use interview_service::services::{init_metrics, MemoryStore};

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::new(MockTextProvider::new());

    let response = app.send(get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "interview-service");
}

#[tokio::test]
async fn health_check_reports_unhealthy_store() {
    let app = TestApp::with_parts(
        MockTextProvider::new(),
        MemoryStore::failing("no primary"),
        HandlerProfile::default(),
    );

    let response = app.send(get("/health")).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["status"], "unhealthy");

    let response = app.send(get("/ready")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn readiness_check_returns_ok() {
    let app = TestApp::new(MockTextProvider::new());

    let response = app.send(get("/ready")).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn metrics_expose_generation_counters() {
    init_metrics();
    let app = TestApp::new(MockTextProvider::new());

    let response = app.post_json(&complete_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.send(get("/metrics")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = body_text(response).await;
    assert!(text.contains("interviews_generated_total"));
    assert!(text.contains("http_requests_total"));
    assert!(text.contains("route=\"/api/vapi/generate\""));
}
