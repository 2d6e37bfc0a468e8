//! 健康检查 API 集成测试

use axum::http::StatusCode;
use http_body_util::BodyExt;

mod common;
use common::{create_test_app, get, send};

#[tokio::test]
async fn test_health_endpoint() {
    // 健康检查不访问后端
    let app = create_test_app("http://127.0.0.1:1");

    let response = send(&app, get("/health", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert!(json["uptime_secs"].is_number());
}

#[tokio::test]
async fn test_trace_id_is_propagated() {
    let app = create_test_app("http://127.0.0.1:1");

    let request = axum::http::Request::builder()
        .uri("/health")
        .header("x-trace-id", "trace-abc")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(
        response.headers().get("x-trace-id").and_then(|v| v.to_str().ok()),
        Some("trace-abc")
    );
}

#[tokio::test]
async fn test_not_found_endpoint() {
    let app = create_test_app("http://127.0.0.1:1");

    let response = send(&app, get("/nonexistent", None)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
