//! Cross-origin handling, fallback, health and documentation routes.
//!
//! Run with: `cargo test -p clipshelf-api --test routes_test`

mod helpers;

use axum::http::{header, Method, StatusCode};
use helpers::{api_path, setup_test_app, setup_test_app_with};
use serde_json::Value;

#[tokio::test]
async fn test_options_is_answered_everywhere() {
    let app = setup_test_app().await;

    for path in ["/api/videos", "/uploads/x.mp4", "/does/not/exist"] {
        let response = app.client().method(Method::OPTIONS, path).await;
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT, "{}", path);
        assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_METHODS),
            "GET,POST,OPTIONS"
        );
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_HEADERS),
            "Content-Type"
        );
        assert!(response.as_bytes().is_empty());
    }
}

#[tokio::test]
async fn test_preflight_echoes_requested_headers() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .method(Method::OPTIONS, "/api/videos")
        .add_header(header::ORIGIN, "http://localhost:5173")
        .add_header(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            "content-type,x-requested-with",
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_HEADERS),
        "content-type,x-requested-with"
    );
}

#[tokio::test]
async fn test_configured_origin_is_used() {
    let app = setup_test_app_with(&[("CORS_ALLOW_ORIGIN", "https://videos.example.com")]).await;

    let response = app.client().get(&api_path("/videos")).await;
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        "https://videos.example.com"
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found_with_cors() {
    let app = setup_test_app().await;

    for response in [
        app.client().get("/nope").await,
        app.client().delete(&api_path("/videos")).await,
        app.client().get("/uploads").await,
    ] {
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
        let body: Value = response.json();
        assert_eq!(body["message"], "Not found");
    }
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&api_path("/videos"))
        .add_header("x-request-id", "req-123")
        .await;
    assert_eq!(response.header("x-request-id"), "req-123");

    let generated = app.client().get(&api_path("/videos")).await;
    assert!(!generated.header("x-request-id").is_empty());
}

#[tokio::test]
async fn test_health_and_liveness() {
    let app = setup_test_app().await;

    let health = app.client().get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);
    let body: Value = health.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "local");
    assert_eq!(body["metadata"], "healthy");

    let live: Value = app.client().get("/live").await.json();
    assert_eq!(live["status"], "alive");
}

#[tokio::test]
async fn test_health_reports_unconfigured_storage() {
    let app = setup_test_app_with(&[("REMOTE_STORAGE_SAS_URL", "::not-a-url::")]).await;

    let body: Value = app.client().get("/health").await.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["storage"], "not_configured");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/openapi.json")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["paths"].get("/api/videos").is_some());
}

#[tokio::test]
async fn test_error_details_follow_configured_environment() {
    let development = setup_test_app().await;
    let production = setup_test_app_with(&[("ENVIRONMENT", "production")]).await;

    for (app, expose) in [(&development, true), (&production, false)] {
        let response = app
            .client()
            .post(&api_path("/videos"))
            .content_type("application/json")
            .bytes(bytes::Bytes::from_static(b"{not json"))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "PARSE_ERROR");
        assert_eq!(body.get("details").is_some(), expose);
        assert_eq!(body.get("errorType").is_some(), expose);
    }
}
