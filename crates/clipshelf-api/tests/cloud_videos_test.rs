//! Cloud library proxy integration tests.
//!
//! Run with: `cargo test -p clipshelf-api --test cloud_videos_test`

mod helpers;

use axum::http::StatusCode;
use helpers::{api_path, setup_test_app, setup_test_app_with};
use serde_json::Value;

#[tokio::test]
async fn test_cloud_videos_not_configured() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/cloud-videos")).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cloud_videos_are_summarized() {
    let mut cloud = mockito::Server::new_async().await;
    let mock = cloud
        .mock("GET", "/api/videos")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"Name":"Launch.mov","ContentType":"video/quicktime","Size":1536},
                {"Name":".hidden","ContentType":"video/mp4","Size":512}]"#,
        )
        .create_async()
        .await;

    let listing_url = format!("{}/api/videos", cloud.url());
    let app = setup_test_app_with(&[
        ("CLOUD_LIBRARY_URL", listing_url.as_str()),
        ("CLOUD_THUMBNAIL_URL", "https://cdn.example.com/thumb.jpg"),
    ])
    .await;

    let response = app.client().get(&api_path("/cloud-videos")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    mock.assert_async().await;

    let body: Vec<Value> = response.json();
    assert_eq!(body.len(), 2);
    assert_eq!(body[0]["id"], "Launch.mov-0");
    assert_eq!(body[0]["displayName"], "Launch");
    assert_eq!(body[0]["formattedSize"], "1.5 KB");
    assert_eq!(body[0]["contentType"], "video/quicktime");
    assert_eq!(body[0]["thumbnail"], "https://cdn.example.com/thumb.jpg");
    assert_eq!(body[1]["id"], ".hidden-1");
    assert_eq!(body[1]["displayName"], ".hidden");
    assert_eq!(body[1]["formattedSize"], "512 bytes");
}

#[tokio::test]
async fn test_cloud_upstream_failure_is_bad_gateway() {
    let mut cloud = mockito::Server::new_async().await;
    cloud
        .mock("GET", "/api/videos")
        .with_status(500)
        .create_async()
        .await;

    let listing_url = format!("{}/api/videos", cloud.url());
    let app = setup_test_app_with(&[("CLOUD_LIBRARY_URL", listing_url.as_str())]).await;

    let response = app.client().get(&api_path("/cloud-videos")).await;
    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["code"], "UPSTREAM_ERROR");
}
