//! Health check handlers and response types.

use crate::state::AppState;
use axum::{http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Run an async check with timeout; returns status string "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub storage: String,
    pub metadata: String,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Health check: blob storage selection and metadata catalog readability.
///
/// Always answers 200; `status` is `degraded` when storage is unconfigured or the
/// catalog cannot be read.
pub async fn health_check(state: Arc<AppState>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let storage = match &state.storage {
        Some(sink) => sink.backend_type().to_string(),
        None => "not_configured".to_string(),
    };

    let metadata_store = state.metadata.clone();
    let metadata = run_check(
        TIMEOUT,
        async move { metadata_store.list_all().await.map(drop) },
        "unhealthy",
    )
    .await;

    let healthy = state.storage.is_some() && metadata == "healthy";
    if !healthy {
        tracing::warn!(storage = %storage, metadata = %metadata, "Health check degraded");
    }

    let response = HealthCheckResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        storage,
        metadata,
    };

    (StatusCode::OK, Json(response))
}
