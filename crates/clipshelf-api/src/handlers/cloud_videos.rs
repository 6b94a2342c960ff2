use crate::error::{ErrorResponse, HttpAppError};
use crate::services::CloudCatalogService;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use clipshelf_core::models::CloudVideoSummary;
use clipshelf_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/cloud-videos",
    tag = "videos",
    responses(
        (status = 200, description = "Videos listed by the cloud library", body = Vec<CloudVideoSummary>),
        (status = 404, description = "Cloud library not configured", body = ErrorResponse),
        (status = 502, description = "Cloud library unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_cloud_videos"))]
pub async fn list_cloud_videos(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let listing_url = state
        .config
        .cloud_library_url()
        .ok_or_else(|| AppError::NotFound("Cloud library is not configured".to_string()))?;

    let service = CloudCatalogService::new(
        state.http_client.clone(),
        listing_url,
        state.config.cloud_thumbnail_url(),
    );

    Ok(Json(service.list().await?))
}
