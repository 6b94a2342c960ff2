use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use clipshelf_core::VideoRecord;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/videos",
    tag = "videos",
    responses(
        (status = 200, description = "Every uploaded video, oldest first", body = Vec<VideoRecord>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_videos"))]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let videos = state.metadata.list_all().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list videos");
        HttpAppError::from(e)
    })?;

    Ok(Json(videos))
}
