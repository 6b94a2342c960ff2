use crate::error::{ErrorResponse, HttpAppError};
use crate::services::VideoIngestService;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use clipshelf_core::{UploadRequest, VideoRecord};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/videos",
    tag = "videos",
    request_body(content = UploadRequest, content_type = "application/json"),
    responses(
        (status = 201, description = "Video uploaded successfully", body = VideoRecord),
        (status = 400, description = "Missing fields or malformed payload", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Storage not configured or internal error", body = ErrorResponse),
        (status = 502, description = "Remote storage rejected the upload", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, body), fields(operation = "upload_video"))]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let body = body?;
    let request = UploadRequest::from_body(&body)?;

    let record = VideoIngestService::new(&state).upload(request).await?;

    Ok((StatusCode::CREATED, Json(record)))
}
