//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use clipshelf_core::models;

/// The OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Clipshelf API",
        version = "0.1.0",
        description = "Video library API: base64 uploads stored in a local directory or a remote container, a JSON metadata catalog, and stored-file serving."
    ),
    paths(
        handlers::video_upload::upload_video,
        handlers::video_get::list_videos,
        handlers::upload_file::get_upload,
        handlers::cloud_videos::list_cloud_videos,
    ),
    components(
        schemas(
            models::VideoRecord,
            models::UploadRequest,
            models::CloudVideoSummary,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "videos", description = "Video upload and catalog operations"),
        (name = "files", description = "Stored file retrieval"),
    )
)]
pub struct ApiDoc;
