//! Domain route groups (videos, stored files).

use crate::constants::{API_PREFIX, UPLOADS_PREFIX};
use crate::handlers;
use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

pub fn video_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/videos", API_PREFIX),
            get(handlers::video_get::list_videos).post(handlers::video_upload::upload_video),
        )
        .route(
            &format!("{}/cloud-videos", API_PREFIX),
            get(handlers::cloud_videos::list_cloud_videos),
        )
}

/// `/uploads/` is registered separately because the wildcard does not match an
/// empty remainder.
pub fn file_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/", UPLOADS_PREFIX),
            get(handlers::upload_file::get_upload),
        )
        .route(
            &format!("{}/{{*path}}", UPLOADS_PREFIX),
            get(handlers::upload_file::get_upload),
        )
}
