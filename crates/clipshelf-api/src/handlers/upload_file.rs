//! Stored file route: streams a local file or redirects to the remote blob.

use crate::constants::UPLOADS_PREFIX;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode, Uri},
    response::Response,
};
use clipshelf_core::media_types::mime_for_file_name;
use clipshelf_core::AppError;
use clipshelf_storage::BlobFetch;
use futures::StreamExt;
use percent_encoding::percent_decode_str;
use std::sync::Arc;

/// Turn the raw path below `/uploads/` into a storage name.
///
/// Percent-decodes, converts `\` to `/` and strips leading slashes. Empty names,
/// names that are not UTF-8 and names containing `..` are rejected.
pub fn resolve_upload_name(raw: &str) -> Result<String, AppError> {
    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|e| AppError::PathTraversal(format!("undecodable path {:?}: {}", raw, e)))?;

    let normalized = decoded.replace('\\', "/");
    let name = normalized.trim_start_matches('/');

    if name.is_empty() || name.contains("..") {
        return Err(AppError::PathTraversal(format!("rejected path {:?}", raw)));
    }

    Ok(name.to_string())
}

#[utoipa::path(
    get,
    path = "/uploads/{path}",
    tag = "files",
    params(
        ("path" = String, Path, description = "Stored file name")
    ),
    responses(
        (status = 200, description = "File contents"),
        (status = 302, description = "Redirect to the remote blob"),
        (status = 400, description = "Invalid file path", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Storage not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_upload"))]
pub async fn get_upload(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, HttpAppError> {
    let raw = uri
        .path()
        .strip_prefix(UPLOADS_PREFIX)
        .unwrap_or_default()
        .trim_start_matches('/');
    let name = resolve_upload_name(raw)?;

    let storage = state.storage.as_ref().ok_or_else(|| {
        AppError::Configuration("No blob sink configured for file serving".to_string())
    })?;

    let response = match storage.fetch(&name).await? {
        BlobFetch::Redirect(location) => Response::builder()
            .status(StatusCode::FOUND)
            .header(header::LOCATION, location)
            .body(Body::empty()),
        BlobFetch::Stream {
            body,
            content_length,
        } => {
            let body_stream = body.map(|result| {
                result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
            });
            let mut builder = Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime_for_file_name(&name));
            if let Some(len) = content_length {
                builder = builder.header(header::CONTENT_LENGTH, len);
            }
            builder.body(Body::from_stream(body_stream))
        }
    };

    response.map_err(|e| {
        tracing::error!(error = %e, "Failed to build response");
        HttpAppError::from(AppError::Internal(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain_name() {
        assert_eq!(resolve_upload_name("1700-abc.mp4").unwrap(), "1700-abc.mp4");
        assert_eq!(resolve_upload_name("my%20clip.mov").unwrap(), "my clip.mov");
    }

    #[test]
    fn test_resolve_normalizes_separators() {
        assert_eq!(resolve_upload_name("%2Fa%5Cb.mp4").unwrap(), "a/b.mp4");
        assert_eq!(resolve_upload_name("//x.mp4").unwrap(), "x.mp4");
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        for raw in [
            "../../etc/passwd",
            "%2e%2e/%2e%2e/etc/passwd",
            "..%2F..%2Fetc%2Fpasswd",
            "..%5Csecret",
            "a/../b",
        ] {
            assert!(
                matches!(resolve_upload_name(raw), Err(AppError::PathTraversal(_))),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_resolve_rejects_empty_and_invalid() {
        assert!(matches!(resolve_upload_name(""), Err(AppError::PathTraversal(_))));
        assert!(matches!(resolve_upload_name("%2F"), Err(AppError::PathTraversal(_))));
        assert!(matches!(resolve_upload_name("%FF%FE"), Err(AppError::PathTraversal(_))));
    }
}
