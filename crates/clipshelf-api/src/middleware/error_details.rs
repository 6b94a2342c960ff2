use crate::error::ErrorDetails;
use axum::http::header;
use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Expose error details outside production.
///
/// Error responses leave the handler with the production-safe body. When the
/// app is not in production the detailed body from the [`ErrorDetails`]
/// extension replaces it. The extension never leaves the server.
pub async fn error_details_middleware(
    State(is_production): State<bool>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(ErrorDetails(detailed)) = response.extensions_mut().remove::<ErrorDetails>() else {
        return response;
    };
    if is_production {
        return response;
    }

    let body = match serde_json::to_vec(&detailed) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize detailed error body");
            return response;
        }
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(body))
}
