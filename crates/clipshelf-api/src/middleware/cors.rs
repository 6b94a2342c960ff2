use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

const ALLOWED_METHODS: &str = "GET,POST,OPTIONS";
const DEFAULT_ALLOWED_HEADERS: &str = "Content-Type";

/// Cross-origin configuration
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allow_origin: HeaderValue,
}

impl CorsConfig {
    /// Falls back to `*` when the configured origin is not a valid header value.
    pub fn new(allow_origin: &str) -> Self {
        let allow_origin = HeaderValue::from_str(allow_origin).unwrap_or_else(|_| {
            tracing::warn!(
                origin = %allow_origin,
                "CORS_ALLOW_ORIGIN is not a valid header value, allowing all origins"
            );
            HeaderValue::from_static("*")
        });
        Self { allow_origin }
    }
}

/// CORS middleware
///
/// Every `OPTIONS` request is answered here with 204, whatever its path, and
/// never reaches the router. Every other response gets
/// `Access-Control-Allow-Origin`.
pub async fn cors_middleware(
    State(config): State<Arc<CorsConfig>>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS {
        let allow_headers = request
            .headers()
            .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_ALLOWED_HEADERS));

        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        let headers = response.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            config.allow_origin.clone(),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, allow_headers);
        return response;
    }

    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        config.allow_origin.clone(),
    );
    response
}
