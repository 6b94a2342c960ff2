//! Route configuration and setup.
//!
//! Domain route groups live in [domains](domains); health checks in [health](health).

mod domains;
mod health;

use crate::error::HttpAppError;
use crate::middleware::{
    cors_middleware, error_details_middleware, request_id_middleware, CorsConfig,
};
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use clipshelf_core::{AppError, Config};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = Arc::new(CorsConfig::new(config.cors_allow_origin()));

    tracing::info!(
        max_upload_size_bytes = config.max_upload_size_bytes(),
        "Request body limit enabled"
    );

    let app = Router::new()
        .merge(domains::video_routes())
        .merge(domains::file_routes())
        .merge(public_routes(state.clone()))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(axum::middleware::from_fn_with_state(
            config.is_production(),
            error_details_middleware,
        ))
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes()))
        .layer(DefaultBodyLimit::disable())
        .layer(axum::middleware::from_fn_with_state(cors, cors_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

async fn not_found() -> HttpAppError {
    HttpAppError::from(AppError::NotFound("Not found".to_string()))
}

fn public_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/health",
            get({
                let state = state.clone();
                move || {
                    let state = state.clone();
                    async { health::health_check(state).await }
                }
            }),
        )
        .route("/live", get(health::liveness_check))
        .route(
            crate::constants::OPENAPI_PATH,
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}
