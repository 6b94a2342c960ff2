//! Application setup and initialization
//!
//! Everything main.rs needs to go from a `Config` to a served router.

pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use clipshelf_core::Config;
use clipshelf_db::create_metadata_store;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    build_app(config).await
}

/// Build state and router from configuration without touching global telemetry.
pub async fn build_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let storage = storage::setup_storage(&config).await?;

    let metadata = create_metadata_store(&config)
        .await
        .context("Failed to initialize metadata store")?;
    tracing::info!(
        path = %config.metadata_file().display(),
        "Metadata store initialized"
    );

    let state = Arc::new(AppState::new(config.clone(), storage, metadata));

    let router = routes::setup_routes(&config, state.clone()).await?;

    Ok((state, router))
}
