//! Storage setup and initialization

use anyhow::{Context, Result};
use clipshelf_core::Config;
use clipshelf_storage::{create_blob_sink, BlobSink};
use std::sync::Arc;

/// Select the blob sink once for the lifetime of the process.
///
/// `Ok(None)` means storage is unconfigured: the server still starts but
/// uploads and file serving answer with a configuration error.
pub async fn setup_storage(config: &Config) -> Result<Option<Arc<dyn BlobSink>>> {
    tracing::info!("Initializing blob storage...");
    let storage = create_blob_sink(config)
        .await
        .context("Failed to initialize blob storage")?;

    match &storage {
        Some(sink) => tracing::info!(
            backend = %sink.backend_type(),
            "Blob storage initialized successfully"
        ),
        None => tracing::warn!("Blob storage is not configured; uploads will be refused"),
    }

    Ok(storage)
}
