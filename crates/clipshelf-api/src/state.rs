//! Application state shared by every handler.

use clipshelf_core::Config;
use clipshelf_db::MetadataStore;
use clipshelf_storage::{BlobSink, StorageKeyGenerator};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when the configured backend could not be built; uploads and file
    /// serving then fail with a configuration error.
    pub storage: Option<Arc<dyn BlobSink>>,
    pub metadata: Arc<dyn MetadataStore>,
    pub keys: Arc<StorageKeyGenerator>,
    /// Shared client for outbound calls (cloud listing)
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Option<Arc<dyn BlobSink>>,
        metadata: Arc<dyn MetadataStore>,
    ) -> Self {
        Self {
            config,
            storage,
            metadata,
            keys: Arc::new(StorageKeyGenerator::new()),
            http_client: reqwest::Client::new(),
        }
    }
}
