//! Blob sink abstraction trait
//!
//! This module defines the BlobSink trait that all storage backends implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Stream of file chunks.
pub type BlobStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// How a stored blob is handed back to a client.
pub enum BlobFetch {
    /// Bytes served directly by this process
    Stream {
        body: BlobStream,
        content_length: Option<u64>,
    },
    /// Client should follow the given URL
    Redirect(String),
}

impl std::fmt::Debug for BlobFetch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlobFetch::Stream { content_length, .. } => f
                .debug_struct("Stream")
                .field("content_length", content_length)
                .finish(),
            BlobFetch::Redirect(url) => f.debug_tuple("Redirect").field(url).finish(),
        }
    }
}

/// Blob sink abstraction trait
///
/// The backend is chosen once at startup; ingestion and file serving only ever
/// talk to this trait.
#[async_trait]
pub trait BlobSink: Send + Sync {
    /// Store `data` under `name` and return the locator clients retrieve it from.
    async fn put(&self, name: &str, data: Bytes, content_type: &str) -> StorageResult<String>;

    /// Locator for `name`. No existence check is performed.
    fn locate(&self, name: &str) -> StorageResult<String>;

    /// Resolve a stored blob for reading: either its bytes or a redirect.
    async fn fetch(&self, name: &str) -> StorageResult<BlobFetch>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
