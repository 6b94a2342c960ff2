//! Clipshelf Core Library
//!
//! This crate provides the domain model, error types, configuration, media type
//! table and endpoint resolution shared by all Clipshelf components.

pub mod config;
pub mod constants;
pub mod endpoint;
pub mod error;
pub mod media_types;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use endpoint::{api_url, resolve_api_base, EndpointEnvironment};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{UploadRequest, ValidatedUpload, VideoRecord};
pub use storage_types::StorageBackend;
// Note: BlobSink, StorageError, StorageResult live in the clipshelf-storage crate
