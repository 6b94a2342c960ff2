//! Clipshelf Storage Library
//!
//! This crate provides the blob sink abstraction and its implementations: a local
//! directory and a remote container reached through a pre-signed URL.
//!
//! # Storage key format
//!
//! Keys are flat file names generated by the `keys` module:
//! `{millis}-{uuid}{extension}`. Keys must not contain `..` or a leading `/`.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-remote")]
pub mod remote;
pub mod traits;

// Re-export commonly used types
pub use clipshelf_core::StorageBackend;
pub use factory::create_blob_sink;
pub use keys::StorageKeyGenerator;
#[cfg(feature = "storage-local")]
pub use local::LocalBlobSink;
#[cfg(feature = "storage-remote")]
pub use remote::RemoteBlobSink;
pub use traits::{BlobFetch, BlobSink, BlobStream, StorageError, StorageResult};
