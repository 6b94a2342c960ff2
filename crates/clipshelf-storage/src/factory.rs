#[cfg(feature = "storage-local")]
use crate::LocalBlobSink;
#[cfg(feature = "storage-remote")]
use crate::RemoteBlobSink;
use crate::{BlobSink, StorageResult};
use clipshelf_core::Config;
use std::sync::Arc;

/// Create the blob sink selected by configuration.
///
/// * no remote URL: local directory
/// * valid remote URL: remote container
/// * malformed remote URL: `Ok(None)` after a warning, so uploads fail with a
///   configuration error; an error instead when `STORAGE_STRICT` is set
pub async fn create_blob_sink(config: &Config) -> StorageResult<Option<Arc<dyn BlobSink>>> {
    match config.remote_storage_url() {
        None => create_local(config).await.map(Some),
        Some(url) => match create_remote(url) {
            Ok(sink) => Ok(Some(sink)),
            Err(e) if config.storage_strict() => Err(e),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Remote storage URL is invalid; storage is unconfigured and uploads will be refused"
                );
                Ok(None)
            }
        },
    }
}

#[cfg(feature = "storage-local")]
async fn create_local(config: &Config) -> StorageResult<Arc<dyn BlobSink>> {
    let sink = LocalBlobSink::new(
        config.upload_dir().clone(),
        config.local_storage_base_url().to_string(),
    )
    .await?;
    Ok(Arc::new(sink))
}

#[cfg(not(feature = "storage-local"))]
async fn create_local(_config: &Config) -> StorageResult<Arc<dyn BlobSink>> {
    Err(crate::StorageError::ConfigError(
        "Local storage backend not available (storage-local feature not enabled)".to_string(),
    ))
}

#[cfg(feature = "storage-remote")]
fn create_remote(url: &str) -> StorageResult<Arc<dyn BlobSink>> {
    Ok(Arc::new(RemoteBlobSink::from_sas_url(url)?))
}

#[cfg(not(feature = "storage-remote"))]
fn create_remote(_url: &str) -> StorageResult<Arc<dyn BlobSink>> {
    Err(crate::StorageError::ConfigError(
        "Remote storage backend not available (storage-remote feature not enabled)".to_string(),
    ))
}

#[cfg(all(test, feature = "storage-local", feature = "storage-remote"))]
mod tests {
    use super::*;
    use crate::{StorageBackend, StorageError};
    use std::collections::HashMap;

    fn config(dir: &std::path::Path, remote: Option<&str>, strict: bool) -> Config {
        let mut vars = HashMap::new();
        vars.insert("DATA_DIR".to_string(), dir.display().to_string());
        if let Some(url) = remote {
            vars.insert("REMOTE_STORAGE_SAS_URL".to_string(), url.to_string());
        }
        vars.insert("STORAGE_STRICT".to_string(), strict.to_string());
        Config::from_map(&vars).unwrap()
    }

    #[tokio::test]
    async fn test_no_remote_url_selects_local() {
        let dir = tempfile::tempdir().unwrap();
        let sink = create_blob_sink(&config(dir.path(), None, false))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sink.backend_type(), StorageBackend::Local);
        assert!(dir.path().join("uploads").is_dir());
    }

    #[tokio::test]
    async fn test_valid_remote_url_selects_remote() {
        let dir = tempfile::tempdir().unwrap();
        let sink = create_blob_sink(&config(
            dir.path(),
            Some("https://acct.blob.core.windows.net/videos?sig=x"),
            false,
        ))
        .await
        .unwrap()
        .unwrap();
        assert_eq!(sink.backend_type(), StorageBackend::Remote);
    }

    #[tokio::test]
    async fn test_malformed_remote_url_leaves_storage_unconfigured() {
        let dir = tempfile::tempdir().unwrap();
        let sink = create_blob_sink(&config(dir.path(), Some("::not-a-url::"), false))
            .await
            .unwrap();
        assert!(sink.is_none());
        assert!(!dir.path().join("uploads").exists());
    }

    #[tokio::test]
    async fn test_malformed_remote_url_fails_in_strict_mode() {
        let dir = tempfile::tempdir().unwrap();
        let result = create_blob_sink(&config(dir.path(), Some("::not-a-url::"), true)).await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }
}
