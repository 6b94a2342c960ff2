//! Remote container reached through a pre-signed URL.
//!
//! The container URL carries a time-limited credential in its query string. Every
//! blob URL is `{base}/{encoded name}{query}`; the credential is copied verbatim and
//! never interpreted.

use crate::traits::{BlobFetch, BlobSink, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Url;

const BLOB_TYPE_HEADER: &str = "x-ms-blob-type";
const BLOB_TYPE: &str = "BlockBlob";
const API_VERSION_HEADER: &str = "x-ms-version";
const API_VERSION: &str = "2022-11-02";

/// Remote blob sink writing with `PUT` to pre-signed blob URLs
#[derive(Clone, Debug)]
pub struct RemoteBlobSink {
    client: reqwest::Client,
    base_url: String,
    /// Query string including the leading `?`, or empty
    query: String,
}

impl RemoteBlobSink {
    /// Build a sink from a pre-signed container URL.
    ///
    /// Fails with `ConfigError` when the URL does not parse or is not http(s).
    pub fn from_sas_url(sas_url: &str) -> StorageResult<Self> {
        Self::with_client(sas_url, reqwest::Client::new())
    }

    pub fn with_client(sas_url: &str, client: reqwest::Client) -> StorageResult<Self> {
        let parsed = Url::parse(sas_url.trim())
            .map_err(|e| StorageError::ConfigError(format!("Invalid container URL: {}", e)))?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(StorageError::ConfigError(format!(
                "Container URL must be an http(s) URL with a host, got scheme '{}'",
                parsed.scheme()
            )));
        }

        let query = match parsed.query() {
            Some(q) if !q.is_empty() => format!("?{}", q),
            _ => {
                tracing::warn!("Container URL is missing the pre-signed query string");
                String::new()
            }
        };

        let origin = parsed.origin().ascii_serialization();
        let base_url = format!("{}{}", origin, parsed.path().trim_end_matches('/'));

        Ok(RemoteBlobSink {
            client,
            base_url,
            query,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn blob_url(&self, name: &str) -> String {
        format!("{}/{}{}", self.base_url, urlencoding::encode(name), self.query)
    }
}

#[async_trait]
impl BlobSink for RemoteBlobSink {
    async fn put(&self, name: &str, data: Bytes, content_type: &str) -> StorageResult<String> {
        let blob_url = self.blob_url(name);
        let size = data.len();
        let start = std::time::Instant::now();

        let response = self
            .client
            .put(&blob_url)
            .header(BLOB_TYPE_HEADER, BLOB_TYPE)
            .header(API_VERSION_HEADER, API_VERSION)
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, size.to_string())
            .body(data)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    key = %name,
                    size_bytes = size,
                    "Remote blob upload request failed"
                );
                StorageError::UploadFailed(format!("Remote blob upload request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                key = %name,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Remote blob upload rejected"
            );
            return Err(StorageError::UploadFailed(format!(
                "Remote blob upload failed with status {}: {}",
                status.as_u16(),
                text
            )));
        }

        tracing::info!(
            key = %name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Remote blob upload successful"
        );

        Ok(blob_url)
    }

    fn locate(&self, name: &str) -> StorageResult<String> {
        Ok(self.blob_url(name))
    }

    async fn fetch(&self, name: &str) -> StorageResult<BlobFetch> {
        Ok(BlobFetch::Redirect(self.blob_url(name)))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Remote
    }
}
