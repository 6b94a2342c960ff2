//! Proxy over an external cloud listing endpoint.

use clipshelf_core::models::cloud::summarize;
use clipshelf_core::models::{CloudVideo, CloudVideoSummary};
use clipshelf_core::AppError;

pub struct CloudCatalogService {
    client: reqwest::Client,
    listing_url: String,
    thumbnail: String,
}

impl CloudCatalogService {
    pub fn new(
        client: reqwest::Client,
        listing_url: impl Into<String>,
        thumbnail: impl Into<String>,
    ) -> Self {
        Self {
            client,
            listing_url: listing_url.into(),
            thumbnail: thumbnail.into(),
        }
    }

    /// Fetch the listing and map every entry to a display summary.
    ///
    /// Transport errors, non-success statuses and unparseable bodies are all
    /// reported as `Upstream`.
    pub async fn list(&self) -> Result<Vec<CloudVideoSummary>, AppError> {
        let response = self
            .client
            .get(&self.listing_url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Cloud listing request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "Cloud listing returned status {}",
                status.as_u16()
            )));
        }

        let videos: Vec<CloudVideo> = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Cloud listing is not valid JSON: {}", e)))?;

        tracing::debug!(count = videos.len(), "Fetched cloud listing");

        Ok(summarize(videos, &self.thumbnail))
    }
}
