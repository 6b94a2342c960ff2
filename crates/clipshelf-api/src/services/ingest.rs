//! Video ingestion service
//!
//! Pipeline: validate → name → resolve MIME → store blob → persist record.
//! A record is only appended after its blob write succeeded.

use bytes::Bytes;
use chrono::Utc;
use clipshelf_core::media_types::{extension_for, resolve_mime_type};
use clipshelf_core::{AppError, UploadRequest, VideoRecord};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::storage_error_to_app;
use crate::state::AppState;

pub struct VideoIngestService {
    state: Arc<AppState>,
}

impl VideoIngestService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Validate an upload request, store its bytes and append the metadata record.
    pub async fn upload(&self, request: UploadRequest) -> Result<VideoRecord, AppError> {
        let upload = request.validate()?;

        let extension = extension_for(&upload.original_name);
        let file_name = self.state.keys.generate(&extension);
        let mime_type = resolve_mime_type(&extension, upload.mime_type.as_deref());

        let storage = self.state.storage.as_ref().ok_or_else(|| {
            tracing::error!("Blob storage is not configured; unable to accept upload");
            AppError::Configuration("No blob sink configured".to_string())
        })?;

        let data = upload.decode_data()?;
        let size = data.len();

        let url = storage
            .put(&file_name, Bytes::from(data), &mime_type)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    file_name = %file_name,
                    backend = %storage.backend_type(),
                    "Failed to store uploaded video"
                );
                storage_error_to_app(e)
            })?;

        let record = VideoRecord {
            id: Uuid::new_v4().to_string(),
            title: upload.title,
            description: upload.description,
            folder: upload.folder,
            original_name: upload.original_name,
            file_name,
            url,
            created_at: Utc::now(),
        };

        self.state.metadata.append(record.clone()).await?;

        tracing::info!(
            video_id = %record.id,
            file_name = %record.file_name,
            folder = %record.folder,
            mime_type = %mime_type,
            size_bytes = size,
            "Video uploaded"
        );

        Ok(record)
    }
}
