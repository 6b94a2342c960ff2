use clipshelf_core::{AppError, Config, VideoRecord};
use serde::Serialize;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Trait for the video catalog.
///
/// Records come back in insertion order. `append` never loses a record that
/// was written by a concurrent `append`.
#[async_trait::async_trait]
pub trait MetadataStore: Send + Sync {
    /// All records, oldest first. An unreadable catalog yields an empty list and
    /// entries that are not video records are skipped.
    async fn list_all(&self) -> Result<Vec<VideoRecord>, AppError>;

    /// Add one record to the end of the catalog.
    async fn append(&self, record: VideoRecord) -> Result<(), AppError>;
}

/// Build the JSON-file store at the configured location and make sure the file exists.
pub async fn create_metadata_store(config: &Config) -> Result<Arc<dyn MetadataStore>, AppError> {
    let store = JsonFileMetadataStore::new(config.metadata_file().clone());
    store.ensure_initialized().await?;
    Ok(Arc::new(store))
}

/// State of the catalog file at the time it was read.
enum Catalog {
    Missing,
    Entries(Vec<Value>),
    Unreadable(String),
}

/// Catalog persisted as a pretty-printed JSON array on disk.
///
/// Writes go to a sibling temp file that is renamed over the catalog, so a
/// reader sees either the old or the new document. Appends are serialized by
/// an in-process lock.
#[derive(Debug)]
pub struct JsonFileMetadataStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileMetadataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the catalog as `[]` (and its parent directory) if it does not exist.
    pub async fn ensure_initialized(&self) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        self.initialize_locked().await
    }

    async fn initialize_locked(&self) -> Result<(), AppError> {
        match fs::metadata(&self.path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if let Some(parent) = self.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent).await?;
                    }
                }
                self.persist::<Value>(&[]).await?;
                tracing::info!(path = %self.path.display(), "Initialized empty video catalog");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read the catalog as raw JSON entries.
    async fn read_catalog(&self) -> Catalog {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Catalog::Missing,
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read video catalog"
                );
                return Catalog::Unreadable(e.to_string());
            }
        };

        match serde_json::from_slice::<Vec<Value>>(&raw) {
            Ok(entries) => Catalog::Entries(entries),
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Video catalog is not a JSON array, treating as empty"
                );
                Catalog::Unreadable(e.to_string())
            }
        }
    }

    /// Decode every entry that looks like a record, skipping the rest.
    fn decode_entries(&self, entries: Vec<Value>) -> Vec<VideoRecord> {
        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        index,
                        error = %e,
                        "Skipping catalog entry that is not a video record"
                    );
                    None
                }
            })
            .collect()
    }

    /// Replace the whole catalog with `records`.
    pub async fn write_all(&self, records: &[VideoRecord]) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        self.persist(records).await
    }

    async fn persist<T: Serialize>(&self, records: &[T]) -> Result<(), AppError> {
        let json = serde_json::to_vec_pretty(records).map_err(|e| {
            AppError::Internal(format!("Failed to serialize video catalog: {}", e))
        })?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "videos.json".to_string());
        let tmp_path = self
            .path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

        let result = async {
            let mut file = fs::File::create(&tmp_path).await?;
            file.write_all(&json).await?;
            file.sync_all().await?;
            fs::rename(&tmp_path, &self.path).await
        }
        .await;

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path).await;
            tracing::error!(
                path = %self.path.display(),
                error = %e,
                "Failed to write video catalog"
            );
            return Err(e.into());
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl MetadataStore for JsonFileMetadataStore {
    async fn list_all(&self) -> Result<Vec<VideoRecord>, AppError> {
        let catalog = match self.read_catalog().await {
            Catalog::Missing => {
                let _guard = self.write_lock.lock().await;
                self.initialize_locked().await?;
                self.read_catalog().await
            }
            catalog => catalog,
        };

        match catalog {
            Catalog::Entries(entries) => Ok(self.decode_entries(entries)),
            Catalog::Missing | Catalog::Unreadable(_) => Ok(Vec::new()),
        }
    }

    /// Entries that do not decode as records are carried over untouched. An
    /// unreadable catalog is never overwritten.
    async fn append(&self, record: VideoRecord) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = match self.read_catalog().await {
            Catalog::Missing => Vec::new(),
            Catalog::Entries(entries) => entries,
            Catalog::Unreadable(reason) => {
                return Err(AppError::Internal(format!(
                    "Refusing to overwrite unreadable video catalog {}: {}",
                    self.path.display(),
                    reason
                )));
            }
        };

        let entry = serde_json::to_value(&record).map_err(|e| {
            AppError::Internal(format!("Failed to serialize video record: {}", e))
        })?;
        entries.push(entry);
        self.persist(&entries).await?;

        tracing::debug!(
            video_id = %record.id,
            total = entries.len(),
            "Appended video record"
        );
        Ok(())
    }
}

/// Catalog held in memory, for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct InMemoryMetadataStore {
    records: Mutex<Vec<VideoRecord>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn list_all(&self) -> Result<Vec<VideoRecord>, AppError> {
        Ok(self.records.lock().await.clone())
    }

    async fn append(&self, record: VideoRecord) -> Result<(), AppError> {
        self.records.lock().await.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    fn record(title: &str) -> VideoRecord {
        let file_name = format!("{}-{}.mp4", Utc::now().timestamp_millis(), Uuid::new_v4());
        VideoRecord {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: "d".to_string(),
            folder: "Unsorted".to_string(),
            original_name: format!("{}.mp4", title),
            url: format!("/uploads/{}", file_name),
            file_name,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_missing_catalog_is_initialized_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("videos.json");
        let store = JsonFileMetadataStore::new(&path);

        assert!(store.list_all().await.unwrap().is_empty());
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.trim(), "[]");
    }

    #[tokio::test]
    async fn test_append_preserves_order_and_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("videos.json");
        let store = JsonFileMetadataStore::new(&path);
        store.ensure_initialized().await.unwrap();

        let first = record("first");
        let second = record("second");
        store.append(first.clone()).await.unwrap();
        store.append(second.clone()).await.unwrap();

        let records = store.list_all().await.unwrap();
        assert_eq!(records, vec![first, second]);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n  {"), "catalog should be pretty-printed");
        assert!(raw.contains("\"originalName\""));
        assert!(raw.contains("\"createdAt\""));
    }

    #[tokio::test]
    async fn test_write_all_replaces_catalog() {
        let dir = tempdir().unwrap();
        let store = JsonFileMetadataStore::new(dir.path().join("videos.json"));
        store.append(record("old")).await.unwrap();

        let replacement = vec![record("a"), record("b")];
        store.write_all(&replacement).await.unwrap();
        assert_eq!(store.list_all().await.unwrap(), replacement);
    }

    #[tokio::test]
    async fn test_corrupt_catalog_reads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("videos.json");
        std::fs::write(&path, b"{ not json").unwrap();
        let store = JsonFileMetadataStore::new(&path);

        assert!(store.list_all().await.unwrap().is_empty());
        assert_eq!(std::fs::read(&path).unwrap(), b"{ not json");
    }

    #[tokio::test]
    async fn test_append_refuses_to_overwrite_unreadable_catalog() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("videos.json");
        std::fs::write(&path, b"{ not json").unwrap();
        let store = JsonFileMetadataStore::new(&path);

        let result = store.append(record("new")).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
        assert_eq!(std::fs::read(&path).unwrap(), b"{ not json");
    }

    #[tokio::test]
    async fn test_foreign_entries_survive_append() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("videos.json");
        std::fs::write(
            &path,
            r#"[
                {
                    "id": "1",
                    "title": "Old",
                    "description": "Imported",
                    "folder": "Unsorted",
                    "originalName": "old.mp4",
                    "fileName": "old.mp4",
                    "url": "/uploads/old.mp4",
                    "createdAt": "2023-05-01T10:00:00.000Z"
                },
                { "title": "half written" }
            ]"#,
        )
        .unwrap();
        let store = JsonFileMetadataStore::new(&path);

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "1");

        let added = record("new");
        store.append(added.clone()).await.unwrap();

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "Old");
        assert_eq!(listed[1], added);

        let on_disk: Vec<serde_json::Value> =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 3);
        assert_eq!(on_disk[1]["title"], "half written");
    }

    #[tokio::test]
    async fn test_reads_records_written_elsewhere() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("videos.json");
        std::fs::write(
            &path,
            r#"[{
                "id": "0b6f2d8e-3c3e-4a53-9d47-2a3c8e1f0c11",
                "title": "Trip",
                "description": "Beach",
                "folder": "Holidays",
                "originalName": "trip.mov",
                "fileName": "1700000000000-0b6f2d8e-3c3e-4a53-9d47-2a3c8e1f0c11.mov",
                "url": "/uploads/1700000000000-0b6f2d8e-3c3e-4a53-9d47-2a3c8e1f0c11.mov",
                "createdAt": "2024-01-01T00:00:00.000Z"
            }]"#,
        )
        .unwrap();

        let records = JsonFileMetadataStore::new(&path).list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].folder, "Holidays");
        assert_eq!(records[0].original_name, "trip.mov");
    }

    #[tokio::test]
    async fn test_concurrent_appends_lose_nothing() {
        let dir = tempdir().unwrap();
        let store = Arc::new(JsonFileMetadataStore::new(dir.path().join("videos.json")));
        store.ensure_initialized().await.unwrap();

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.append(record(&format!("clip-{}", i))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 20);
        let mut ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryMetadataStore::new();
        let r = record("one");
        store.append(r.clone()).await.unwrap();
        assert_eq!(store.list_all().await.unwrap(), vec![r]);
    }
}
