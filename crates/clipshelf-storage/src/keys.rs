//! Storage key generation.
//!
//! Key format: `{millis}-{uuid}{extension}`. The millisecond prefix never goes
//! backwards within a process, so keys sort by upload order; the UUID keeps
//! concurrent uploads of identically named files apart.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct StorageKeyGenerator {
    last_millis: AtomicU64,
}

impl StorageKeyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current wall-clock milliseconds, clamped so it never drops below a value
    /// handed out earlier.
    fn next_millis(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let previous = self.last_millis.fetch_max(now, Ordering::SeqCst);
        previous.max(now)
    }

    /// Generate a storage key for a file with the given extension (including the dot).
    pub fn generate(&self, extension: &str) -> String {
        format!("{}-{}{}", self.next_millis(), Uuid::new_v4(), extension)
    }
}

/// Reject keys that could escape a storage root.
pub fn validate_key(storage_key: &str) -> Result<(), String> {
    if storage_key.is_empty() {
        return Err("Storage key is empty".to_string());
    }
    if storage_key.contains("..") || storage_key.starts_with('/') || storage_key.contains('\\') {
        return Err("Storage key contains invalid characters".to_string());
    }
    Ok(())
}
