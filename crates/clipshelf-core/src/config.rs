//! Configuration module
//!
//! Server, storage and catalog settings, read from the environment (optionally
//! seeded from a `.env` file) once at startup.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_CLOUD_THUMBNAIL, DEFAULT_HOST, DEFAULT_PORT, MAX_UPLOAD_SIZE_MB, UPLOADS_PREFIX,
};

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub server_port: u16,
    pub environment: String,
    pub cors_allow_origin: String,
    // Storage configuration
    pub data_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub metadata_file: PathBuf,
    pub local_storage_base_url: String,
    /// Pre-signed container URL; absence selects local storage
    pub remote_storage_url: Option<String>,
    /// Refuse to start when the remote URL is malformed instead of running unconfigured
    pub storage_strict: bool,
    pub max_upload_size_bytes: usize,
    // Cloud catalog
    pub cloud_library_url: Option<String>,
    pub cloud_thumbnail_url: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from explicit key/value pairs.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let data_dir = PathBuf::from(non_empty("DATA_DIR").unwrap_or_else(|| ".".to_string()));
        let upload_dir = non_empty("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("uploads"));
        let metadata_file = non_empty("METADATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("videos.json"));

        let max_upload_size_mb = lookup("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);
        let max_upload_size_bytes = max_upload_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| {
                anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large: {}", max_upload_size_mb)
            })?;

        let config = Config {
            host: non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            server_port: lookup("PORT")
                .unwrap_or_else(|| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_allow_origin: non_empty("CORS_ALLOW_ORIGIN").unwrap_or_else(|| "*".to_string()),
            data_dir,
            upload_dir,
            metadata_file,
            local_storage_base_url: non_empty("LOCAL_STORAGE_BASE_URL")
                .unwrap_or_else(|| UPLOADS_PREFIX.to_string()),
            remote_storage_url: non_empty("REMOTE_STORAGE_SAS_URL")
                .or_else(|| non_empty("AZURE_CONTAINER_SAS_URL")),
            storage_strict: lookup("STORAGE_STRICT")
                .unwrap_or_else(|| "false".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(false),
            max_upload_size_bytes,
            cloud_library_url: non_empty("CLOUD_LIBRARY_URL"),
            cloud_thumbnail_url: non_empty("CLOUD_THUMBNAIL_URL")
                .unwrap_or_else(|| DEFAULT_CLOUD_THUMBNAIL.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB cannot be 0"));
        }

        if !self.local_storage_base_url.starts_with('/')
            && !self.local_storage_base_url.starts_with("http://")
            && !self.local_storage_base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_BASE_URL must be root-relative or an http(s) URL"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.server_port)
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn cors_allow_origin(&self) -> &str {
        &self.cors_allow_origin
    }

    pub fn upload_dir(&self) -> &PathBuf {
        &self.upload_dir
    }

    pub fn metadata_file(&self) -> &PathBuf {
        &self.metadata_file
    }

    pub fn local_storage_base_url(&self) -> &str {
        &self.local_storage_base_url
    }

    pub fn remote_storage_url(&self) -> Option<&str> {
        self.remote_storage_url.as_deref()
    }

    pub fn storage_strict(&self) -> bool {
        self.storage_strict
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_bytes
    }

    pub fn cloud_library_url(&self) -> Option<&str> {
        self.cloud_library_url.as_deref()
    }

    pub fn cloud_thumbnail_url(&self) -> &str {
        &self.cloud_thumbnail_url
    }
}
