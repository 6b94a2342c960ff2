//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use clipshelf_core::Config;

/// Uploads above this size are buffered whole in memory; warn the operator.
const LARGE_UPLOAD_WARN_BYTES: usize = 512 * 1024 * 1024;

/// Validate critical configuration values
///
/// Hard errors come from [`Config::validate`]; the remaining checks only warn.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();

    if is_production && config.cors_allow_origin() == "*" {
        tracing::warn!(
            "CORS allows all origins (*) in production; set CORS_ALLOW_ORIGIN to restrict it"
        );
    }

    if config.max_upload_size_bytes() > LARGE_UPLOAD_WARN_BYTES {
        tracing::warn!(
            max_upload_size_bytes = config.max_upload_size_bytes(),
            "MAX_UPLOAD_SIZE_MB is very high - request bodies are held in memory while decoding"
        );
    }

    if let Some(url) = config.remote_storage_url() {
        if is_production && url.starts_with("http://") {
            tracing::warn!("Remote storage URL uses plain http; its credential travels unencrypted");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::from_map(&HashMap::new()).unwrap();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let mut config = Config::from_map(&HashMap::new()).unwrap();
        config.local_storage_base_url = "uploads".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_production_config_is_judged_from_config_alone() {
        let mut vars = HashMap::new();
        vars.insert("ENVIRONMENT".to_string(), "production".to_string());
        vars.insert("CORS_ALLOW_ORIGIN".to_string(), "https://videos.example.com".to_string());
        let config = Config::from_map(&vars).unwrap();
        assert!(config.is_production());
        assert!(validate_config(&config).is_ok());
    }
}
