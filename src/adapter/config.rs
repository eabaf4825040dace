//! Configuration
//!
//! JSON設定ファイルの読み込み

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::dto::upload_config::UploadConfig;
use crate::application::retry::{
    RetryPolicy, INITIAL_RETRY_DELAY_MS, MAX_RETRIES, MAX_RETRY_DELAY_MS,
};
use crate::domain::services::part_planner::{
    PartLayout, DEFAULT_BUFFER_SIZE, DEFAULT_PART_PREFIX, DEFAULT_PART_SIZE, DEFAULT_PART_SUFFIX,
};

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Remote endpoint paths, relative to `base_url`
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct EndpointConfig {
    pub init: String,
    pub upload_part: String,
    pub complete: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            init: "/video/multipartUpload/init.api".to_string(),
            upload_part: "/video/multipartUpload/uploadPart.api".to_string(),
            complete: "/video/multipartUpload/complete.api".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub base_url: String,
    #[serde(default)]
    pub catalog_id: String,
    /// Root under which each upload gets its own directory (`~` is expanded)
    #[serde(default = "default_temp_dir")]
    pub temp_dir: String,

    // Splitting
    #[serde(default = "default_part_size")]
    pub part_size: u64,
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    #[serde(default = "default_part_prefix")]
    pub part_prefix: String,
    #[serde(default = "default_part_suffix")]
    pub part_suffix: String,

    // Retry
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_initial_retry_delay_ms")]
    pub initial_retry_delay_ms: u64,
    #[serde(default = "default_max_retry_delay_ms")]
    pub max_retry_delay_ms: u64,

    // HTTP
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

fn default_temp_dir() -> String {
    std::env::temp_dir()
        .join("partup")
        .to_string_lossy()
        .into_owned()
}

fn default_part_size() -> u64 {
    DEFAULT_PART_SIZE
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

fn default_part_prefix() -> String {
    DEFAULT_PART_PREFIX.to_string()
}

fn default_part_suffix() -> String {
    DEFAULT_PART_SUFFIX.to_string()
}

fn default_max_retries() -> u32 {
    MAX_RETRIES
}

fn default_initial_retry_delay_ms() -> u64 {
    INITIAL_RETRY_DELAY_MS
}

fn default_max_retry_delay_ms() -> u64 {
    MAX_RETRY_DELAY_MS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Config =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            bail!("base_url must not be empty");
        }
        if self.part_size == 0 {
            bail!("part_size must be greater than zero");
        }
        if self.buffer_size == 0 {
            bail!("buffer_size must be greater than zero");
        }
        if self.part_prefix.is_empty() || self.part_suffix.is_empty() {
            bail!("part_prefix and part_suffix must not be empty");
        }
        Ok(())
    }

    /// Temp root with `~` expanded
    pub fn temp_root(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.temp_dir).as_ref())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn upload_config(&self) -> UploadConfig {
        UploadConfig::new(
            PartLayout::new(
                self.part_size,
                self.buffer_size,
                self.part_prefix.clone(),
                self.part_suffix.clone(),
            ),
            RetryPolicy::new(
                self.max_retries,
                self.initial_retry_delay_ms,
                self.max_retry_delay_ms,
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_minimal_config_uses_defaults() {
        let file = write_config(r#"{ "base_url": "https://video.example.com" }"#);

        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.base_url, "https://video.example.com");
        assert_eq!(config.part_size, DEFAULT_PART_SIZE);
        assert_eq!(config.buffer_size, 1024);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.endpoints, EndpointConfig::default());
        assert!(config.catalog_id.is_empty());
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"{
            "base_url": "http://localhost:8080",
            "catalog_id": "catalog-7",
            "temp_dir": "/var/tmp/partup",
            "part_size": 4096,
            "buffer_size": 512,
            "part_prefix": "clip",
            "part_suffix": "bin",
            "max_retries": 2,
            "initial_retry_delay_ms": 10,
            "max_retry_delay_ms": 40,
            "request_timeout_secs": 5,
            "endpoints": { "init": "/init" }
        }"#,
        );

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        let upload_config = config.upload_config();

        assert_eq!(config.catalog_id, "catalog-7");
        assert_eq!(config.temp_root(), PathBuf::from("/var/tmp/partup"));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.endpoints.init, "/init");
        assert_eq!(
            config.endpoints.complete,
            "/video/multipartUpload/complete.api"
        );
        assert_eq!(upload_config.layout.file_name(2), "clip.2.bin");
        assert_eq!(upload_config.layout.part_size, 4096);
        assert_eq!(upload_config.retry, RetryPolicy::new(2, 10, 40));
    }

    #[test]
    fn test_load_rejects_zero_part_size() {
        let file = write_config(r#"{ "base_url": "http://localhost", "part_size": 0 }"#);
        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_load_rejects_missing_base_url() {
        let file = write_config(r#"{ "catalog_id": "c" }"#);
        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("/nonexistent/partup.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_temp_root_expands_tilde() {
        let file =
            write_config(r#"{ "base_url": "http://localhost", "temp_dir": "~/partup-tmp" }"#);
        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert!(config.temp_root().ends_with("partup-tmp"));
        if let Ok(home) = std::env::var("HOME") {
            assert!(config.temp_root().starts_with(home));
        }
    }
}
