//! Multipart Upload API Client
//!
//! reqwestによるAPI呼び出し

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use reqwest::multipart::{Form, Part};

use super::models::{CompleteResponseJson, InitResponseJson, PartResponseJson};
use crate::adapter::config::EndpointConfig;

/// HTTP client for the three multipart upload endpoints
pub struct MultipartApiClient {
    client: reqwest::Client,
    base_url: String,
    endpoints: EndpointConfig,
}

impl MultipartApiClient {
    pub fn new(base_url: &str, endpoints: EndpointConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoints,
        })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// POST form-encoded `fileName` and `fileMD5`
    pub async fn init(&self, file_name: &str, file_md5: &str) -> Result<InitResponseJson> {
        let url = self.url(&self.endpoints.init);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .form(&[("fileName", file_name), ("fileMD5", file_md5)])
            .send()
            .await
            .with_context(|| format!("POST {} failed", url))?
            .error_for_status()
            .with_context(|| format!("POST {} returned an error status", url))?;

        response
            .json::<InitResponseJson>()
            .await
            .context("Failed to parse init response")
    }

    /// POST multipart form with the part file as body
    ///
    /// Only this part is held in memory.
    pub async fn upload_part(
        &self,
        upload_id: &str,
        part_number: u32,
        part_path: &Path,
    ) -> Result<PartResponseJson> {
        let body = tokio::fs::read(part_path)
            .await
            .with_context(|| format!("Failed to read part file: {}", part_path.display()))?;
        let file_name = part_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("part{}", part_number));

        let form = Form::new()
            .text("uploadId", upload_id.to_string())
            .text("partNumber", part_number.to_string())
            .text("fileName", part_path.display().to_string())
            .part("file", Part::bytes(body).file_name(file_name));

        let url = self.url(&self.endpoints.upload_part);
        debug!("POST {} (part {})", url, part_number);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("POST {} failed", url))?
            .error_for_status()
            .with_context(|| format!("POST {} returned an error status", url))?;

        response
            .json::<PartResponseJson>()
            .await
            .context("Failed to parse uploadPart response")
    }

    /// POST form-encoded manifest fields
    pub async fn complete(&self, fields: &[(String, String)]) -> Result<CompleteResponseJson> {
        let url = self.url(&self.endpoints.complete);
        debug!("POST {} ({} fields)", url, fields.len());
        let response = self
            .client
            .post(&url)
            .form(fields)
            .send()
            .await
            .with_context(|| format!("POST {} failed", url))?
            .error_for_status()
            .with_context(|| format!("POST {} returned an error status", url))?;

        response
            .json::<CompleteResponseJson>()
            .await
            .context("Failed to parse complete response")
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
