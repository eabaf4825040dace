//! HTTP Upload Repository Implementation
//!
//! UploadRepositoryのHTTP実装

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::adapter::config::Config;
use crate::adapter::http::client::MultipartApiClient;
use crate::adapter::http::models::complete_form_fields;
use crate::domain::entities::completion_manifest::CompletionManifest;
use crate::domain::repositories::upload_repository::{
    CompleteResponse, InitResponse, PartUploadResponse, UploadRepository,
};

/// HTTPアップロードリポジトリ
pub struct HttpUploadRepository {
    client: MultipartApiClient,
}

impl HttpUploadRepository {
    /// 新しいリポジトリを作成
    pub fn new(client: MultipartApiClient) -> Self {
        Self { client }
    }

    /// 設定からクライアントを作成
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = MultipartApiClient::new(
            &config.base_url,
            config.endpoints.clone(),
            config.request_timeout(),
        )?;
        Ok(Self::new(client))
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl UploadRepository for HttpUploadRepository {
    async fn initialize(&self, file_name: &str, file_checksum: &str) -> Result<InitResponse> {
        Ok(self.client.init(file_name, file_checksum).await?.into())
    }

    async fn upload_part(
        &self,
        upload_id: &str,
        part_number: u32,
        part_path: &Path,
    ) -> Result<PartUploadResponse> {
        Ok(self
            .client
            .upload_part(upload_id, part_number, part_path)
            .await?
            .into())
    }

    async fn complete(
        &self,
        upload_id: &str,
        catalog_id: &str,
        manifest: &CompletionManifest,
    ) -> Result<CompleteResponse> {
        let fields = complete_form_fields(upload_id, catalog_id, manifest);
        Ok(self.client.complete(&fields).await?.into())
    }
}
