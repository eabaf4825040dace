//! # Init Session Use Case
//!
//! アップロードセッション初期化ユースケース

use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};

use crate::domain::entities::upload_session::UploadSession;
use crate::domain::errors::UploadError;
use crate::domain::repositories::checksum_repository::ChecksumRepository;
use crate::domain::repositories::upload_repository::UploadRepository;

/// セッション初期化ユースケース
///
/// ソースファイル名とファイル全体のチェックサムを送り、アップロードIDを受け取る
pub struct InitSessionUseCase<U: UploadRepository, C: ChecksumRepository> {
    upload_repository: Arc<U>,
    checksum_repository: Arc<C>,
}

impl<U: UploadRepository, C: ChecksumRepository> InitSessionUseCase<U, C> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `upload_repository` - アップロードリポジトリ
    /// * `checksum_repository` - チェックサムリポジトリ
    pub fn new(upload_repository: Arc<U>, checksum_repository: Arc<C>) -> Self {
        Self {
            upload_repository,
            checksum_repository,
        }
    }

    /// セッションを初期化
    ///
    /// # Arguments
    ///
    /// * `source` - ソースファイルのパス
    /// * `file_name` - サーバーに送るファイル名
    /// * `catalog_id` - カタログID
    /// * `total_parts` - パート総数
    ///
    /// # Errors
    ///
    /// 転送エラー、0以外のステータスコード、アップロードIDの欠落の場合にエラーを返す
    pub async fn execute(
        &self,
        source: &Path,
        file_name: &str,
        catalog_id: &str,
        total_parts: u32,
    ) -> Result<UploadSession, UploadError> {
        let checksum = self
            .checksum_repository
            .file_checksum(source)
            .await
            .map_err(UploadError::SourceChecksum)?;
        debug!("File checksum of {} is {}", file_name, checksum);

        let response = self
            .upload_repository
            .initialize(file_name, &checksum)
            .await
            .map_err(UploadError::InitTransport)?;

        if !response.is_success() {
            warn!("Initialize rejected: statusCode is {}", response.status_code);
            return Err(UploadError::InitRejected {
                status_code: response.status_code,
            });
        }

        let upload_id = response
            .upload_id
            .filter(|id| !id.is_empty())
            .ok_or(UploadError::MissingUploadId)?;

        Ok(UploadSession::new(
            upload_id,
            catalog_id.to_string(),
            total_parts,
        ))
    }
}
