//! # Complete Upload Use Case
//!
//! マニフェスト送信ユースケース

use std::sync::Arc;

use log::{info, warn};

use crate::domain::entities::completion_manifest::CompletionManifest;
use crate::domain::entities::upload_session::UploadSession;
use crate::domain::errors::UploadError;
use crate::domain::repositories::upload_repository::UploadRepository;

/// 完了ユースケース
///
/// 全パートのリモートキーが揃ったマニフェストを送信してアップロードを確定する
pub struct CompleteUploadUseCase<U: UploadRepository> {
    upload_repository: Arc<U>,
}

impl<U: UploadRepository> CompleteUploadUseCase<U> {
    pub fn new(upload_repository: Arc<U>) -> Self {
        Self { upload_repository }
    }

    /// マニフェストを送信
    ///
    /// # Errors
    ///
    /// - マニフェストのエントリ数がパート総数と一致しない場合（送信しない）
    /// - 転送エラー、または0以外のステータスコードの場合
    pub async fn execute(
        &self,
        session: &UploadSession,
        manifest: &CompletionManifest,
    ) -> Result<(), UploadError> {
        if manifest.total_parts() != session.total_parts() || !manifest.is_complete() {
            return Err(UploadError::IncompleteManifest {
                expected: session.total_parts(),
                actual: manifest.len(),
            });
        }

        info!("Completing upload {} ({} parts)", session.upload_id(), manifest.len());

        let response = self
            .upload_repository
            .complete(session.upload_id(), session.catalog_id(), manifest)
            .await
            .map_err(UploadError::CompletionTransport)?;

        if !response.is_success() {
            warn!("Complete rejected: statusCode is {}", response.status_code);
            return Err(UploadError::CompletionRejected {
                status_code: response.status_code,
            });
        }

        Ok(())
    }
}
