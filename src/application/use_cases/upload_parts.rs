//! # Upload Parts Use Case
//!
//! パートアップロードとリトライのユースケース

use std::collections::HashMap;
use std::sync::Arc;

use log::{info, warn};
use thiserror::Error;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::application::retry::RetryPolicy;
use crate::domain::entities::completion_manifest::CompletionManifest;
use crate::domain::entities::file_part::FilePart;
use crate::domain::entities::pending_part_queue::PendingPartQueue;
use crate::domain::entities::upload_session::UploadSession;
use crate::domain::errors::UploadError;
use crate::domain::events::{StatusNotifier, UploadEvent};
use crate::domain::repositories::checksum_repository::ChecksumRepository;
use crate::domain::repositories::upload_repository::UploadRepository;

/// パートが受理されなかった理由
#[derive(Debug, Error)]
enum PartRejection {
    #[error("transport error: {0:#}")]
    Transport(anyhow::Error),
    #[error("statusCode is {0}")]
    Status(i64),
    #[error("checksum mismatch (local {local}, remote {remote:?})")]
    ChecksumMismatch {
        local: String,
        remote: Option<String>,
    },
    #[error("response did not contain a part key")]
    MissingPartKey,
}

/// パートアップロードユースケース
///
/// キューが空になるまでパートを1つずつアップロードし、受理されたパートを
/// マニフェストに記録する。拒否されたパートはキューの先頭に戻され、
/// 待ち時間を置いて再送される。
pub struct UploadPartsUseCase<U: UploadRepository, C: ChecksumRepository> {
    upload_repository: Arc<U>,
    checksum_repository: Arc<C>,
    notifier: Arc<dyn StatusNotifier>,
    retry: RetryPolicy,
}

impl<U: UploadRepository, C: ChecksumRepository> UploadPartsUseCase<U, C> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `upload_repository` - アップロードリポジトリ
    /// * `checksum_repository` - チェックサムリポジトリ
    /// * `notifier` - 進捗通知先
    /// * `retry` - パートごとのリトライポリシー
    pub fn new(
        upload_repository: Arc<U>,
        checksum_repository: Arc<C>,
        notifier: Arc<dyn StatusNotifier>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            upload_repository,
            checksum_repository,
            notifier,
            retry,
        }
    }

    /// 全パートをアップロード
    ///
    /// # Returns
    ///
    /// 受理されたパートのマニフェスト
    ///
    /// # Errors
    ///
    /// - パートのチェックサム計算に失敗した場合
    /// - あるパートがリトライ上限まで拒否された場合
    /// - キャンセルされた場合
    pub async fn execute(
        &self,
        session: &UploadSession,
        parts: Vec<FilePart>,
        cancel: &CancellationToken,
    ) -> Result<CompletionManifest, UploadError> {
        let mut manifest = CompletionManifest::new(session.total_parts());
        let mut queue = PendingPartQueue::new(parts);
        let mut failed_attempts: HashMap<u32, u32> = HashMap::new();

        while let Some(mut part) = queue.pop_next() {
            if cancel.is_cancelled() {
                return Err(UploadError::Cancelled);
            }

            let part_number = part.part_number();
            let checksum = self.checksum_for(&mut part).await?;

            match self.try_upload(session, &part, &checksum).await {
                Ok(part_key) => {
                    let accepted = manifest.record(part_number, part_key)?;
                    info!(
                        "Part {} uploaded ({}/{})",
                        part_number,
                        accepted,
                        session.total_parts()
                    );
                    self.notifier.notify(UploadEvent::Progress {
                        parts_completed: accepted as u32,
                    });
                }
                Err(rejection) => {
                    let attempts = failed_attempts.entry(part_number).or_insert(0);
                    *attempts += 1;

                    if *attempts >= self.retry.max_attempts() {
                        warn!(
                            "✗ Part {} failed after {} attempts: {}",
                            part_number, attempts, rejection
                        );
                        return Err(UploadError::PartRetriesExhausted {
                            part_number,
                            attempts: *attempts,
                        });
                    }

                    let delay = self.retry.delay_for(*attempts);
                    warn!(
                        "⚠ Part {} failed (attempt {}), retrying in {}ms: {}",
                        part_number,
                        attempts,
                        delay.as_millis(),
                        rejection
                    );
                    queue.requeue(part);

                    if !delay.is_zero() {
                        tokio::select! {
                            _ = cancel.cancelled() => return Err(UploadError::Cancelled),
                            _ = sleep(delay) => {}
                        }
                    }
                }
            }
        }

        Ok(manifest)
    }

    /// キャッシュ済みのチェックサムを返す。無ければ計算してキャッシュする
    async fn checksum_for(&self, part: &mut FilePart) -> Result<String, UploadError> {
        if let Some(checksum) = part.checksum() {
            return Ok(checksum.to_string());
        }

        let part_number = part.part_number();
        let computed = self
            .checksum_repository
            .file_checksum(part.path())
            .await
            .map_err(|error| UploadError::PartChecksum { part_number, error })?;

        Ok(part.cache_checksum(computed).to_string())
    }

    /// 1回だけ送信し、受理されればリモートキーを返す
    async fn try_upload(
        &self,
        session: &UploadSession,
        part: &FilePart,
        checksum: &str,
    ) -> Result<String, PartRejection> {
        let response = self
            .upload_repository
            .upload_part(session.upload_id(), part.part_number(), part.path())
            .await
            .map_err(PartRejection::Transport)?;

        if !response.is_success() {
            return Err(PartRejection::Status(response.status_code));
        }

        let checksum_matches = response
            .part_checksum
            .as_deref()
            .is_some_and(|remote| remote.eq_ignore_ascii_case(checksum));
        if !checksum_matches {
            return Err(PartRejection::ChecksumMismatch {
                local: checksum.to_string(),
                remote: response.part_checksum,
            });
        }

        response
            .part_key
            .filter(|key| !key.is_empty())
            .ok_or(PartRejection::MissingPartKey)
    }
}
