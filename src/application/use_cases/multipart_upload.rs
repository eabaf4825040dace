//! # Multipart Upload Use Case
//!
//! 分割 → セッション初期化 → パートアップロード → 完了 の全体を進めるユースケース

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{error, info, warn};
use tokio_util::sync::CancellationToken;

use crate::application::dto::upload_config::UploadConfig;
use crate::application::dto::upload_request::UploadRequest;
use crate::application::use_cases::complete_upload::CompleteUploadUseCase;
use crate::application::use_cases::init_session::InitSessionUseCase;
use crate::application::use_cases::upload_parts::UploadPartsUseCase;
use crate::domain::entities::completion_manifest::CompletionManifest;
use crate::domain::entities::upload_phase::UploadPhase;
use crate::domain::errors::UploadError;
use crate::domain::events::{StatusNotifier, UploadEvent};
use crate::domain::repositories::checksum_repository::ChecksumRepository;
use crate::domain::repositories::part_repository::PartRepository;
use crate::domain::repositories::upload_repository::UploadRepository;
use crate::domain::services::part_planner::PartLayout;

/// アップロード結果のレポート
#[derive(Debug, Clone)]
pub struct UploadReport {
    pub upload_id: String,
    pub file_size: u64,
    pub total_parts: u32,
    pub manifest: CompletionManifest,
}

/// マルチパートアップロードユースケース
///
/// 1インスタンスにつき1回のアップロードを担当する。
/// 結果に関係なく、戻る前に一時ディレクトリを削除し、最終イベントを1回だけ通知する。
pub struct MultipartUploadUseCase<U: UploadRepository, P: PartRepository, C: ChecksumRepository> {
    part_repository: Arc<P>,
    init_use_case: InitSessionUseCase<U, C>,
    upload_parts_use_case: UploadPartsUseCase<U, C>,
    complete_use_case: CompleteUploadUseCase<U>,
    notifier: Arc<dyn StatusNotifier>,
    layout: PartLayout,
    phase: Mutex<UploadPhase>,
}

impl<U: UploadRepository, P: PartRepository, C: ChecksumRepository>
    MultipartUploadUseCase<U, P, C>
{
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `upload_repository` - アップロードリポジトリ
    /// * `part_repository` - パートリポジトリ
    /// * `checksum_repository` - チェックサムリポジトリ
    /// * `notifier` - 進捗通知先
    /// * `config` - アップロード設定
    pub fn new(
        upload_repository: Arc<U>,
        part_repository: Arc<P>,
        checksum_repository: Arc<C>,
        notifier: Arc<dyn StatusNotifier>,
        config: UploadConfig,
    ) -> Self {
        let init_use_case =
            InitSessionUseCase::new(upload_repository.clone(), checksum_repository.clone());
        let upload_parts_use_case = UploadPartsUseCase::new(
            upload_repository.clone(),
            checksum_repository,
            notifier.clone(),
            config.retry,
        );
        let complete_use_case = CompleteUploadUseCase::new(upload_repository);

        Self {
            part_repository,
            init_use_case,
            upload_parts_use_case,
            complete_use_case,
            notifier,
            layout: config.layout,
            phase: Mutex::new(UploadPhase::Idle),
        }
    }

    /// 現在の状態
    pub fn phase(&self) -> UploadPhase {
        *self.lock_phase()
    }

    /// アップロードを実行
    ///
    /// # Arguments
    ///
    /// * `request` - アップロード要求
    /// * `cancel` - キャンセル用トークン（パートの送信前とリトライ待ちの間に確認する）
    ///
    /// # Errors
    ///
    /// 分割・初期化・パートアップロード・完了・一時ディレクトリ削除のいずれかが失敗した場合。
    /// 削除の失敗は、それ以前に失敗していなければ `Cleanup` として返る。
    /// 2回目の呼び出しは `AlreadyStarted` を返し、イベントもクリーンアップも行わない。
    pub async fn execute(
        &self,
        request: &UploadRequest,
        cancel: &CancellationToken,
    ) -> Result<UploadReport, UploadError> {
        {
            let mut phase = self.lock_phase();
            if *phase != UploadPhase::Idle {
                return Err(UploadError::AlreadyStarted { phase: *phase });
            }
            *phase = UploadPhase::Splitting;
        }
        info!("Starting multipart upload of {}", request.source.display());

        let result = match (
            self.run(request, cancel).await,
            self.cleanup(&request.temp_dir).await,
        ) {
            (result, Ok(())) => result,
            (Ok(_), Err(cleanup_error)) => Err(cleanup_error),
            (Err(e), Err(cleanup_error)) => {
                warn!("{}", cleanup_error);
                Err(e)
            }
        };

        match result {
            Ok(report) => {
                self.transition(UploadPhase::Succeeded);
                info!(
                    "Multipart upload {} succeeded ({} parts)",
                    report.upload_id, report.total_parts
                );
                let file_path = std::path::absolute(&request.source)
                    .unwrap_or_else(|_| request.source.clone());
                self.notifier.notify(UploadEvent::Succeeded { file_path });
                Ok(report)
            }
            Err(e) => {
                self.transition(UploadPhase::Failed);
                error!("Multipart upload failed: {}", e);
                self.notifier.notify(UploadEvent::Failed {
                    reason: e.failure_reason(),
                });
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        request: &UploadRequest,
        cancel: &CancellationToken,
    ) -> Result<UploadReport, UploadError> {
        ensure_not_cancelled(cancel)?;

        let split = self
            .part_repository
            .split(&request.source, &request.temp_dir, &self.layout)
            .await
            .map_err(UploadError::Split)?;
        if split.parts.is_empty() {
            return Err(UploadError::EmptySource {
                path: request.source.clone(),
            });
        }
        let total_parts = u32::try_from(split.parts.len())
            .map_err(|_| UploadError::Split(anyhow::anyhow!("too many parts")))?;

        let file_name = request.file_name();
        info!("Split {} into {} parts", file_name, total_parts);
        self.notifier.notify(UploadEvent::Started {
            part_count: total_parts,
            file_name: file_name.clone(),
            file_size: split.file_size,
        });

        ensure_not_cancelled(cancel)?;
        self.transition(UploadPhase::SessionInit);
        let session = self
            .init_use_case
            .execute(&request.source, &file_name, &request.catalog_id, total_parts)
            .await?;
        info!("Initialized upload session {}", session.upload_id());

        self.transition(UploadPhase::UploadingParts);
        let manifest = self
            .upload_parts_use_case
            .execute(&session, split.parts, cancel)
            .await?;

        self.transition(UploadPhase::Completing);
        self.complete_use_case.execute(&session, &manifest).await?;

        Ok(UploadReport {
            upload_id: session.upload_id().to_string(),
            file_size: split.file_size,
            total_parts,
            manifest,
        })
    }

    /// 一時ディレクトリの削除
    async fn cleanup(&self, temp_dir: &Path) -> Result<(), UploadError> {
        self.part_repository
            .remove_parts(temp_dir)
            .await
            .map_err(UploadError::Cleanup)?;
        info!("Removed temporary parts in {}", temp_dir.display());
        Ok(())
    }

    fn transition(&self, next: UploadPhase) {
        let mut phase = self.lock_phase();
        if !phase.can_transition_to(next) {
            warn!("Unexpected phase transition {} -> {}", *phase, next);
        }
        log::debug!("Upload phase: {} -> {}", *phase, next);
        *phase = next;
    }

    fn lock_phase(&self) -> MutexGuard<'_, UploadPhase> {
        self.phase.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn ensure_not_cancelled(cancel: &CancellationToken) -> Result<(), UploadError> {
    if cancel.is_cancelled() {
        return Err(UploadError::Cancelled);
    }
    Ok(())
}
