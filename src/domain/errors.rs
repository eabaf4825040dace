//! # Upload Errors
//!
//! アップロード失敗の分類

use std::path::PathBuf;

use thiserror::Error;

use super::entities::completion_manifest::ManifestError;
use super::entities::upload_phase::UploadPhase;
use super::events::FailureReason;

/// アップロードエラー
///
/// ステータスコードはサーバーが返した値をそのまま保持する。
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to split source file: {0:#}")]
    Split(anyhow::Error),

    #[error("source file is empty: {}", path.display())]
    EmptySource { path: PathBuf },

    #[error("failed to compute source checksum: {0:#}")]
    SourceChecksum(anyhow::Error),

    #[error("failed to compute checksum of part {part_number}: {error:#}")]
    PartChecksum { part_number: u32, error: anyhow::Error },

    #[error("initialize request failed: {0:#}")]
    InitTransport(anyhow::Error),

    #[error("initialize rejected with status code {status_code}")]
    InitRejected { status_code: i64 },

    #[error("initialize response did not contain an upload id")]
    MissingUploadId,

    #[error("part {part_number} was rejected {attempts} times")]
    PartRetriesExhausted { part_number: u32, attempts: u32 },

    #[error("manifest has {actual} of {expected} parts")]
    IncompleteManifest { expected: u32, actual: usize },

    #[error("accepted part could not be recorded: {0}")]
    Manifest(#[from] ManifestError),

    #[error("complete request failed: {0:#}")]
    CompletionTransport(anyhow::Error),

    #[error("complete rejected with status code {status_code}")]
    CompletionRejected { status_code: i64 },

    #[error("failed to remove temporary parts: {0:#}")]
    Cleanup(anyhow::Error),

    #[error("upload cancelled")]
    Cancelled,

    #[error("upload already started (phase: {phase})")]
    AlreadyStarted { phase: UploadPhase },
}

impl UploadError {
    /// 失敗イベントに載せる分類
    pub fn failure_reason(&self) -> FailureReason {
        match self {
            UploadError::Split(_)
            | UploadError::EmptySource { .. }
            | UploadError::SourceChecksum(_)
            | UploadError::PartChecksum { .. }
            | UploadError::Cleanup(_) => FailureReason::Io,
            UploadError::InitTransport(_)
            | UploadError::InitRejected { .. }
            | UploadError::MissingUploadId => FailureReason::Initialization,
            UploadError::PartRetriesExhausted { .. } => FailureReason::PartUpload,
            UploadError::IncompleteManifest { .. }
            | UploadError::CompletionTransport(_)
            | UploadError::CompletionRejected { .. } => FailureReason::Completion,
            UploadError::Cancelled => FailureReason::Cancelled,
            UploadError::Manifest(_) | UploadError::AlreadyStarted { .. } => {
                FailureReason::Internal
            }
        }
    }

    /// サーバーが返したアプリケーションステータスコード
    pub fn status_code(&self) -> Option<i64> {
        match self {
            UploadError::InitRejected { status_code }
            | UploadError::CompletionRejected { status_code } => Some(*status_code),
            _ => None,
        }
    }
}
