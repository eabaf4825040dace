//! # Upload Events
//!
//! 進捗通知イベントと通知先の抽象化

use std::path::PathBuf;

/// 失敗イベントの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// 分割・チェックサム計算などのローカルI/O
    Io,
    /// セッション初期化
    Initialization,
    /// パートのアップロード（リトライ上限到達）
    PartUpload,
    /// 全パート成功後の完了処理
    Completion,
    /// キャンセル
    Cancelled,
    Internal,
}

/// アップロードの進捗イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    /// 分割完了、アップロード開始前に1回だけ
    Started {
        part_count: u32,
        file_name: String,
        file_size: u64,
    },
    /// パートが受理されるたびに1回（受理済みパート数）
    Progress { parts_completed: u32 },
    /// 最終イベント（成功）
    Succeeded { file_path: PathBuf },
    /// 最終イベント（失敗）
    Failed { reason: FailureReason },
}

impl UploadEvent {
    /// 最終イベントかどうか
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadEvent::Succeeded { .. } | UploadEvent::Failed { .. })
    }
}

/// 進捗通知先
///
/// 通知は一方向で、呼び出し側は配送完了を待たない。
/// 実装はブロックしてはならず、どのスレッドから呼ばれても動作すること。
pub trait StatusNotifier: Send + Sync {
    fn notify(&self, event: UploadEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(UploadEvent::Succeeded {
            file_path: PathBuf::from("/videos/a.mp4")
        }
        .is_terminal());
        assert!(UploadEvent::Failed {
            reason: FailureReason::Io
        }
        .is_terminal());
        assert!(!UploadEvent::Progress { parts_completed: 1 }.is_terminal());
    }
}
