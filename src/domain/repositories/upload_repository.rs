//! # Upload Repository Trait
//!
//! リモートサービスへの転送を抽象化

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::completion_manifest::CompletionManifest;

/// 成功を表すアプリケーションステータスコード
pub const STATUS_OK: i64 = 0;

/// 初期化呼び出しの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitResponse {
    pub status_code: i64,
    pub upload_id: Option<String>,
}

/// パートアップロードの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartUploadResponse {
    pub status_code: i64,
    /// サーバーが計算したパートのチェックサム
    pub part_checksum: Option<String>,
    /// 完了時に送り返すリモートキー
    pub part_key: Option<String>,
}

/// 完了呼び出しの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteResponse {
    pub status_code: i64,
}

impl InitResponse {
    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

impl PartUploadResponse {
    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

impl CompleteResponse {
    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

/// アップロードリポジトリ
///
/// マルチパートアップロードの3つのリモート呼び出しを担当する。
/// `Err` は転送レベルの失敗、`Ok` はステータスコード付きの応答を表す。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UploadRepository: Send + Sync {
    /// アップロードセッションを初期化
    ///
    /// # Arguments
    ///
    /// * `file_name` - ソースファイル名
    /// * `file_checksum` - ソースファイル全体のチェックサム
    async fn initialize(&self, file_name: &str, file_checksum: &str) -> Result<InitResponse>;

    /// パートを1つアップロード
    ///
    /// # Arguments
    ///
    /// * `upload_id` - セッションのアップロードID
    /// * `part_number` - 1始まりのパート番号
    /// * `part_path` - パートファイルのパス
    async fn upload_part(
        &self,
        upload_id: &str,
        part_number: u32,
        part_path: &Path,
    ) -> Result<PartUploadResponse>;

    /// マニフェストを送信してアップロードを完了
    async fn complete(
        &self,
        upload_id: &str,
        catalog_id: &str,
        manifest: &CompletionManifest,
    ) -> Result<CompleteResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        let init = InitResponse {
            status_code: 0,
            upload_id: Some("u-1".to_string()),
        };
        assert!(init.is_success());

        let part = PartUploadResponse {
            status_code: 5,
            part_checksum: None,
            part_key: None,
        };
        assert!(!part.is_success());

        assert!(!CompleteResponse { status_code: -1 }.is_success());
    }
}
