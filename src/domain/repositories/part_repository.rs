//! # Part Repository Trait
//!
//! パートファイルの作成と削除を抽象化

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::file_part::FilePart;
use crate::domain::services::part_planner::PartLayout;

/// 分割結果
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// ソースファイルのサイズ
    pub file_size: u64,
    /// パート番号順のパート
    pub parts: Vec<FilePart>,
}

/// パートリポジトリ
///
/// ソースファイルを一時ディレクトリ上のパートファイルに分割する
#[async_trait]
pub trait PartRepository: Send + Sync {
    /// ソースファイルを分割
    ///
    /// 一時ディレクトリが無ければ作成する。
    ///
    /// # Errors
    ///
    /// 読み込み・書き込みに失敗した場合にエラーを返す（リトライしない）
    async fn split(&self, source: &Path, temp_dir: &Path, layout: &PartLayout)
        -> Result<SplitOutcome>;

    /// 一時ディレクトリと残っているパートファイルを全て削除
    ///
    /// ディレクトリが既に無い場合は成功として扱う。
    async fn remove_parts(&self, temp_dir: &Path) -> Result<()>;
}
