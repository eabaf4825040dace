//! # Checksum Repository Trait
//!
//! ファイルのチェックサム計算を抽象化

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

/// チェックサムリポジトリ
#[async_trait]
pub trait ChecksumRepository: Send + Sync {
    /// ファイル全体のチェックサムを16進文字列で返す
    async fn file_checksum(&self, path: &Path) -> Result<String>;
}
