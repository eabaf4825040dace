//! MD5 Checksum Repository Implementation
//!
//! ChecksumRepositoryのMD5実装

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use md5::{Digest, Md5};

use crate::domain::repositories::checksum_repository::ChecksumRepository;

const READ_BUFFER_SIZE: usize = 8192;

/// MD5チェックサムリポジトリ（小文字16進）
pub struct Md5ChecksumRepository;

impl Md5ChecksumRepository {
    pub fn new() -> Self {
        Self
    }

    /// ファイルを読みながらMD5を計算する（同期処理）
    fn checksum_sync(path: &Path) -> Result<String> {
        let mut file = File::open(path)
            .with_context(|| format!("Failed to open file for checksum: {}", path.display()))?;
        let mut hasher = Md5::new();
        let mut buf = [0u8; READ_BUFFER_SIZE];
        loop {
            let n = file
                .read(&mut buf)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(hex::encode(hasher.finalize()))
    }
}

#[async_trait]
impl ChecksumRepository for Md5ChecksumRepository {
    async fn file_checksum(&self, path: &Path) -> Result<String> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::checksum_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

impl Default for Md5ChecksumRepository {
    fn default() -> Self {
        Self::new()
    }
}
