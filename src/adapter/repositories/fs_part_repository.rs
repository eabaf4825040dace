//! File System Part Repository Implementation
//!
//! PartRepositoryのファイルシステム実装（ソースファイルをパートファイルに分割）

use std::cmp;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use log::{debug, info};

use crate::domain::entities::file_part::FilePart;
use crate::domain::repositories::part_repository::{PartRepository, SplitOutcome};
use crate::domain::services::part_planner::{PartLayout, PartPlanner};

/// ファイルシステムベースのパートリポジトリ
pub struct FsPartRepository;

impl FsPartRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// ソースファイルを分割する（同期処理）
    ///
    /// ソースは先頭から順に読み、最後の読み込みはパート境界を越えないように縮める。
    fn split_sync(source: &Path, temp_dir: &Path, layout: &PartLayout) -> Result<SplitOutcome> {
        if layout.buffer_size == 0 {
            bail!("buffer size must be greater than zero");
        }

        fs::create_dir_all(temp_dir).with_context(|| {
            format!("Failed to create temporary directory: {}", temp_dir.display())
        })?;

        let mut input = File::open(source)
            .with_context(|| format!("Failed to open source file: {}", source.display()))?;
        let file_size = input
            .metadata()
            .context("Failed to read source file metadata")?
            .len();

        let ranges = PartPlanner::plan(file_size, layout.part_size)?;
        let mut buffer = vec![0u8; layout.buffer_size];
        let mut parts = Vec::with_capacity(ranges.len());

        for (part_number, range) in (1u32..).zip(ranges) {
            let path = temp_dir.join(layout.file_name(part_number));
            let file = File::create(&path)
                .with_context(|| format!("Failed to create part file: {}", path.display()))?;
            let mut output = BufWriter::new(file);

            let mut remaining = range.length;
            while remaining > 0 {
                let chunk = cmp::min(remaining, buffer.len() as u64) as usize;
                input
                    .read_exact(&mut buffer[..chunk])
                    .with_context(|| format!("Failed to read part {} from source", part_number))?;
                output
                    .write_all(&buffer[..chunk])
                    .with_context(|| format!("Failed to write part file: {}", path.display()))?;
                remaining -= chunk as u64;
            }
            output
                .flush()
                .with_context(|| format!("Failed to write part file: {}", path.display()))?;

            debug!("Wrote {} ({} bytes)", path.display(), range.length);
            parts.push(FilePart::new(part_number, path, range));
        }

        info!(
            "Split {} ({} bytes) into {} parts",
            source.display(),
            file_size,
            parts.len()
        );

        Ok(SplitOutcome { file_size, parts })
    }

    /// 一時ディレクトリを削除する（同期処理）
    fn remove_parts_sync(temp_dir: &Path) -> Result<()> {
        match fs::remove_dir_all(temp_dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to remove temporary directory: {}", temp_dir.display())
            }),
        }
    }
}

#[async_trait]
impl PartRepository for FsPartRepository {
    async fn split(
        &self,
        source: &Path,
        temp_dir: &Path,
        layout: &PartLayout,
    ) -> Result<SplitOutcome> {
        let source = source.to_path_buf();
        let temp_dir = temp_dir.to_path_buf();
        let layout = layout.clone();
        tokio::task::spawn_blocking(move || Self::split_sync(&source, &temp_dir, &layout))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn remove_parts(&self, temp_dir: &Path) -> Result<()> {
        let temp_dir: PathBuf = temp_dir.to_path_buf();
        tokio::task::spawn_blocking(move || Self::remove_parts_sync(&temp_dir))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

impl Default for FsPartRepository {
    fn default() -> Self {
        Self::new()
    }
}
