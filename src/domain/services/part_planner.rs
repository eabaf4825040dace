//! # Part Planner Service
//!
//! ファイルサイズからパート分割を計画するサービス

use anyhow::{bail, Result};

use crate::domain::entities::file_part::ByteRange;

/// 既定のパートサイズ（1 MiB）
pub const DEFAULT_PART_SIZE: u64 = 1024 * 1024;
/// 既定の読み込みバッファサイズ
pub const DEFAULT_BUFFER_SIZE: usize = 1024;
pub const DEFAULT_PART_PREFIX: &str = "video";
pub const DEFAULT_PART_SUFFIX: &str = "part";

/// パートファイルの大きさと命名規則
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartLayout {
    pub part_size: u64,
    pub buffer_size: usize,
    pub prefix: String,
    pub suffix: String,
}

impl PartLayout {
    pub fn new(part_size: u64, buffer_size: usize, prefix: String, suffix: String) -> Self {
        Self {
            part_size,
            buffer_size,
            prefix,
            suffix,
        }
    }

    /// `<prefix>.<part_number>.<suffix>` 形式のファイル名
    pub fn file_name(&self, part_number: u32) -> String {
        format!("{}.{}.{}", self.prefix, part_number, self.suffix)
    }
}

impl Default for PartLayout {
    fn default() -> Self {
        Self::new(
            DEFAULT_PART_SIZE,
            DEFAULT_BUFFER_SIZE,
            DEFAULT_PART_PREFIX.to_string(),
            DEFAULT_PART_SUFFIX.to_string(),
        )
    }
}

/// パート分割の計画
pub struct PartPlanner;

impl PartPlanner {
    /// パート数 `ceil(file_size / part_size)` を返す
    ///
    /// # Errors
    ///
    /// `part_size` が0、またはパート数が `u32` に収まらない場合にエラーを返す
    pub fn part_count(file_size: u64, part_size: u64) -> Result<u32> {
        if part_size == 0 {
            bail!("part size must be greater than zero");
        }
        let count = file_size.div_ceil(part_size);
        u32::try_from(count).map_err(|_| anyhow::anyhow!("too many parts: {}", count))
    }

    /// 各パートのバイト範囲を返す
    ///
    /// 最後のパート以外は全て `part_size` バイトで、最後のパートが余りを持つ。
    ///
    /// # Examples
    ///
    /// ```
    /// use partup::domain::services::part_planner::PartPlanner;
    ///
    /// let ranges = PartPlanner::plan(25, 10).unwrap();
    /// let lengths: Vec<u64> = ranges.iter().map(|r| r.length).collect();
    /// assert_eq!(lengths, vec![10, 10, 5]);
    /// ```
    pub fn plan(file_size: u64, part_size: u64) -> Result<Vec<ByteRange>> {
        let count = Self::part_count(file_size, part_size)?;
        Ok((0..u64::from(count))
            .map(|index| {
                let offset = index * part_size;
                let length = std::cmp::min(part_size, file_size - offset);
                ByteRange::new(offset, length)
            })
            .collect())
    }
}
