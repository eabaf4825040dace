//! # FilePart Entity
//!
//! 分割されたパートファイルのエンティティ

use std::path::{Path, PathBuf};

/// ソースファイル内のバイト範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// ソースファイル先頭からのオフセット
    pub offset: u64,
    /// バイト数
    pub length: u64,
}

impl ByteRange {
    pub fn new(offset: u64, length: u64) -> Self {
        Self { offset, length }
    }

    /// 範囲の終端（排他的）
    pub fn end(&self) -> u64 {
        self.offset + self.length
    }
}

/// パートファイル
///
/// ソースファイルの連続したバイト範囲を保持する一時ファイル。
/// チェックサムは初回アップロード時に計算され、以降のリトライでは再利用される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    part_number: u32,
    path: PathBuf,
    byte_range: ByteRange,
    checksum: Option<String>,
}

impl FilePart {
    /// 新しいパートを作成
    ///
    /// # Arguments
    ///
    /// * `part_number` - 1始まりのパート番号
    /// * `path` - 一時ファイルのパス
    /// * `byte_range` - ソースファイル内の範囲
    pub fn new(part_number: u32, path: PathBuf, byte_range: ByteRange) -> Self {
        Self {
            part_number,
            path,
            byte_range,
            checksum: None,
        }
    }

    #[inline]
    pub fn part_number(&self) -> u32 {
        self.part_number
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn byte_range(&self) -> ByteRange {
        self.byte_range
    }

    /// パートのバイト数
    #[inline]
    pub fn len(&self) -> u64 {
        self.byte_range.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.byte_range.length == 0
    }

    /// キャッシュ済みのチェックサム
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    /// チェックサムをキャッシュする
    ///
    /// 既に値がある場合は上書きせず、既存の値を返す。
    /// パートの内容は変わらないため、一度計算した値は最後まで有効。
    pub fn cache_checksum(&mut self, checksum: String) -> &str {
        self.checksum.get_or_insert(checksum)
    }
}
