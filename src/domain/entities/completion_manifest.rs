//! # CompletionManifest
//!
//! パート番号とリモートキーの対応表

use std::collections::BTreeMap;

use thiserror::Error;

/// マニフェストへの記録エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("part {part_number} is outside 1..={total_parts}")]
    OutOfRange { part_number: u32, total_parts: u32 },
    #[error("part {0} already has a remote key")]
    Duplicate(u32),
}

/// 完了マニフェスト
///
/// 受理されたパートごとに1エントリ。エントリは増える一方で、削除されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionManifest {
    total_parts: u32,
    entries: BTreeMap<u32, String>,
}

impl CompletionManifest {
    pub fn new(total_parts: u32) -> Self {
        Self {
            total_parts,
            entries: BTreeMap::new(),
        }
    }

    /// 受理されたパートのリモートキーを記録する
    ///
    /// # Returns
    ///
    /// 記録後のエントリ数
    ///
    /// # Errors
    ///
    /// パート番号が範囲外、または既に記録済みの場合にエラーを返す
    pub fn record(&mut self, part_number: u32, remote_key: String) -> Result<usize, ManifestError> {
        if part_number == 0 || part_number > self.total_parts {
            return Err(ManifestError::OutOfRange {
                part_number,
                total_parts: self.total_parts,
            });
        }
        if self.entries.contains_key(&part_number) {
            return Err(ManifestError::Duplicate(part_number));
        }
        self.entries.insert(part_number, remote_key);
        Ok(self.entries.len())
    }

    pub fn total_parts(&self) -> u32 {
        self.total_parts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全パートのキーが揃っているか
    pub fn is_complete(&self) -> bool {
        self.entries.len() == self.total_parts as usize
    }

    pub fn get(&self, part_number: u32) -> Option<&str> {
        self.entries.get(&part_number).map(String::as_str)
    }

    /// パート番号の昇順でエントリを返す
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries.iter().map(|(n, key)| (*n, key.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_complete() {
        let mut manifest = CompletionManifest::new(2);

        assert!(manifest.is_empty());
        assert_eq!(manifest.record(2, "key-2".to_string()), Ok(1));
        assert!(!manifest.is_complete());
        assert_eq!(manifest.record(1, "key-1".to_string()), Ok(2));
        assert!(manifest.is_complete());
        assert_eq!(manifest.get(1), Some("key-1"));
    }

    #[test]
    fn test_iter_is_ordered_by_part_number() {
        let mut manifest = CompletionManifest::new(3);
        manifest.record(3, "c".to_string()).unwrap();
        manifest.record(1, "a".to_string()).unwrap();
        manifest.record(2, "b".to_string()).unwrap();

        let entries: Vec<(u32, &str)> = manifest.iter().collect();
        assert_eq!(entries, vec![(1, "a"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn test_record_duplicate_is_rejected() {
        let mut manifest = CompletionManifest::new(2);
        manifest.record(1, "first".to_string()).unwrap();

        assert_eq!(
            manifest.record(1, "second".to_string()),
            Err(ManifestError::Duplicate(1))
        );
        assert_eq!(manifest.get(1), Some("first"));
        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn test_record_out_of_range() {
        let mut manifest = CompletionManifest::new(2);

        assert!(matches!(
            manifest.record(0, "zero".to_string()),
            Err(ManifestError::OutOfRange { part_number: 0, .. })
        ));
        assert!(matches!(
            manifest.record(3, "three".to_string()),
            Err(ManifestError::OutOfRange { part_number: 3, .. })
        ));
    }
}
