//! # PendingPartQueue
//!
//! アップロード待ちパートのキュー

use std::collections::VecDeque;

use super::file_part::FilePart;

/// アップロード待ちパートのキュー
///
/// サーバーに受理されたパートは取り除かれ、拒否されたパートは先頭に戻される。
#[derive(Debug, Default)]
pub struct PendingPartQueue {
    parts: VecDeque<FilePart>,
}

impl PendingPartQueue {
    /// パートのリストからキューを作成
    pub fn new(parts: Vec<FilePart>) -> Self {
        Self {
            parts: parts.into(),
        }
    }

    /// 次にアップロードするパートを取り出す
    pub fn pop_next(&mut self) -> Option<FilePart> {
        self.parts.pop_front()
    }

    /// 拒否されたパートを再投入する
    ///
    /// 次のループで同じパートが再送される。
    pub fn requeue(&mut self, part: FilePart) {
        self.parts.push_front(part);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl From<Vec<FilePart>> for PendingPartQueue {
    fn from(parts: Vec<FilePart>) -> Self {
        Self::new(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::file_part::ByteRange;
    use std::path::PathBuf;

    fn create_test_part(number: u32) -> FilePart {
        FilePart::new(
            number,
            PathBuf::from(format!("/tmp/video.{}.part", number)),
            ByteRange::new(u64::from(number - 1) * 10, 10),
        )
    }

    #[test]
    fn test_pop_in_order() {
        let mut queue = PendingPartQueue::new(vec![create_test_part(1), create_test_part(2)]);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop_next().unwrap().part_number(), 1);
        assert_eq!(queue.pop_next().unwrap().part_number(), 2);
        assert!(queue.pop_next().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_requeue_goes_to_front() {
        let mut queue: PendingPartQueue = vec![create_test_part(1), create_test_part(2)].into();

        let mut first = queue.pop_next().unwrap();
        first.cache_checksum("cafe".to_string());
        queue.requeue(first);

        let retried = queue.pop_next().unwrap();
        assert_eq!(retried.part_number(), 1);
        assert_eq!(retried.checksum(), Some("cafe"));
        assert_eq!(queue.len(), 1);
    }
}
