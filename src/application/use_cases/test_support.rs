//! Test doubles shared by the use case tests

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::file_part::{ByteRange, FilePart};
use crate::domain::events::{StatusNotifier, UploadEvent};
use crate::domain::repositories::checksum_repository::ChecksumRepository;
use crate::domain::repositories::part_repository::{PartRepository, SplitOutcome};
use crate::domain::services::part_planner::PartLayout;

/// Checksum derived from the file name, so a fake server can echo it back
pub fn fake_checksum(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("sum-{}", name)
}

#[derive(Default)]
pub struct CountingChecksumRepository {
    calls: Mutex<HashMap<PathBuf, u32>>,
}

impl CountingChecksumRepository {
    pub fn calls_for(&self, path: &Path) -> u32 {
        self.calls.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> u32 {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl ChecksumRepository for CountingChecksumRepository {
    async fn file_checksum(&self, path: &Path) -> Result<String> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(path.to_path_buf())
            .or_insert(0) += 1;
        Ok(fake_checksum(path))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<UploadEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<UploadEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn progress_values(&self) -> Vec<u32> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                UploadEvent::Progress { parts_completed } => Some(parts_completed),
                _ => None,
            })
            .collect()
    }
}

impl StatusNotifier for RecordingNotifier {
    fn notify(&self, event: UploadEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Parts under `/tmp/fake-upload`; the files themselves never exist
pub fn create_test_parts(count: u32) -> Vec<FilePart> {
    let layout = PartLayout::default();
    (1..=count)
        .map(|n| {
            FilePart::new(
                n,
                PathBuf::from("/tmp/fake-upload").join(layout.file_name(n)),
                ByteRange::new(u64::from(n - 1) * 100, 100),
            )
        })
        .collect()
}

/// In-memory splitter that hands out a fixed number of parts
pub struct FakePartRepository {
    part_count: u32,
    fail_split: bool,
    fail_removal: bool,
    removals: AtomicU32,
}

impl FakePartRepository {
    pub fn new(part_count: u32) -> Self {
        Self {
            part_count,
            fail_split: false,
            fail_removal: false,
            removals: AtomicU32::new(0),
        }
    }

    /// Splits normally, but the temp directory cannot be removed
    pub fn with_failing_removal(part_count: u32) -> Self {
        Self {
            fail_removal: true,
            ..Self::new(part_count)
        }
    }

    pub fn failing() -> Self {
        Self {
            part_count: 0,
            fail_split: true,
            fail_removal: false,
            removals: AtomicU32::new(0),
        }
    }

    pub fn removals(&self) -> u32 {
        self.removals.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PartRepository for FakePartRepository {
    async fn split(
        &self,
        _source: &Path,
        _temp_dir: &Path,
        _layout: &PartLayout,
    ) -> Result<SplitOutcome> {
        if self.fail_split {
            anyhow::bail!("No space left on device");
        }
        Ok(SplitOutcome {
            file_size: u64::from(self.part_count) * 100,
            parts: create_test_parts(self.part_count),
        })
    }

    async fn remove_parts(&self, _temp_dir: &Path) -> Result<()> {
        self.removals.fetch_add(1, Ordering::SeqCst);
        if self.fail_removal {
            anyhow::bail!("Permission denied");
        }
        Ok(())
    }
}
