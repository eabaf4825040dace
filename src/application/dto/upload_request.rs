//! # Upload Request DTO
//!
//! 1回のアップロードの入力

use std::path::PathBuf;

/// アップロード要求
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// アップロードするファイル
    pub source: PathBuf,
    /// このアップロード専用の一時ディレクトリ（他のアップロードと共有しないこと）
    pub temp_dir: PathBuf,
    /// 完了時に送るカタログID
    pub catalog_id: String,
}

impl UploadRequest {
    pub fn new(source: PathBuf, temp_dir: PathBuf, catalog_id: String) -> Self {
        Self {
            source,
            temp_dir,
            catalog_id,
        }
    }

    /// ソースファイル名（UTF-8でない部分は置換）
    pub fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        let request = UploadRequest::new(
            PathBuf::from("/videos/holiday.mp4"),
            PathBuf::from("/tmp/upload-1"),
            "catalog-1".to_string(),
        );
        assert_eq!(request.file_name(), "holiday.mp4");
    }

    #[test]
    fn test_file_name_without_component() {
        let request = UploadRequest::new(PathBuf::from("/"), PathBuf::from("/tmp"), String::new());
        assert_eq!(request.file_name(), "");
    }
}
