//! # Upload Configuration DTO
//!
//! アップロード設定のData Transfer Object

use crate::application::retry::RetryPolicy;
use crate::domain::services::part_planner::PartLayout;

/// アップロード設定
///
/// パート分割とリトライに必要な設定情報
#[derive(Debug, Clone, Default)]
pub struct UploadConfig {
    /// パートのサイズと命名規則
    pub layout: PartLayout,
    /// パートごとのリトライポリシー
    pub retry: RetryPolicy,
}

impl UploadConfig {
    /// 新しいアップロード設定を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use partup::application::dto::upload_config::UploadConfig;
    /// use partup::application::retry::RetryPolicy;
    /// use partup::domain::services::part_planner::PartLayout;
    ///
    /// let config = UploadConfig::new(
    ///     PartLayout::new(4 * 1024 * 1024, 8192, "video".to_string(), "part".to_string()),
    ///     RetryPolicy::new(3, 500, 8000),
    /// );
    ///
    /// assert_eq!(config.layout.part_size, 4 * 1024 * 1024);
    /// assert_eq!(config.retry.max_retries, 3);
    /// ```
    pub fn new(layout: PartLayout, retry: RetryPolicy) -> Self {
        Self { layout, retry }
    }
}
