//! # UploadSession Value Object
//!
//! サーバーが発行したアップロードセッション

/// アップロードセッション
///
/// 初期化呼び出しの成功時に作成され、1回のアップロードの間だけメモリ上に存在する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSession {
    upload_id: String,
    catalog_id: String,
    total_parts: u32,
}

impl UploadSession {
    /// 新しいセッションを作成
    ///
    /// # Arguments
    ///
    /// * `upload_id` - サーバーが発行したアップロードID
    /// * `catalog_id` - 呼び出し側が指定したカタログID
    /// * `total_parts` - パート総数（1以上）
    pub fn new(upload_id: String, catalog_id: String, total_parts: u32) -> Self {
        debug_assert!(total_parts >= 1, "a session always covers at least one part");
        Self {
            upload_id,
            catalog_id,
            total_parts,
        }
    }

    pub fn upload_id(&self) -> &str {
        &self.upload_id
    }

    pub fn catalog_id(&self) -> &str {
        &self.catalog_id
    }

    pub fn total_parts(&self) -> u32 {
        self.total_parts
    }
}
