//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **InitSessionUseCase**: アップロードセッションの初期化
//! - **UploadPartsUseCase**: パートのアップロードとリトライ
//! - **CompleteUploadUseCase**: マニフェストの送信
//! - **MultipartUploadUseCase**: 分割から完了までの全体の流れ

pub mod complete_upload;
pub mod init_session;
pub mod multipart_upload;
pub mod upload_parts;

#[cfg(test)]
pub(crate) mod test_support;
