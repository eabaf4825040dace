//! # Domain Entities
//!
//! アップロードのエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **FilePart**: 一時ディレクトリに書き出されたパートファイル
//! - **UploadSession**: サーバーが発行したアップロードセッション
//! - **PendingPartQueue**: アップロード待ちのパート
//! - **CompletionManifest**: パート番号とリモートキーの対応表
//! - **UploadPhase**: アップロードの状態遷移

pub mod completion_manifest;
pub mod file_part;
pub mod pending_part_queue;
pub mod upload_phase;
pub mod upload_session;
