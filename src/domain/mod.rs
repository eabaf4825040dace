//! # Domain Layer
//!
//! このモジュールはアップロードの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - HTTPやファイルシステムの実装を持たない（traitの定義のみ）
//! - フレームワークに依存しない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: FilePart, UploadSession, PendingPartQueue, CompletionManifest, UploadPhase
//! - **repositories**: Repository trait（転送・分割・チェックサム）
//! - **services**: Domain Service（パート分割の計画）
//! - **events**: 進捗通知イベントと通知先trait
//! - **errors**: アップロードエラーの分類

pub mod entities;
pub mod errors;
pub mod events;
pub mod repositories;
pub mod services;
