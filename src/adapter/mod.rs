//! Adapter Layer
//!
//! 外部システム（HTTP, ファイルシステム, 通知先）との統合

pub mod config;
pub mod http;
pub mod notifier;
pub mod repositories;
