//! HTTP Adapter Modules
//!
//! マルチパートアップロードAPIとの通信

pub mod client;
pub mod models;
