//! # DTOs
//!
//! ユースケースに渡す設定と要求

pub mod upload_config;
pub mod upload_request;
