//! Partup - Multipart File Uploader
//!
//! 大きなファイルをパートに分割してアップロード

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use partup::adapter::config::Config;
use partup::driver::{Args, FileUploadWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Create workflow with injected configuration
    let workflow = FileUploadWorkflow::new(config);

    workflow.execute(args).await
}
