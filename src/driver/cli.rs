//! CLI Argument Parsing
//!
//! CLIの引数解析

use std::path::PathBuf;

use clap::Parser;

/// 大きなファイルをパートに分割してアップロードするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "partup")]
#[command(about = "Upload a large file in checksummed parts", long_about = None)]
pub struct Args {
    /// File to upload
    pub file: PathBuf,

    /// Config file path
    #[arg(short, long, default_value = "./partup.json")]
    pub config: String,

    /// Catalog to place the uploaded file in (overrides config)
    #[arg(long)]
    pub catalog_id: Option<String>,

    /// Root directory for temporary part files (overrides config)
    #[arg(long)]
    pub temp_dir: Option<String>,

    /// Part size in bytes (overrides config)
    #[arg(long)]
    pub part_size: Option<u64>,

    /// Dry run mode - split and checksum only, don't contact the server
    #[arg(long)]
    pub dry_run: bool,
}
