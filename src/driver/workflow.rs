//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::{info, warn};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::adapter::config::Config;
use crate::adapter::notifier::ChannelNotifier;
use crate::adapter::repositories::fs_part_repository::FsPartRepository;
use crate::adapter::repositories::http_upload_repository::HttpUploadRepository;
use crate::adapter::repositories::md5_checksum_repository::Md5ChecksumRepository;
use crate::application::dto::upload_config::UploadConfig;
use crate::application::dto::upload_request::UploadRequest;
use crate::application::use_cases::multipart_upload::MultipartUploadUseCase;
use crate::domain::events::UploadEvent;
use crate::domain::repositories::checksum_repository::ChecksumRepository;
use crate::domain::repositories::part_repository::PartRepository;

use super::cli::Args;

/// Per-upload temporary directory, so two uploads never share part files
pub fn unique_temp_dir(root: &Path) -> PathBuf {
    root.join(format!("upload-{}", Uuid::new_v4()))
}

/// CLI value wins over the config value; empty strings count as unset
pub fn resolve_catalog_id(cli_value: Option<&str>, config_value: &str) -> Option<String> {
    cli_value
        .filter(|id| !id.is_empty())
        .or(Some(config_value).filter(|id| !id.is_empty()))
        .map(str::to_string)
}

/// One line of console output for an upload event
pub fn describe_event(event: &UploadEvent, total_parts: u32) -> String {
    match event {
        UploadEvent::Started {
            part_count,
            file_name,
            file_size,
        } => format!(
            "✓ Split {} ({} bytes) into {} parts",
            file_name, file_size, part_count
        ),
        UploadEvent::Progress { parts_completed } => {
            format!("  Uploaded part {}/{}", parts_completed, total_parts)
        }
        UploadEvent::Succeeded { file_path } => format!("✓ Uploaded {}", file_path.display()),
        UploadEvent::Failed { reason } => format!("✗ Upload failed ({:?})", reason),
    }
}

async fn print_events(mut receiver: UnboundedReceiver<UploadEvent>) {
    let mut total_parts = 0;
    while let Some(event) = receiver.recv().await {
        if let UploadEvent::Started { part_count, .. } = &event {
            total_parts = *part_count;
        }
        println!("{}", describe_event(&event, total_parts));
    }
}

/// File Upload Workflow
pub struct FileUploadWorkflow {
    config: Config,
}

impl FileUploadWorkflow {
    /// Create a new workflow instance with injected configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Execute the upload workflow
    pub async fn execute(&self, args: Args) -> Result<()> {
        info!("Starting partup...");
        info!("Dry run: {}", args.dry_run);

        let mut config = self.config.clone();
        if let Some(part_size) = args.part_size {
            config.part_size = part_size;
        }
        if let Some(temp_dir) = &args.temp_dir {
            config.temp_dir = temp_dir.clone();
        }
        config.validate()?;

        println!("✓ Using configuration:");
        println!("  Server: {}", config.base_url);
        println!("  Part size: {} bytes", config.part_size);
        println!("  Temp root: {}", config.temp_root().display());

        if !args.file.is_file() {
            bail!("Source file not found: {}", args.file.display());
        }

        let temp_dir = unique_temp_dir(&config.temp_root());
        let upload_config = config.upload_config();

        if args.dry_run {
            return Self::dry_run(&args.file, &temp_dir, &upload_config).await;
        }

        let catalog_id = resolve_catalog_id(args.catalog_id.as_deref(), &config.catalog_id)
            .context("catalog id is required (--catalog-id or \"catalog_id\" in config)")?;

        let upload_repo = Arc::new(HttpUploadRepository::from_config(&config)?);
        let (notifier, receiver) = ChannelNotifier::channel();
        let printer = tokio::spawn(print_events(receiver));

        let cancel = CancellationToken::new();
        let interrupt = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted, cancelling upload");
                    cancel.cancel();
                }
            })
        };

        let use_case = MultipartUploadUseCase::new(
            upload_repo,
            Arc::new(FsPartRepository::new()),
            Arc::new(Md5ChecksumRepository::new()),
            Arc::new(notifier),
            upload_config,
        );
        let request = UploadRequest::new(args.file.clone(), temp_dir, catalog_id);

        let result = use_case.execute(&request, &cancel).await;

        interrupt.abort();
        // Dropping the use case closes the event channel so the printer can finish
        drop(use_case);
        if let Err(e) = printer.await {
            warn!("Event printer task failed: {}", e);
        }

        let report = result?;
        println!(
            "✓ Upload complete! (upload id {}, {} parts)",
            report.upload_id, report.total_parts
        );

        Ok(())
    }

    /// Split and checksum without contacting the server
    async fn dry_run(source: &Path, temp_dir: &Path, upload_config: &UploadConfig) -> Result<()> {
        let part_repo = FsPartRepository::new();
        let result = Self::print_plan(&part_repo, source, temp_dir, upload_config).await;

        match (result, part_repo.remove_parts(temp_dir).await) {
            (result, Ok(())) => result,
            (Ok(()), Err(e)) => Err(e),
            (Err(e), Err(cleanup_error)) => {
                warn!("{:#}", cleanup_error);
                Err(e)
            }
        }
    }

    async fn print_plan(
        part_repo: &FsPartRepository,
        source: &Path,
        temp_dir: &Path,
        upload_config: &UploadConfig,
    ) -> Result<()> {
        let checksums = Md5ChecksumRepository::new();
        let outcome = part_repo
            .split(source, temp_dir, &upload_config.layout)
            .await?;
        let file_checksum = checksums.file_checksum(source).await?;

        println!("✓ Dry-run mode (not actually uploading)");
        println!(
            "  Would upload {} ({} bytes, md5 {}) in {} parts:",
            source.display(),
            outcome.file_size,
            file_checksum,
            outcome.parts.len()
        );
        for part in &outcome.parts {
            let checksum = checksums.file_checksum(part.path()).await?;
            println!(
                "    - Part {} | offset {} | {} bytes | md5 {}",
                part.part_number(),
                part.byte_range().offset,
                part.len(),
                checksum
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::FailureReason;

    #[test]
    fn test_unique_temp_dir() {
        let root = Path::new("/tmp/partup");
        let first = unique_temp_dir(root);
        let second = unique_temp_dir(root);

        assert!(first.starts_with(root));
        assert!(first
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("upload-"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_resolve_catalog_id_prefers_cli() {
        assert_eq!(
            resolve_catalog_id(Some("cli"), "config"),
            Some("cli".to_string())
        );
    }

    #[test]
    fn test_resolve_catalog_id_falls_back_to_config() {
        assert_eq!(
            resolve_catalog_id(None, "config"),
            Some("config".to_string())
        );
        assert_eq!(
            resolve_catalog_id(Some(""), "config"),
            Some("config".to_string())
        );
    }

    #[test]
    fn test_resolve_catalog_id_missing() {
        assert_eq!(resolve_catalog_id(None, ""), None);
    }

    #[test]
    fn test_describe_event() {
        assert_eq!(
            describe_event(
                &UploadEvent::Started {
                    part_count: 3,
                    file_name: "a.mp4".to_string(),
                    file_size: 2500
                },
                0
            ),
            "✓ Split a.mp4 (2500 bytes) into 3 parts"
        );
        assert_eq!(
            describe_event(&UploadEvent::Progress { parts_completed: 2 }, 3),
            "  Uploaded part 2/3"
        );
        assert_eq!(
            describe_event(
                &UploadEvent::Failed {
                    reason: FailureReason::Initialization
                },
                3
            ),
            "✗ Upload failed (Initialization)"
        );
    }
}
