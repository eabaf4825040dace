//! Workflow Integration Tests
//!
//! FileUploadWorkflow の統合テスト（ネットワークを使わない経路のみ）

use std::fs;
use std::path::{Path, PathBuf};

use partup::adapter::config::Config;
use partup::driver::cli::Args;
use partup::driver::workflow::FileUploadWorkflow;
use tempfile::TempDir;

/// テスト用のConfigファイルを作成
fn create_test_config(dir: &Path, catalog_id: &str) -> String {
    let config_path = dir.join("partup.json");
    let config_content = format!(
        r#"{{
  "base_url": "http://127.0.0.1:9",
  "catalog_id": "{}",
  "temp_dir": "{}",
  "part_size": 1024,
  "buffer_size": 256
}}"#,
        catalog_id,
        dir.join("tmp").display()
    );
    fs::write(&config_path, config_content).unwrap();
    config_path.to_string_lossy().to_string()
}

fn args_for(file: PathBuf, config: String, dry_run: bool) -> Args {
    Args {
        file,
        config,
        catalog_id: None,
        temp_dir: None,
        part_size: None,
        dry_run,
    }
}

#[tokio::test]
async fn test_workflow_execute_dry_run_success() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config(temp_dir.path(), "");
    let source = temp_dir.path().join("movie.mp4");
    fs::write(&source, vec![7u8; 3000]).unwrap();

    let config = Config::load(&config_path).unwrap();
    let workflow = FileUploadWorkflow::new(config);

    let result = workflow.execute(args_for(source, config_path, true)).await;

    assert!(result.is_ok(), "Dry run should succeed: {:?}", result.err());

    // Part files are removed after the dry run
    let leftovers: Vec<_> = fs::read_dir(temp_dir.path().join("tmp"))
        .map(|entries| entries.flatten().collect())
        .unwrap_or_default();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_workflow_execute_missing_source() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config(temp_dir.path(), "catalog-1");

    let config = Config::load(&config_path).unwrap();
    let workflow = FileUploadWorkflow::new(config);

    let result = workflow
        .execute(args_for(
            temp_dir.path().join("missing.mp4"),
            config_path,
            true,
        ))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_workflow_execute_requires_catalog_id() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config(temp_dir.path(), "");
    let source = temp_dir.path().join("movie.mp4");
    fs::write(&source, b"hello").unwrap();

    let config = Config::load(&config_path).unwrap();
    let workflow = FileUploadWorkflow::new(config);

    let result = workflow.execute(args_for(source, config_path, false)).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("catalog id is required"));
}

#[tokio::test]
async fn test_workflow_execute_rejects_zero_part_size_override() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config(temp_dir.path(), "catalog-1");
    let source = temp_dir.path().join("movie.mp4");
    fs::write(&source, b"hello").unwrap();

    let config = Config::load(&config_path).unwrap();
    let workflow = FileUploadWorkflow::new(config);

    let mut args = args_for(source, config_path, true);
    args.part_size = Some(0);

    assert!(workflow.execute(args).await.is_err());
}
