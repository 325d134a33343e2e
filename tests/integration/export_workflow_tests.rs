/*!
 * Integration tests for exporting a saved Medium payload end to end
 */

use anyhow::Result;
use mediumexporter::app_config::Config;
use mediumexporter::app_controller::Controller;
use mediumexporter::file_utils::FileManager;
use crate::common::{self, SAMPLE_POST_MARKDOWN};

fn controller_writing_to(output_dir: &std::path::Path) -> Result<Controller> {
    let mut config = Config::default();
    config.output_dir = output_dir.to_string_lossy().into_owned();
    Controller::with_config(config)
}

/// Test the full export of the bundled sample post
#[tokio::test]
async fn test_run_withSamplePost_shouldWriteExpectedMarkdown() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let controller = controller_writing_to(temp_dir.path())?;
    let sample = common::test_resource_path("sample_post.json");

    let output_path = controller.run(&sample.to_string_lossy()).await?;

    assert_eq!(output_path, temp_dir.path().join("2017-07-14-my-trip.md"));
    assert_eq!(FileManager::read_to_string(&output_path)?, SAMPLE_POST_MARKDOWN);
    Ok(())
}

/// Test that the output directory is created when missing
#[tokio::test]
async fn test_run_withMissingOutputDir_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_dir = temp_dir.path().join("medium_posts");
    let controller = controller_writing_to(&output_dir)?;
    let sample = common::test_resource_path("sample_post.json");

    let output_path = controller.run(&sample.to_string_lossy()).await?;

    assert!(FileManager::dir_exists(&output_dir));
    assert!(FileManager::file_exists(&output_path));
    Ok(())
}

/// Test exporting with header lines and front matter enabled
#[tokio::test]
async fn test_run_withHeadersAndMetadata_shouldPrependBoth() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = Config::default();
    config.output_dir = temp_dir.path().to_string_lossy().into_owned();
    config.export.add_headers = true;
    config.export.separator = "***".to_string();
    config.export.add_metadata = true;
    let controller = Controller::with_config(config)?;
    let sample = common::test_resource_path("sample_post.json");

    let output_path = controller.run(&sample.to_string_lossy()).await?;
    let content = FileManager::read_to_string(&output_path)?;

    let expected_prefix = "url: https://medium.com/@traveller/my-trip-4f1c2a\n\
                           date: 2017-07-14T02:40:00+00:00\n\
                           ***\n\n\
                           ---\nlayout: post\ntitle: My Trip\ndescription: A week away\npermalink: /my-trip/\n---\n\n";
    assert!(content.starts_with(expected_prefix));
    assert!(content.ends_with(SAMPLE_POST_MARKDOWN));
    Ok(())
}

/// Test the informational summary of the sample post
#[tokio::test]
async fn test_info_withSamplePost_shouldSummarizeWithoutWriting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = controller_writing_to(temp_dir.path())?;
    let sample = common::test_resource_path("sample_post.json");

    let summary = controller.info(&sample.to_string_lossy()).await?;

    assert_eq!(summary.title, "My Trip");
    assert_eq!(summary.url, "https://medium.com/@traveller/my-trip-4f1c2a");
    assert_eq!(summary.language_name.as_deref(), Some("English"));
    assert_eq!(std::fs::read_dir(temp_dir.path())?.count(), 0);
    Ok(())
}

/// Test that a missing post file fails with context
#[tokio::test]
async fn test_run_withMissingPost_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = controller_writing_to(temp_dir.path())?;

    let result = controller.run("does_not_exist_12345.json").await;

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("Failed to load post from does_not_exist_12345.json"));
    Ok(())
}

/// Test that an invalid configuration is rejected up front
#[test]
fn test_with_config_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.concurrent_renders = 0;

    let result = Controller::with_config(config);

    assert!(result.is_err());
}
