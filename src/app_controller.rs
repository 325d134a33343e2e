use anyhow::{Result, Context};
use log::{debug, info, log_enabled, Level};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::content_model::Post;
use crate::errors::ExportError;
use crate::file_utils::FileManager;
use crate::markdown::render_document;
use crate::post_export::{export_post, post_date, post_slug, PostSummary};
use crate::post_loader::load_post;

// @module: Application controller for post export

/// Main application controller for exporting a post
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the post at `location` and write it as markdown.
    ///
    /// Returns the path of the written file.
    pub async fn run(&self, location: &str) -> Result<PathBuf> {
        let start_time = Instant::now();

        let post = self.load(location).await?;
        let output_path = self.write_post(&post, Path::new(&self.config.output_dir)).await?;

        info!(
            "Export done in {}. See {} for your post!",
            Self::format_duration(start_time.elapsed()),
            self.config.output_dir
        );

        Ok(output_path)
    }

    /// Load the post at `location` and summarize it without writing anything
    pub async fn info(&self, location: &str) -> Result<PostSummary> {
        let post = self.load(location).await?;
        Ok(PostSummary::from_post(&post))
    }

    async fn load(&self, location: &str) -> Result<Post> {
        let post = load_post(location, self.config.timeout_secs)
            .await
            .map_err(ExportError::from)
            .with_context(|| format!("Failed to load post from {}", location))?;

        if log_enabled!(Level::Debug) {
            debug!("Paragraphs: {:#?}", post.paragraphs());
        }
        Ok(post)
    }

    /// Render a post to the final file contents
    pub async fn export(&self, post: &Post) -> Result<String> {
        let document = render_document(post, self.config.concurrent_renders).await?;
        Ok(export_post(post, &document, &self.config.export_options()))
    }

    /// Render a post and write it under `output_dir`
    pub async fn write_post(&self, post: &Post, output_dir: &Path) -> Result<PathBuf> {
        let content = self.export(post).await?;
        let output_path = Self::post_output_path(post, output_dir);

        info!("Writing post to file: {}...", output_path.display());
        FileManager::write_to_file(&output_path, &content).map_err(|e| ExportError::WriteFailed {
            path: output_path.display().to_string(),
            message: format!("{:#}", e),
        })?;

        Ok(output_path)
    }

    /// `{output_dir}/{YYYY-MM-DD}-{slug}.md`
    pub fn post_output_path(post: &Post, output_dir: &Path) -> PathBuf {
        FileManager::generate_post_path(output_dir, &post_date(post), &post_slug(&post.title))
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
