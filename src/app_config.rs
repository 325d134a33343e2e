use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::file_utils::FileManager;
use crate::post_export::ExportOptions;

/// Application configuration module
/// This module handles loading and validating configuration settings.
/// Every field has a default, so a partial `conf.json` is valid.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory receiving the exported markdown files
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Maximum number of paragraphs rendered concurrently
    #[serde(default = "default_concurrent_renders")]
    pub concurrent_renders: usize,

    /// HTTP timeout for fetching posts
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// What gets prepended to the markdown body
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExportConfig {
    /// Write `url:` and `date:` header lines
    #[serde(default)]
    pub add_headers: bool,

    /// Line written after the header lines
    #[serde(default)]
    pub separator: String,

    /// Write a static-site front matter block
    #[serde(default)]
    pub add_metadata: bool,

    /// Front matter layout name
    #[serde(default = "default_layout")]
    pub layout: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            add_headers: false,
            separator: String::new(),
            add_metadata: false,
            layout: default_layout(),
        }
    }
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            add_headers: config.add_headers,
            separator: config.separator.clone(),
            add_metadata: config.add_metadata,
            layout: config.layout.clone(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_concurrent_renders() -> usize {
    crate::markdown::DEFAULT_CONCURRENCY
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_layout() -> String {
    "post".to_string()
}

impl Config {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Ok(Self::default());
        }

        let content = FileManager::read_to_string(path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.concurrent_renders == 0 {
            return Err(anyhow!("concurrent_renders must be at least 1"));
        }

        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be at least 1"));
        }

        let layout = self.export.layout.trim();
        if layout.is_empty() || layout.contains(char::is_whitespace) {
            return Err(anyhow!("Invalid front matter layout: '{}'", self.export.layout));
        }

        Ok(())
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions::from(&self.export)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: default_output_dir(),
            export: ExportConfig::default(),
            concurrent_renders: default_concurrent_renders(),
            timeout_secs: default_timeout_secs(),
            log_level: LogLevel::default(),
        }
    }
}
