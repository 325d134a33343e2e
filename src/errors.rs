/*!
 * Error types for the mediumexporter application.
 *
 * Content anomalies inside a post (bad markup offsets, unknown block types,
 * missing sections) are absorbed by the renderer and never show up here.
 * These types cover the boundaries: loading a post and writing the result.
 */

use thiserror::Error;

/// Errors that can occur while loading a post
#[derive(Error, Debug)]
pub enum LoadError {
    /// The HTTP request could not be completed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The server answered with a non-success status
    #[error("Server responded with status {status_code} for {url}")]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Requested address
        url: String,
    },

    /// A local post file could not be read
    #[error("Failed to read post file {path}: {message}")]
    ReadFailed {
        path: String,
        message: String,
    },

    /// The payload is not a Medium post
    #[error("Failed to parse post: {0}")]
    ParseError(String),
}

impl From<serde_json::Error> for LoadError {
    fn from(error: serde_json::Error) -> Self {
        Self::ParseError(error.to_string())
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(error: reqwest::Error) -> Self {
        Self::RequestFailed(error.to_string())
    }
}

/// Errors that can occur while exporting a post
#[derive(Error, Debug)]
pub enum ExportError {
    /// Loading the post failed
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// A paragraph rendering task panicked or was aborted
    #[error("Render task failed: {0}")]
    RenderTask(#[from] tokio::task::JoinError),

    /// The markdown file could not be written
    #[error("Failed to write {path}: {message}")]
    WriteFailed {
        path: String,
        message: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from loading a post
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Error from exporting a post
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
