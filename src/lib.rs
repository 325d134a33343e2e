/*!
 * # mediumexporter - Medium post to markdown exporter
 * 
 * A Rust library and CLI that turns a Medium post into a markdown file
 * ready for a static site generator.
 * 
 * ## Features
 * 
 * - Load posts from Medium (`?format=json`) or from a saved JSON payload
 * - Translate Medium's content model (sections, paragraphs, markup ranges)
 *   into markdown: headings, quotes, code blocks, lists, images, bold,
 *   italic, code, strikethrough and links
 * - Render paragraphs concurrently while keeping document order
 * - Optional header lines and static-site front matter
 * - `YYYY-MM-DD-title.md` output naming
 * 
 * ## Architecture
 * 
 * The library is organized in these main modules:
 * - `content_model`: Serde types for Medium's post payload
 * - `markdown`: Content-model to markdown translation:
 *   - `markdown::normalizer`: Section markers, render tasks, list numbering
 *   - `markdown::renderer`: Paragraph and section marker rendering
 *   - `markdown::document`: Concurrent rendering and document assembly
 * - `post_export`: Front matter, header lines, slugs and post summaries
 * - `post_loader`: Fetching and parsing posts from URLs or files
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 * 
 * ## License
 * 
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod content_model;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod markdown;
pub mod post_export;
pub mod post_loader;

// Re-export main types for easier usage
pub use app_config::Config;
pub use content_model::{Markup, MarkupStyle, Paragraph, ParagraphKind, Post, Section};
pub use markdown::{render_document, render_marker, render_paragraph, RenderedDocument};
pub use post_export::{export_post, post_slug, ExportOptions, PostSummary};
pub use post_loader::{load_post, parse_post};
pub use errors::{AppError, ExportError, LoadError};
