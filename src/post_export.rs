use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::content_model::Post;
use crate::language_utils;
use crate::markdown::RenderedDocument;

// @module: Front matter, header block and file naming for exported posts

// @const: Whitespace runs collapsed into one slug separator
static SLUG_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Options controlling what is prepended to the markdown body
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Prepend `url:` and `date:` lines followed by the separator
    pub add_headers: bool,

    /// Line written after the header lines
    pub separator: String,

    /// Prepend a static-site front matter block
    pub add_metadata: bool,

    /// Front matter `layout` value
    pub layout: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            add_headers: false,
            separator: String::new(),
            add_metadata: false,
            layout: "post".to_string(),
        }
    }
}

/// Informational view of a post
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PostSummary {
    pub title: String,

    /// RFC 3339 creation time
    pub date: String,

    pub url: String,

    pub language: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_name: Option<String>,

    pub license: String,
}

impl PostSummary {
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            date: post_date(post).to_rfc3339(),
            url: post.canonical_url.clone(),
            language: post.detected_language.clone(),
            language_name: language_utils::get_language_name(&post.detected_language),
            license: post.license.clone(),
        }
    }
}

/// Creation time of the post, the Unix epoch when unknown
pub fn post_date(post: &Post) -> DateTime<Utc> {
    post.created_at_utc().unwrap_or_default()
}

/// Lowercase title with whitespace runs turned into hyphens.
///
/// Path separators are dropped so the slug is always a single file name.
pub fn post_slug(title: &str) -> String {
    let lowered = title.trim().to_lowercase().replace(['/', '\\'], "");
    SLUG_WHITESPACE.replace_all(&lowered, "-").into_owned()
}

/// Final file contents: optional header lines, optional front matter, body
pub fn export_post(post: &Post, document: &RenderedDocument, options: &ExportOptions) -> String {
    let mut content = String::new();

    if options.add_headers {
        content.push_str(&format!("url: {}\n", post.canonical_url));
        content.push_str(&format!("date: {}\n", post_date(post).to_rfc3339()));
        content.push_str(&options.separator);
        content.push_str("\n\n");
    }

    if options.add_metadata {
        content.push_str(&front_matter(post, document, &options.layout));
    }

    content.push_str(&document.to_markdown());
    content
}

fn front_matter(post: &Post, document: &RenderedDocument, layout: &str) -> String {
    let title = single_line(&post.title);
    let description = document.subtitle.as_deref().map(single_line).unwrap_or_default();

    format!(
        "---\nlayout: {}\ntitle: {}\ndescription: {}\npermalink: /{}/\n---\n\n",
        layout,
        title,
        description,
        post_slug(&post.title)
    )
}

fn single_line(text: &str) -> String {
    text.lines().map(str::trim).collect::<Vec<_>>().join(" ")
}
