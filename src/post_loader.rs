/*!
 * Post loading.
 *
 * A post is read either from Medium directly (any `http(s)` URL, fetched
 * with `?format=json`) or from a JSON file saved earlier. Both sources sit
 * behind the `PostSource` trait so the exporter does not care where the
 * payload came from.
 */

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::fmt::Debug;
use std::time::Duration;
use url::Url;

use crate::content_model::{Post, PostEnvelope};
use crate::errors::LoadError;
use crate::file_utils::FileManager;

/// Common trait for all post sources
#[async_trait]
pub trait PostSource: Send + Sync + Debug {
    /// Fetch the raw payload found at `location`
    async fn load(&self, location: &str) -> Result<String, LoadError>;
}

/// Fetches posts from Medium over HTTP
#[derive(Debug, Clone)]
pub struct HttpSource {
    /// HTTP client for making requests
    client: Client,
}

impl HttpSource {
    pub fn new(timeout_secs: u64) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    /// Address of the JSON rendition of a post
    pub fn json_url(location: &str) -> Result<Url, LoadError> {
        let mut url = Url::parse(location)
            .map_err(|e| LoadError::RequestFailed(format!("Invalid URL '{}': {}", location, e)))?;
        let has_format = url.query_pairs().any(|(key, _)| key == "format");
        if !has_format {
            url.query_pairs_mut().append_pair("format", "json");
        }
        Ok(url)
    }
}

#[async_trait]
impl PostSource for HttpSource {
    async fn load(&self, location: &str) -> Result<String, LoadError> {
        let url = Self::json_url(location)?;
        debug!("Fetching post from {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                status_code: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Reads posts saved as JSON files
#[derive(Debug, Clone, Default)]
pub struct FileSource;

#[async_trait]
impl PostSource for FileSource {
    async fn load(&self, location: &str) -> Result<String, LoadError> {
        debug!("Reading post from {}", location);
        FileManager::read_to_string(location).map_err(|e| LoadError::ReadFailed {
            path: location.to_string(),
            message: format!("{:#}", e),
        })
    }
}

/// Whether `location` should be fetched over HTTP
pub fn is_remote(location: &str) -> bool {
    Url::parse(location)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Parse a Medium payload.
///
/// Medium prefixes its JSON with `])}while(1);</x>`; anything before the
/// first `{` is skipped. Both the full envelope and a bare post object are
/// accepted.
pub fn parse_post(raw: &str) -> Result<Post, LoadError> {
    let start = raw
        .find('{')
        .ok_or_else(|| LoadError::ParseError("payload contains no JSON object".to_string()))?;
    let json = &raw[start..];

    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.get("payload").is_some() {
        let envelope: PostEnvelope = serde_json::from_value(value)?;
        Ok(envelope.payload.value)
    } else {
        Ok(serde_json::from_value(value)?)
    }
}

/// Load and parse a post from a URL or a file path
pub async fn load_post(location: &str, timeout_secs: u64) -> Result<Post, LoadError> {
    let raw = if is_remote(location) {
        HttpSource::new(timeout_secs)?.load(location).await?
    } else {
        FileSource.load(location).await?
    };
    parse_post(&raw)
}
