/*!
 * Content model of a Medium post.
 *
 * These types mirror the JSON payload returned by Medium's `?format=json`
 * endpoint. Only the fields needed for markdown export are modelled; every
 * field is optional on the wire and falls back to an empty default so that a
 * sparse payload still produces a document.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Medium's response envelope: `{ "payload": { "value": <post> } }`
#[derive(Debug, Clone, Deserialize)]
pub struct PostEnvelope {
    pub payload: PostPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostPayload {
    pub value: Post,
}

/// A single article
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post title, may span several lines
    #[serde(default)]
    pub title: String,

    /// Creation time in milliseconds since the Unix epoch
    #[serde(default)]
    pub created_at: i64,

    #[serde(default)]
    pub canonical_url: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub detected_language: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub license: String,

    #[serde(default)]
    pub content: PostContent,
}

impl Post {
    /// Creation time as a UTC timestamp, `None` when out of range
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }

    pub fn sections(&self) -> &[Section] {
        &self.content.body_model.sections
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.content.body_model.paragraphs
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostContent {
    #[serde(default)]
    pub body_model: BodyModel,
}

/// Sections and paragraphs sharing one index space
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BodyModel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<Section>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub paragraphs: Vec<Paragraph>,
}

/// Structural break anchored at a paragraph index
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Index of the first paragraph belonging to this section.
    ///
    /// Negative or non-integer values are kept as `-1` and the section is
    /// skipped when markers are built.
    #[serde(default, deserialize_with = "lenient_index")]
    pub start_index: i64,

    #[serde(default)]
    pub name: Option<String>,

    /// Full-width image shown at the top of the section
    #[serde(default)]
    pub background_image: Option<ImageMetadata>,
}

impl Section {
    pub fn new(start_index: i64) -> Self {
        Self {
            start_index,
            ..Self::default()
        }
    }

    pub fn with_background_image(mut self, image: ImageMetadata) -> Self {
        self.background_image = Some(image);
        self
    }
}

/// Reference to an image hosted on Medium's CDN
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub original_width: Option<u64>,

    #[serde(default)]
    pub original_height: Option<u64>,

    #[serde(default)]
    pub alt: Option<String>,
}

impl ImageMetadata {
    pub fn new(id: &str, original_width: u64) -> Self {
        Self {
            id: id.to_string(),
            original_width: Some(original_width),
            ..Self::default()
        }
    }
}

/// One renderable content block
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paragraph {
    #[serde(rename = "type", default)]
    pub kind: ParagraphKind,

    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub markups: Vec<Markup>,

    #[serde(default)]
    pub metadata: Option<ImageMetadata>,
}

impl Paragraph {
    pub fn new(kind: ParagraphKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
            markups: Vec::new(),
            metadata: None,
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new(ParagraphKind::Text, text)
    }

    pub fn with_markup(mut self, markup: Markup) -> Self {
        self.markups.push(markup);
        self
    }

    pub fn with_metadata(mut self, metadata: ImageMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Paragraph type taxonomy.
///
/// Medium has used both numeric codes and string names for the same set of
/// block types; both forms are accepted. Anything outside the set is kept as
/// `Unknown` with its original tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParagraphKind {
    #[default]
    Text,
    /// Heading with level 1 to 4
    Heading(u8),
    Image,
    Blockquote,
    PullQuote,
    CodeBlock,
    UnorderedListItem,
    OrderedListItem,
    Unknown(String),
}

impl ParagraphKind {
    pub fn is_list_item(&self) -> bool {
        matches!(self, Self::UnorderedListItem | Self::OrderedListItem)
    }
}

impl From<i64> for ParagraphKind {
    fn from(code: i64) -> Self {
        match code {
            1 => Self::Text,
            2 => Self::Heading(1),
            3 => Self::Heading(2),
            13 => Self::Heading(3),
            4 => Self::Image,
            6 => Self::Blockquote,
            7 => Self::PullQuote,
            8 => Self::CodeBlock,
            9 => Self::UnorderedListItem,
            10 => Self::OrderedListItem,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<&str> for ParagraphKind {
    fn from(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "P" => Self::Text,
            "H1" => Self::Heading(1),
            "H2" => Self::Heading(2),
            "H3" => Self::Heading(3),
            "H4" => Self::Heading(4),
            "IMG" => Self::Image,
            "BQ" => Self::Blockquote,
            "PQ" => Self::PullQuote,
            "PRE" => Self::CodeBlock,
            "ULI" => Self::UnorderedListItem,
            "OLI" => Self::OrderedListItem,
            _ => Self::Unknown(name.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for ParagraphKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<TypeTag>::deserialize(deserializer)? {
            None => Self::default(),
            Some(TypeTag::Code(code)) => Self::from(code),
            Some(TypeTag::Name(name)) => Self::from(name.as_str()),
            Some(TypeTag::Other(value)) => Self::Unknown(value.to_string()),
        })
    }
}

/// Styling annotation over `text[start..end]`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Markup {
    /// UTF-16 code unit offset, as produced by JavaScript strings
    #[serde(default, deserialize_with = "lenient_index")]
    pub start: i64,

    #[serde(default, deserialize_with = "lenient_index")]
    pub end: i64,

    #[serde(rename = "type", default)]
    pub style: MarkupStyle,

    #[serde(default)]
    pub href: Option<String>,

    /// `LINK`/`0` for plain links, `USER`/`2` for user mentions
    #[serde(default, deserialize_with = "lenient_option_string")]
    pub anchor_type: Option<String>,

    #[serde(default, deserialize_with = "lenient_option_string")]
    pub user_id: Option<String>,
}

impl Markup {
    pub fn new(start: i64, end: i64, style: MarkupStyle) -> Self {
        Self {
            start,
            end,
            style,
            href: None,
            anchor_type: None,
            user_id: None,
        }
    }

    pub fn link(start: i64, end: i64, href: &str) -> Self {
        Self {
            href: Some(href.to_string()),
            ..Self::new(start, end, MarkupStyle::Link)
        }
    }

    /// Resolved link target.
    ///
    /// Mentions of Medium users carry a user id instead of an href.
    pub fn target(&self) -> Option<String> {
        if let Some(href) = self.href.as_deref().filter(|h| !h.trim().is_empty()) {
            return Some(href.trim().to_string());
        }
        match (self.anchor_type.as_deref(), self.user_id.as_deref()) {
            (Some("USER" | "2"), Some(user_id)) if !user_id.is_empty() => {
                Some(format!("https://medium.com/u/{}", user_id))
            }
            _ => None,
        }
    }
}

/// Inline style taxonomy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupStyle {
    Bold,
    Italic,
    Link,
    Code,
    Strikethrough,
    Unknown(String),
}

impl Default for MarkupStyle {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<i64> for MarkupStyle {
    fn from(code: i64) -> Self {
        match code {
            1 => Self::Bold,
            2 => Self::Italic,
            3 => Self::Link,
            10 => Self::Code,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<&str> for MarkupStyle {
    fn from(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "STRONG" | "BOLD" => Self::Bold,
            "EM" | "ITALIC" => Self::Italic,
            "A" | "LINK" => Self::Link,
            "CODE" => Self::Code,
            "STRIKE" | "STRIKETHROUGH" => Self::Strikethrough,
            _ => Self::Unknown(name.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for MarkupStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<TypeTag>::deserialize(deserializer)? {
            None => Self::default(),
            Some(TypeTag::Code(code)) => Self::from(code),
            Some(TypeTag::Name(name)) => Self::from(name.as_str()),
            Some(TypeTag::Other(value)) => Self::Unknown(value.to_string()),
        })
    }
}

/// Wire form of a type tag
#[derive(Deserialize)]
#[serde(untagged)]
enum TypeTag {
    Code(i64),
    Name(String),
    Other(Value),
}

/// Scalar field Medium has shipped in more than one shape
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
            Scalar::Flag(flag) => flag.to_string(),
        }
    }
}

/// Strings, numbers and booleans as text; null as empty
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

fn lenient_option_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

/// Integer offsets; whole floats and numeric strings are accepted, anything
/// else becomes `-1`
fn lenient_index<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let index = match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    Ok(index.unwrap_or(-1))
}

/// Missing and `null` both give the default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
