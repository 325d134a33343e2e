/*!
 * Paragraph and section rendering.
 *
 * Rendering is a pure function of one paragraph plus its run-local ordinal,
 * so paragraphs can be rendered on independent tasks. Content anomalies
 * (bad offsets, unknown styles, unknown block types) degrade to plain text
 * and never produce an error.
 */

use log::debug;

use crate::content_model::{ImageMetadata, Markup, MarkupStyle, Paragraph, ParagraphKind, Section};

/// Medium's image CDN, followed by `{width}/{image id}`
pub const MEDIUM_IMAGE_CDN: &str = "https://cdn-images-1.medium.com/max/";

/// Smallest width requested from the CDN
const MIN_IMAGE_WIDTH: u64 = 2000;

pub const HORIZONTAL_RULE: &str = "---";

const CODE_FENCE: &str = "```";

/// Render one paragraph to markdown.
///
/// `ordinal` is the 1-based position of an ordered-list item within its run
/// and is ignored for every other block type.
pub fn render_paragraph(paragraph: &Paragraph, ordinal: usize) -> String {
    match &paragraph.kind {
        ParagraphKind::Text => inline_content(paragraph),
        ParagraphKind::Heading(level) => {
            let marker = "#".repeat(usize::from((*level).clamp(1, 6)));
            prefix_lines(&apply_markups(&paragraph.text, &paragraph.markups), &format!("{} ", marker))
        }
        ParagraphKind::Blockquote | ParagraphKind::PullQuote => {
            prefix_lines(&inline_content(paragraph), "> ")
        }
        ParagraphKind::CodeBlock => format!("{}\n{}\n{}", CODE_FENCE, paragraph.text, CODE_FENCE),
        ParagraphKind::OrderedListItem => format!("{}. {}", ordinal.max(1), inline_content(paragraph)),
        ParagraphKind::UnorderedListItem => format!("- {}", inline_content(paragraph)),
        ParagraphKind::Image => render_image(paragraph),
        ParagraphKind::Unknown(tag) => {
            debug!("Unknown paragraph type '{}', keeping raw text", tag);
            paragraph.text.clone()
        }
    }
}

/// Render the visual marker of a section boundary.
///
/// The opening section has no marker; a section with a background image
/// shows the image, every other section becomes a horizontal rule.
pub fn render_marker(section: &Section) -> String {
    if let Some(image) = section.background_image.as_ref().filter(|image| !image.id.is_empty()) {
        return format!("![]({})", image_url(image));
    }
    if section.start_index == 0 {
        return String::new();
    }
    HORIZONTAL_RULE.to_string()
}

/// CDN address of an image at twice its original width
pub fn image_url(image: &ImageMetadata) -> String {
    let width = image
        .original_width
        .unwrap_or(0)
        .saturating_mul(2)
        .max(MIN_IMAGE_WIDTH);
    format!("{}{}/{}", MEDIUM_IMAGE_CDN, width, image.id)
}

fn render_image(paragraph: &Paragraph) -> String {
    let Some(image) = paragraph.metadata.as_ref().filter(|image| !image.id.is_empty()) else {
        debug!("Image paragraph without metadata, keeping raw text");
        return paragraph.text.clone();
    };

    let alt = if paragraph.text.trim().is_empty() {
        image.alt.as_deref().unwrap_or_default()
    } else {
        paragraph.text.as_str()
    };
    let alt = alt
        .replace('\n', " ")
        .replace('[', "\\[")
        .replace(']', "\\]");

    format!("![{}]({})", alt, image_url(image))
}

/// Marked-up text of a paragraph that must not start a new block
fn inline_content(paragraph: &Paragraph) -> String {
    apply_markups(&paragraph.text, &paragraph.markups)
        .split('\n')
        .map(escape_block_start)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape a line that would otherwise open a heading, quote, list item or
/// setext underline
fn escape_block_start(line: &str) -> String {
    let rest = line.trim_start_matches(' ');
    let indent = &line[..line.len() - rest.len()];
    let ends_marker = |at: usize| rest[at..].is_empty() || rest[at..].starts_with([' ', '\t']);

    let hashes = rest.len() - rest.trim_start_matches('#').len();
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();

    let escape_at = if rest.starts_with('>') {
        Some(0)
    } else if (1..=6).contains(&hashes) && ends_marker(hashes) {
        Some(0)
    } else if rest.starts_with(['-', '+']) && ends_marker(1) {
        Some(0)
    } else if rest.starts_with(['-', '=']) && rest.trim_end().chars().all(|c| rest.starts_with(c)) {
        Some(0)
    } else if (1..=9).contains(&digits) && rest[digits..].starts_with(['.', ')']) && ends_marker(digits + 1) {
        Some(digits)
    } else {
        None
    };

    match escape_at {
        Some(at) => format!("{}{}\\{}", indent, &rest[..at], &rest[at..]),
        None => line.to_string(),
    }
}

fn prefix_lines(text: &str, prefix: &str) -> String {
    text.split('\n')
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape characters that would otherwise start inline markup
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        push_escaped(&mut escaped, c);
    }
    escaped
}

fn push_escaped(out: &mut String, c: char) {
    if matches!(c, '\\' | '*' | '_' | '`' | '[' | ']') {
        out.push('\\');
    }
    out.push(c);
}

/// A markup range resolved against the paragraph text
struct Span {
    start: usize,
    end: usize,
    open: String,
    close: String,
    /// Inline code, rendered without escaping
    verbatim: bool,
    /// Position in the accepted list, used to break ties
    order: usize,
}

/// Apply markup ranges to `text`, escaping everything outside code spans.
///
/// Offsets count UTF-16 code units. Ranges are clamped to the text, edge
/// whitespace is moved outside the delimiters, empty ranges are dropped and a
/// range that crosses an already accepted one is ignored. Delimiters are
/// emitted in one left-to-right pass over the original offsets, so inserted
/// syntax never shifts the positions of ranges still to be applied.
pub fn apply_markups(text: &str, markups: &[Markup]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let spans = resolve_spans(&chars, markups);

    if spans.is_empty() {
        return escape_markdown(text);
    }

    let mut code_depth = 0usize;
    let mut out = String::with_capacity(text.len() + spans.len() * 4);

    for position in 0..=chars.len() {
        // Inner spans close first
        let mut closing: Vec<&Span> = spans.iter().filter(|s| s.end == position).collect();
        closing.sort_by(|a, b| b.start.cmp(&a.start).then(b.order.cmp(&a.order)));
        for span in closing {
            out.push_str(&span.close);
            if span.verbatim {
                code_depth = code_depth.saturating_sub(1);
            }
        }

        // Outer spans open first
        let mut opening: Vec<&Span> = spans.iter().filter(|s| s.start == position).collect();
        opening.sort_by(|a, b| b.end.cmp(&a.end).then(a.order.cmp(&b.order)));
        for span in opening {
            out.push_str(&span.open);
            if span.verbatim {
                code_depth += 1;
            }
        }

        if let Some(&c) = chars.get(position) {
            if code_depth > 0 {
                out.push(c);
            } else {
                push_escaped(&mut out, c);
            }
        }
    }

    out
}

/// UTF-16 offset at which each char starts, plus the total length
fn utf16_boundaries(chars: &[char]) -> Vec<usize> {
    let mut boundaries = Vec::with_capacity(chars.len() + 1);
    let mut offset = 0;
    for c in chars {
        boundaries.push(offset);
        offset += c.len_utf16();
    }
    boundaries.push(offset);
    boundaries
}

fn resolve_spans(chars: &[char], markups: &[Markup]) -> Vec<Span> {
    let boundaries = utf16_boundaries(chars);
    // Offsets inside a surrogate pair round up to the next char
    let char_index = |offset: i64| {
        let unit = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        boundaries.partition_point(|&b| b < unit).min(chars.len())
    };

    let mut candidates: Vec<(usize, usize, &Markup)> = markups
        .iter()
        .filter_map(|markup| {
            let mut start = char_index(markup.start);
            let mut end = char_index(markup.end).max(start);
            if markup.style != MarkupStyle::Code {
                while start < end && chars[start].is_whitespace() {
                    start += 1;
                }
                while end > start && chars[end - 1].is_whitespace() {
                    end -= 1;
                }
            }
            if start == end {
                debug!("Dropping empty markup range {}..{}", markup.start, markup.end);
                None
            } else {
                Some((start, end, markup))
            }
        })
        .collect();
    candidates.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut spans: Vec<Span> = Vec::with_capacity(candidates.len());
    for (start, end, markup) in candidates {
        let crosses = spans
            .iter()
            .any(|s| (s.start < start && start < s.end && s.end < end) || (start < s.start && s.start < end && end < s.end));
        if crosses {
            debug!("Ignoring markup {}..{} crossing another range", start, end);
            continue;
        }

        let Some((open, close)) = delimiters(markup, &chars[start..end]) else {
            continue;
        };
        spans.push(Span {
            start,
            end,
            open,
            close,
            verbatim: markup.style == MarkupStyle::Code,
            order: spans.len(),
        });
    }
    spans
}

fn delimiters(markup: &Markup, content: &[char]) -> Option<(String, String)> {
    let pair = |d: &str| Some((d.to_string(), d.to_string()));
    match &markup.style {
        MarkupStyle::Bold => pair("**"),
        MarkupStyle::Italic => pair("*"),
        MarkupStyle::Code => Some(code_delimiters(content)),
        MarkupStyle::Strikethrough => pair("~~"),
        MarkupStyle::Link => match markup.target() {
            Some(target) => Some(("[".to_string(), format!("]({})", target))),
            None => {
                debug!("Link markup without target, leaving text unwrapped");
                None
            }
        },
        MarkupStyle::Unknown(tag) => {
            debug!("Unsupported markup type '{}', leaving text unwrapped", tag);
            None
        }
    }
}

/// Backtick fence longer than any backtick run inside the code span
fn code_delimiters(content: &[char]) -> (String, String) {
    let longest_run = content
        .split(|&c| c != '`')
        .map(<[char]>::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);

    if content.first() == Some(&'`') || content.last() == Some(&'`') {
        (format!("{} ", fence), format!(" {}", fence))
    } else {
        (fence.clone(), fence)
    }
}
