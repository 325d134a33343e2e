/*!
 * Whole-document rendering.
 *
 * Every body paragraph is rendered on its own tokio task. Results come back
 * in completion order and are put back into paragraph order before the
 * document is assembled.
 */

use futures::stream::{self, StreamExt};
use log::debug;

use crate::content_model::{ParagraphKind, Post};
use crate::errors::ExportError;

use super::normalizer::{normalize, subtitle, title_lines, RenderTask};
use super::renderer::render_paragraph;

/// Default number of paragraphs rendered concurrently
pub const DEFAULT_CONCURRENCY: usize = 8;

/// One top-level markdown block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub text: String,

    /// Paragraph type, `None` for title, subtitle and section markers
    pub kind: Option<ParagraphKind>,
}

impl Block {
    fn plain(text: String) -> Self {
        Self { text, kind: None }
    }

    /// Items of the same list are kept on consecutive lines
    fn continues_list(&self, previous: &Block) -> bool {
        match (&previous.kind, &self.kind) {
            (Some(previous), Some(current)) => current.is_list_item() && previous == current,
            _ => false,
        }
    }
}

/// A rendered post, before front matter is added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Title heading lines
    pub title: String,

    pub subtitle: Option<String>,

    /// Section markers and paragraphs in document order
    pub blocks: Vec<Block>,
}

impl RenderedDocument {
    /// Join all blocks into the markdown body.
    ///
    /// Blocks are separated by a blank line, list items of one list by a
    /// single newline. Empty blocks produce no output.
    pub fn to_markdown(&self) -> String {
        let mut header = vec![Block::plain(self.title.clone())];
        if let Some(subtitle) = &self.subtitle {
            header.push(Block::plain(subtitle.clone()));
        }

        let mut out = String::new();
        let mut previous: Option<&Block> = None;
        for block in header.iter().chain(self.blocks.iter()) {
            if block.text.is_empty() {
                continue;
            }
            if let Some(previous) = previous {
                out.push_str(if block.continues_list(previous) { "\n" } else { "\n\n" });
            }
            out.push_str(&block.text);
            previous = Some(block);
        }
        out.push('\n');
        out
    }

    /// Whether `text` repeats a header line already emitted
    fn repeats_header(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        text == self.title
            || self.title.lines().any(|line| line == text)
            || self.subtitle.as_deref().is_some_and(|subtitle| subtitle.trim() == text)
    }
}

/// Render a post to markdown blocks.
///
/// At most `concurrency` paragraph tasks are in flight at once. Output order
/// never depends on the order in which tasks finish.
pub async fn render_document(post: &Post, concurrency: usize) -> Result<RenderedDocument, ExportError> {
    let mut body = normalize(post.sections(), post.paragraphs());
    let mut document = RenderedDocument {
        title: title_lines(&post.title),
        subtitle: subtitle(post.paragraphs()),
        blocks: Vec::with_capacity(body.tasks.len() + body.markers.len()),
    };

    debug!(
        "Rendering {} paragraphs and {} section markers",
        body.tasks.len(),
        body.markers.len()
    );

    let tasks = std::mem::take(&mut body.tasks);
    let mut rendered = render_tasks(tasks, concurrency).await?;
    rendered.sort_by_key(|(index, _, _)| *index);

    for (index, kind, text) in rendered {
        if let Some(marker) = body.marker_at(index) {
            document.blocks.push(Block::plain(marker.to_string()));
        }
        if document.repeats_header(&text) {
            debug!("Skipping paragraph {} repeating the title or subtitle", index);
            continue;
        }
        document.blocks.push(Block {
            text,
            kind: Some(kind),
        });
    }

    Ok(document)
}

/// Render tasks concurrently, returning `(index, kind, markdown)` in
/// completion order.
async fn render_tasks(
    tasks: Vec<RenderTask>,
    concurrency: usize,
) -> Result<Vec<(usize, ParagraphKind, String)>, ExportError> {
    let results = stream::iter(tasks)
        .map(|task| {
            tokio::spawn(async move {
                let text = render_paragraph(&task.paragraph, task.ordinal);
                (task.index, task.paragraph.kind, text)
            })
        })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    results
        .into_iter()
        .map(|result| result.map_err(ExportError::from))
        .collect()
}
