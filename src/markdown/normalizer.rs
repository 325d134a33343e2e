/*!
 * Content-model normalization.
 *
 * Turns the two parallel streams of the body model (sections and
 * paragraphs) into an explicit index-to-marker map and an ordered list of
 * self-contained render tasks. List numbering is settled here, in a single
 * sequential pass, so that the renderer itself stays stateless.
 */

use std::collections::BTreeMap;

use log::debug;

use crate::content_model::{Paragraph, ParagraphKind, Section};

use super::renderer::render_marker;

/// Paragraphs 0 and 1 carry the title and subtitle
pub const FIRST_BODY_INDEX: usize = 2;

/// A paragraph ready to be rendered on its own
#[derive(Debug, Clone)]
pub struct RenderTask {
    /// Position in the paragraph sequence
    pub index: usize,

    /// Run-local position for ordered-list items, 0 for anything else
    pub ordinal: usize,

    pub paragraph: Paragraph,
}

/// Output of [`normalize`]
#[derive(Debug, Clone, Default)]
pub struct NormalizedBody {
    /// Rendered section marker keyed by the paragraph index it precedes
    pub markers: BTreeMap<usize, String>,

    /// Body paragraphs in original order
    pub tasks: Vec<RenderTask>,
}

impl NormalizedBody {
    /// Non-empty marker emitted before paragraph `index`, if any
    pub fn marker_at(&self, index: usize) -> Option<&str> {
        self.markers
            .get(&index)
            .map(String::as_str)
            .filter(|marker| !marker.is_empty())
    }
}

pub fn normalize(sections: &[Section], paragraphs: &[Paragraph]) -> NormalizedBody {
    let markers = section_markers(sections);
    let tasks = render_tasks(paragraphs, &markers);
    NormalizedBody { markers, tasks }
}

/// Build the sparse index-to-marker map.
///
/// Start indices are keys; when two sections share one the later section
/// wins. Sections with a negative start index are skipped.
pub fn section_markers(sections: &[Section]) -> BTreeMap<usize, String> {
    let mut markers = BTreeMap::new();
    for section in sections {
        let Ok(index) = usize::try_from(section.start_index) else {
            debug!("Skipping section with invalid start index {}", section.start_index);
            continue;
        };
        if markers.insert(index, render_marker(section)).is_some() {
            debug!("Section at index {} replaces an earlier section with the same start", index);
        }
    }
    markers
}

fn render_tasks(paragraphs: &[Paragraph], markers: &BTreeMap<usize, String>) -> Vec<RenderTask> {
    let mut tasks = Vec::with_capacity(paragraphs.len().saturating_sub(FIRST_BODY_INDEX));
    let mut previous_ordinal = 0;

    for (index, paragraph) in paragraphs.iter().enumerate().skip(FIRST_BODY_INDEX) {
        // A visible section break ends the current list
        let breaks_run = markers.get(&index).is_some_and(|marker| !marker.is_empty());

        let ordinal = match paragraph.kind {
            ParagraphKind::OrderedListItem if breaks_run => 1,
            ParagraphKind::OrderedListItem => previous_ordinal + 1,
            _ => 0,
        };
        previous_ordinal = ordinal;

        tasks.push(RenderTask {
            index,
            ordinal,
            paragraph: paragraph.clone(),
        });
    }

    tasks
}

/// Render the title as one `# ` heading line per source line.
///
/// A blank title gives an empty string, which produces no block.
pub fn title_lines(title: &str) -> String {
    if title.trim().is_empty() {
        return String::new();
    }
    title
        .split('\n')
        .map(|line| format!("# {}", line.trim_end_matches('\r')))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Subtitle taken from the second paragraph, without heading markers
pub fn subtitle(paragraphs: &[Paragraph]) -> Option<String> {
    paragraphs
        .get(1)
        .map(|paragraph| paragraph.text.trim_start_matches('#').trim_start().to_string())
}
