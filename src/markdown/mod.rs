/*!
 * Content-model to markdown translation.
 *
 * - `normalizer`: section marker map, render tasks and list ordinals
 * - `renderer`: stateless rendering of one paragraph or section marker
 * - `document`: concurrent rendering and assembly of a whole post
 */

// Re-export main types for easier usage
pub use self::document::{render_document, Block, RenderedDocument, DEFAULT_CONCURRENCY};
pub use self::normalizer::{normalize, subtitle, title_lines, NormalizedBody, RenderTask};
pub use self::renderer::{apply_markups, escape_markdown, render_marker, render_paragraph};

// Submodules
pub mod document;
pub mod normalizer;
pub mod renderer;
