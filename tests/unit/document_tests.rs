/*!
 * Tests for concurrent document rendering and assembly
 */

use mediumexporter::content_model::{Markup, MarkupStyle, Paragraph, ParagraphKind, Post, Section};
use mediumexporter::markdown::{render_document, DEFAULT_CONCURRENCY};
use crate::common::{build_post, init_logging, oli};

fn long_post(paragraph_count: usize) -> Post {
    let body = (0..paragraph_count)
        .map(|i| match i % 4 {
            0 => oli(&format!("step {}", i)),
            1 => oli(&format!("step {}", i)),
            2 => Paragraph::text(&format!("paragraph {} is bold", i))
                .with_markup(Markup::new(0, 9, MarkupStyle::Bold)),
            _ => Paragraph::new(ParagraphKind::Heading(3), &format!("heading {}", i)),
        })
        .collect();
    let sections = (0..paragraph_count).step_by(7).map(|i| Section::new((i + 2) as i64)).collect();
    build_post("Long Post", "Many paragraphs", body, sections)
}

/// Test that output does not depend on how many tasks run at once
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_render_document_withDifferentConcurrency_shouldProduceSameMarkdown() {
    init_logging();
    let post = long_post(200);

    let sequential = render_document(&post, 1).await.unwrap().to_markdown();
    let wide = render_document(&post, 32).await.unwrap().to_markdown();
    let default = render_document(&post, DEFAULT_CONCURRENCY).await.unwrap().to_markdown();

    assert_eq!(sequential, wide);
    assert_eq!(sequential, default);
}

/// Test that rendering the same post twice gives byte-identical output
#[tokio::test]
async fn test_render_document_renderedTwice_shouldBeIdentical() {
    let post = long_post(40);

    let first = render_document(&post, DEFAULT_CONCURRENCY).await.unwrap();
    let second = render_document(&post, DEFAULT_CONCURRENCY).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_markdown(), second.to_markdown());
}

/// Test that paragraphs keep their document order
#[tokio::test]
async fn test_render_document_withManyParagraphs_shouldKeepOrder() {
    let body = (0..50).map(|i| Paragraph::text(&format!("line {}", i))).collect();
    let post = build_post("Ordered", "In sequence", body, vec![]);

    let document = render_document(&post, 16).await.unwrap();

    let texts: Vec<String> = document.blocks.iter().map(|block| block.text.clone()).collect();
    let expected: Vec<String> = (0..50).map(|i| format!("line {}", i)).collect();
    assert_eq!(texts, expected);
}

/// Test that list items of one list are kept on consecutive lines
#[tokio::test]
async fn test_render_document_withListRuns_shouldJoinItemsTightly() {
    let body = vec![
        oli("a"),
        oli("b"),
        Paragraph::new(ParagraphKind::UnorderedListItem, "c"),
        Paragraph::new(ParagraphKind::UnorderedListItem, "d"),
        Paragraph::text("e"),
    ];
    let post = build_post("T", "S", body, vec![]);

    let markdown = render_document(&post, DEFAULT_CONCURRENCY).await.unwrap().to_markdown();

    assert_eq!(markdown, "# T\n\nS\n\n1. a\n2. b\n\n- c\n- d\n\ne\n");
}

/// Test that a section marker lands before the paragraph it starts
#[tokio::test]
async fn test_render_document_withSectionBreak_shouldEmitRuleBeforeParagraph() {
    let body = vec![Paragraph::text("x"), Paragraph::text("y"), Paragraph::text("z")];
    let post = build_post("T", "S", body, vec![Section::new(0), Section::new(4)]);

    let markdown = render_document(&post, DEFAULT_CONCURRENCY).await.unwrap().to_markdown();

    assert_eq!(markdown, "# T\n\nS\n\nx\n\ny\n\n---\n\nz\n");
}

/// Test that a body paragraph repeating the title is dropped
#[tokio::test]
async fn test_render_document_withBodyRepeatingTitle_shouldSuppressIt() {
    let body = vec![
        Paragraph::new(ParagraphKind::Heading(1), "Same Title"),
        Paragraph::text("Same subtitle"),
        Paragraph::text("actual content"),
    ];
    let post = build_post("Same Title", "Same subtitle", body, vec![]);

    let markdown = render_document(&post, DEFAULT_CONCURRENCY).await.unwrap().to_markdown();

    assert_eq!(markdown, "# Same Title\n\nSame subtitle\n\nactual content\n");
}

/// Test that a single line of a multi-line title also counts as a repeat
#[tokio::test]
async fn test_render_document_withBodyRepeatingTitleLine_shouldSuppressIt() {
    let body = vec![
        Paragraph::new(ParagraphKind::Heading(1), "Second"),
        Paragraph::text("kept"),
    ];
    let post = build_post("First\nSecond", "Sub", body, vec![]);

    let markdown = render_document(&post, DEFAULT_CONCURRENCY).await.unwrap().to_markdown();

    assert_eq!(markdown, "# First\n# Second\n\nSub\n\nkept\n");
}

/// Test that a post without paragraphs still yields its title
#[tokio::test]
async fn test_render_document_withoutParagraphs_shouldRenderTitleOnly() {
    let post = Post {
        title: "Lonely".to_string(),
        ..Post::default()
    };

    let document = render_document(&post, DEFAULT_CONCURRENCY).await.unwrap();

    assert!(document.blocks.is_empty());
    assert_eq!(document.subtitle, None);
    assert_eq!(document.to_markdown(), "# Lonely\n");
}

/// Test that an empty subtitle leaves no stray blank block
#[tokio::test]
async fn test_render_document_withEmptySubtitle_shouldSkipIt() {
    let post = build_post("T", "", vec![Paragraph::text("body")], vec![]);

    let markdown = render_document(&post, DEFAULT_CONCURRENCY).await.unwrap().to_markdown();

    assert_eq!(markdown, "# T\n\nbody\n");
}

/// Test that zero concurrency is treated as sequential rendering
#[tokio::test]
async fn test_render_document_withZeroConcurrency_shouldStillRender() {
    let post = build_post("T", "S", vec![Paragraph::text("body")], vec![]);

    let markdown = render_document(&post, 0).await.unwrap().to_markdown();

    assert_eq!(markdown, "# T\n\nS\n\nbody\n");
}

/// Test that a post without a title starts with its subtitle
#[tokio::test]
async fn test_render_document_withBlankTitle_shouldOmitHeading() {
    let post = build_post("", "S", vec![Paragraph::text("body")], vec![]);

    let markdown = render_document(&post, DEFAULT_CONCURRENCY).await.unwrap().to_markdown();

    assert_eq!(markdown, "S\n\nbody\n");
}
