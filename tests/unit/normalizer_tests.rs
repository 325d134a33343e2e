/*!
 * Tests for content-model normalization
 */

use mediumexporter::content_model::{ImageMetadata, Paragraph, ParagraphKind, Section};
use mediumexporter::markdown::{normalize, subtitle, title_lines};
use crate::common::oli;

/// Test that paragraphs 0 and 1 never become render tasks
#[test]
fn test_normalize_withParagraphs_shouldSkipTitleAndSubtitle() {
    let paragraphs = vec![
        Paragraph::text("title"),
        Paragraph::text("subtitle"),
        Paragraph::text("first body"),
        Paragraph::new(ParagraphKind::from("embed"), "second body"),
    ];

    let body = normalize(&[], &paragraphs);

    let indices: Vec<usize> = body.tasks.iter().map(|task| task.index).collect();
    assert_eq!(indices, vec![2, 3]);
    assert_eq!(body.tasks[0].paragraph.text, "first body");
}

/// Test that short paragraph lists produce no tasks
#[test]
fn test_normalize_withFewerThanThreeParagraphs_shouldHaveNoTasks() {
    assert!(normalize(&[], &[]).tasks.is_empty());
    assert!(normalize(&[], &[Paragraph::text("only")]).tasks.is_empty());
    assert!(normalize(&[], &[Paragraph::text("a"), Paragraph::text("b")]).tasks.is_empty());
}

/// Test that ordered-list ordinals restart after a run break
#[test]
fn test_normalize_withInterruptedOrderedList_shouldRestartOrdinals() {
    let paragraphs = vec![
        Paragraph::text("title"),
        Paragraph::text("subtitle"),
        oli("a"),
        oli("b"),
        oli("c"),
        Paragraph::text("plain"),
        oli("d"),
        oli("e"),
    ];

    let body = normalize(&[], &paragraphs);

    let ordinals: Vec<usize> = body.tasks.iter().map(|task| task.ordinal).collect();
    assert_eq!(ordinals, vec![1, 2, 3, 0, 1, 2]);
}

/// Test that an unordered item also breaks an ordered run
#[test]
fn test_normalize_withMixedListKinds_shouldRestartOrdinals() {
    let paragraphs = vec![
        Paragraph::text("title"),
        Paragraph::text("subtitle"),
        oli("a"),
        Paragraph::new(ParagraphKind::UnorderedListItem, "bullet"),
        oli("b"),
    ];

    let ordinals: Vec<usize> = normalize(&[], &paragraphs).tasks.iter().map(|t| t.ordinal).collect();
    assert_eq!(ordinals, vec![1, 0, 1]);
}

/// Test that a visible section break restarts list numbering
#[test]
fn test_normalize_withDividerInsideList_shouldRestartOrdinals() {
    let paragraphs = vec![
        Paragraph::text("title"),
        Paragraph::text("subtitle"),
        oli("a"),
        oli("b"),
        oli("c"),
    ];

    let body = normalize(&[Section::new(0), Section::new(4)], &paragraphs);

    let ordinals: Vec<usize> = body.tasks.iter().map(|task| task.ordinal).collect();
    assert_eq!(ordinals, vec![1, 2, 1]);
}

/// Test that the later of two sections sharing a start index wins
#[test]
fn test_normalize_withSectionCollision_shouldKeepLastMarker() {
    let sections = vec![
        Section::new(4),
        Section::new(4).with_background_image(ImageMetadata::new("1*late.png", 1000)),
    ];

    let body = normalize(&sections, &[]);

    assert_eq!(body.markers.len(), 1);
    assert_eq!(
        body.marker_at(4),
        Some("![](https://cdn-images-1.medium.com/max/2000/1*late.png)")
    );
}

/// Test that sections are keyed by their start index, not their position
#[test]
fn test_normalize_withSparseSections_shouldKeyByStartIndex() {
    let sections = vec![Section::new(0), Section::new(9), Section::new(3)];

    let body = normalize(&sections, &[]);

    let keys: Vec<usize> = body.markers.keys().copied().collect();
    assert_eq!(keys, vec![0, 3, 9]);
    assert_eq!(body.marker_at(9), Some("---"));
    assert_eq!(body.marker_at(5), None);
}

/// Test that each title line becomes its own heading
#[test]
fn test_title_lines_withEmbeddedNewline_shouldEmitTwoHeadings() {
    assert_eq!(title_lines("Part One\nPart Two"), "# Part One\n# Part Two");
    assert_eq!(title_lines("Single"), "# Single");
}

/// Test subtitle extraction
#[test]
fn test_subtitle_withHeadingMarkup_shouldStripHashes() {
    let paragraphs = vec![Paragraph::text("title"), Paragraph::text("## The subtitle")];
    assert_eq!(subtitle(&paragraphs).as_deref(), Some("The subtitle"));
}

/// Test that no subtitle exists without a second paragraph
#[test]
fn test_subtitle_withSingleParagraph_shouldBeNone() {
    assert_eq!(subtitle(&[Paragraph::text("title")]), None);
    assert_eq!(subtitle(&[]), None);
}

/// Test that sections with a negative start index are skipped
#[test]
fn test_normalize_withNegativeSectionIndex_shouldSkipSection() {
    let sections = vec![Section::new(-1), Section::new(3)];

    let body = normalize(&sections, &[]);

    let keys: Vec<usize> = body.markers.keys().copied().collect();
    assert_eq!(keys, vec![3]);
}

/// Test that a blank title produces no heading
#[test]
fn test_title_lines_withBlankTitle_shouldBeEmpty() {
    assert_eq!(title_lines(""), "");
    assert_eq!(title_lines("  \n "), "");
}
