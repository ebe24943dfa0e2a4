//! Presentation helpers shared by the static site generator and the CLI.
//!
//! Rich-text fragments are rendered to HTML here. All text and attribute
//! content coming from the repository is escaped; the content source is
//! not trusted to inject raw markup.

pub mod pages;

use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::domain::richtext::{Block, BlockKind, Span, SpanKind};

pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
    date.map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_default()
}

/// The "edited" footnote shown under the publication date.
pub fn format_edited(date: &DateTime<Utc>) -> String {
    format!(
        "* edited on {} at {}",
        date.format("%d %b %Y"),
        date.format("%H:%M")
    )
}

/// Render a rich-text body to HTML. Fragments stay in source order;
/// consecutive list items are grouped into a single list element.
pub fn body_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    let mut open_list: Option<BlockKind> = None;

    for block in blocks {
        match block.kind {
            BlockKind::ListItem | BlockKind::OrderedListItem => {
                if open_list != Some(block.kind) {
                    close_list(&mut out, &mut open_list);
                    out.push_str(if block.kind == BlockKind::ListItem {
                        "<ul>"
                    } else {
                        "<ol>"
                    });
                    open_list = Some(block.kind);
                }
                out.push_str("<li>");
                out.push_str(&apply_spans(&block.text, &block.spans));
                out.push_str("</li>");
            }
            _ => {
                close_list(&mut out, &mut open_list);
                out.push_str(&block_html(block));
            }
        }
    }

    close_list(&mut out, &mut open_list);
    out
}

fn close_list(out: &mut String, open_list: &mut Option<BlockKind>) {
    match open_list.take() {
        Some(BlockKind::ListItem) => out.push_str("</ul>"),
        Some(BlockKind::OrderedListItem) => out.push_str("</ol>"),
        _ => {}
    }
}

fn block_html(block: &Block) -> String {
    match block.kind {
        BlockKind::Paragraph => format!("<p>{}</p>", apply_spans(&block.text, &block.spans)),
        BlockKind::Heading(level) => {
            let level = level.clamp(1, 6);
            format!(
                "<h{level}>{}</h{level}>",
                apply_spans(&block.text, &block.spans)
            )
        }
        BlockKind::Preformatted => format!("<pre>{}</pre>", encode_text(&block.text)),
        BlockKind::Image => {
            let src = block.url.as_deref().unwrap_or_default();
            let alt = block.alt.as_deref().unwrap_or_default();
            format!(
                "<img src=\"{}\" alt=\"{}\" />",
                encode_double_quoted_attribute(src),
                encode_double_quoted_attribute(alt)
            )
        }
        // List items are grouped in body_html; a stray one renders alone.
        BlockKind::ListItem | BlockKind::OrderedListItem => {
            format!("<li>{}</li>", apply_spans(&block.text, &block.spans))
        }
    }
}

/// Apply inline style ranges to a block's text, escaping everything.
///
/// Ranges are character offsets. They are applied in order of start
/// position; a range overlapping an earlier one, or an empty range, is
/// skipped.
fn apply_spans(text: &str, spans: &[Span]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut spans: Vec<&Span> = spans.iter().collect();
    spans.sort_by_key(|s| (s.start, s.end));

    let mut out = String::new();
    let mut cursor = 0usize;

    for span in spans {
        let start = span.start.min(chars.len());
        let end = span.end.min(chars.len());
        if start < cursor || end <= start {
            continue;
        }

        push_escaped(&mut out, &chars[cursor..start]);
        let inner: String = chars[start..end].iter().collect();
        let inner = encode_text(&inner);
        match &span.kind {
            SpanKind::Strong => {
                out.push_str("<strong>");
                out.push_str(&inner);
                out.push_str("</strong>");
            }
            SpanKind::Em => {
                out.push_str("<em>");
                out.push_str(&inner);
                out.push_str("</em>");
            }
            SpanKind::Hyperlink(url) => {
                out.push_str("<a href=\"");
                out.push_str(&encode_double_quoted_attribute(url));
                out.push_str("\">");
                out.push_str(&inner);
                out.push_str("</a>");
            }
        }
        cursor = end;
    }

    push_escaped(&mut out, &chars[cursor..]);
    out
}

fn push_escaped(out: &mut String, chars: &[char]) {
    let text: String = chars.iter().collect();
    out.push_str(&encode_text(&text));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize, kind: SpanKind) -> Span {
        Span { start, end, kind }
    }

    #[test]
    fn test_paragraph_with_strong_span() {
        let mut block = Block::paragraph("Strong opening words.");
        block.spans = vec![span(0, 6, SpanKind::Strong)];

        assert_eq!(
            body_html(&[block]),
            "<p><strong>Strong</strong> opening words.</p>"
        );
    }

    #[test]
    fn test_hyperlink_span() {
        let mut block = Block::paragraph("Read the docs.");
        block.spans = vec![span(9, 13, SpanKind::Hyperlink("https://example.io/docs".into()))];

        assert_eq!(
            body_html(&[block]),
            "<p>Read the <a href=\"https://example.io/docs\">docs</a>.</p>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let block = Block::paragraph("<script>alert(1)</script> & more");
        let html = body_html(&[block]);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp; more"));
    }

    #[test]
    fn test_consecutive_list_items_group() {
        let mut first = Block::paragraph("first");
        first.kind = BlockKind::ListItem;
        let mut second = Block::paragraph("second");
        second.kind = BlockKind::ListItem;
        let tail = Block::paragraph("after");

        assert_eq!(
            body_html(&[first, second, tail]),
            "<ul><li>first</li><li>second</li></ul><p>after</p>"
        );
    }

    #[test]
    fn test_ordered_and_unordered_lists_do_not_merge() {
        let mut bullet = Block::paragraph("bullet");
        bullet.kind = BlockKind::ListItem;
        let mut numbered = Block::paragraph("numbered");
        numbered.kind = BlockKind::OrderedListItem;

        assert_eq!(
            body_html(&[bullet, numbered]),
            "<ul><li>bullet</li></ul><ol><li>numbered</li></ol>"
        );
    }

    #[test]
    fn test_heading_levels_clamped() {
        let mut heading = Block::paragraph("Title");
        heading.kind = BlockKind::Heading(2);
        assert_eq!(body_html(&[heading.clone()]), "<h2>Title</h2>");

        heading.kind = BlockKind::Heading(9);
        assert_eq!(body_html(&[heading]), "<h6>Title</h6>");
    }

    #[test]
    fn test_image_block() {
        let block = Block {
            kind: BlockKind::Image,
            text: String::new(),
            spans: Vec::new(),
            url: Some("https://images.example.io/fig.png".into()),
            alt: Some("a \"figure\"".into()),
        };

        let html = body_html(&[block]);
        assert!(html.starts_with("<img src=\"https://images.example.io/fig.png\""));
        assert!(!html.contains("a \"figure\""));
    }

    #[test]
    fn test_overlapping_span_is_skipped() {
        let mut block = Block::paragraph("abcdef");
        block.spans = vec![
            span(0, 4, SpanKind::Strong),
            span(2, 6, SpanKind::Em),
        ];

        assert_eq!(body_html(&[block]), "<p><strong>abcd</strong>ef</p>");
    }

    #[test]
    fn test_span_past_end_of_text_is_clamped() {
        let mut block = Block::paragraph("abc");
        block.spans = vec![span(1, 50, SpanKind::Em)];

        assert_eq!(body_html(&[block]), "<p>a<em>bc</em></p>");
    }

    #[test]
    fn test_format_date() {
        let date: DateTime<Utc> = "2024-03-05T10:30:00Z".parse().unwrap();
        assert_eq!(format_date(Some(&date)), "05 Mar 2024");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn test_format_edited() {
        let date: DateTime<Utc> = "2024-03-05T10:30:00Z".parse().unwrap();
        assert_eq!(format_edited(&date), "* edited on 05 Mar 2024 at 10:30");
    }
}
