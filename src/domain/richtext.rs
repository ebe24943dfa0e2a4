use serde::{Deserialize, Serialize};

/// The shape of a rich-text fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Paragraph,
    /// Heading level 1-6.
    Heading(u8),
    ListItem,
    OrderedListItem,
    Preformatted,
    /// Embedded media; carries no text, the reference lives in `Block::url`.
    Image,
}

/// An inline style applied to a character range of a block's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanKind {
    Strong,
    Em,
    Hyperlink(String),
}

/// Character range `[start, end)` into the owning block's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
}

/// One rich-text fragment: a typed span of text plus its inline styles.
///
/// Fragments keep the order the source returned them in; nothing upstream
/// of rendering reorders or deduplicates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
    pub spans: Vec<Span>,
    pub url: Option<String>,
    pub alt: Option<String>,
}

impl Block {
    pub fn paragraph(text: &str) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            text: text.to_string(),
            spans: Vec::new(),
            url: None,
            alt: None,
        }
    }
}

/// Flatten fragments to plain text, fragments joined by a single space.
pub fn as_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|b| b.text.as_str())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_text_joins_blocks() {
        let blocks = vec![Block::paragraph("Hello world."), Block::paragraph("Bye.")];
        assert_eq!(as_text(&blocks), "Hello world. Bye.");
    }

    #[test]
    fn test_as_text_skips_empty_blocks() {
        let blocks = vec![
            Block::paragraph("One"),
            Block::paragraph(""),
            Block::paragraph("Two"),
        ];
        assert_eq!(as_text(&blocks), "One Two");
    }

    #[test]
    fn test_as_text_empty_body() {
        assert_eq!(as_text(&[]), "");
    }
}
