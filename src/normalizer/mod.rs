use crate::client::{RawBlock, RawDocument, RawSearchResponse, RawSection, RawSpan};
use crate::domain::richtext::{Block, BlockKind, Span, SpanKind};
use crate::domain::{ArticleDetail, ArticleListPage, ArticleSummary, NeighborLink, Section};

/// Converts raw repository documents into domain types.
///
/// Section and fragment order is carried through untouched. Missing fields
/// degrade to empty strings or `None`; unknown fragment kinds keep their
/// text as paragraphs rather than being dropped.
#[derive(Debug, Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Convert a search response into a listing page. The cursor is carried
    /// through verbatim.
    pub fn summaries(&self, response: &RawSearchResponse) -> ArticleListPage {
        ArticleListPage {
            next_page: response.next_page.clone(),
            results: response.results.iter().map(|doc| self.summary(doc)).collect(),
        }
    }

    pub fn summary(&self, doc: &RawDocument) -> ArticleSummary {
        ArticleSummary {
            uid: doc.uid.clone().unwrap_or_default(),
            first_publication_date: doc.first_publication_date,
            title: doc.data.title.clone(),
            subtitle: doc.data.subtitle.clone(),
            author: doc.data.author.clone(),
        }
    }

    pub fn detail(&self, doc: &RawDocument) -> ArticleDetail {
        ArticleDetail {
            id: doc.id.clone(),
            uid: doc.uid.clone().unwrap_or_default(),
            first_publication_date: doc.first_publication_date,
            last_publication_date: doc.last_publication_date,
            title: doc.data.title.clone(),
            subtitle: doc.data.subtitle.clone(),
            author: doc.data.author.clone(),
            banner_url: doc.data.banner.url.clone(),
            content: doc.data.content.iter().map(|s| self.section(s)).collect(),
        }
    }

    pub fn neighbor(&self, doc: Option<&RawDocument>) -> NeighborLink {
        match doc {
            Some(doc) => NeighborLink {
                uid: doc.uid.clone(),
                title: Some(doc.data.title.clone()),
            },
            None => NeighborLink::none(),
        }
    }

    fn section(&self, raw: &RawSection) -> Section {
        Section {
            heading: raw.heading.clone().filter(|h| !h.is_empty()),
            body: raw.body.iter().map(|b| self.block(b)).collect(),
        }
    }

    fn block(&self, raw: &RawBlock) -> Block {
        let kind = match raw.kind.as_str() {
            "paragraph" => BlockKind::Paragraph,
            "heading1" => BlockKind::Heading(1),
            "heading2" => BlockKind::Heading(2),
            "heading3" => BlockKind::Heading(3),
            "heading4" => BlockKind::Heading(4),
            "heading5" => BlockKind::Heading(5),
            "heading6" => BlockKind::Heading(6),
            "list-item" => BlockKind::ListItem,
            "o-list-item" => BlockKind::OrderedListItem,
            "preformatted" => BlockKind::Preformatted,
            "image" => BlockKind::Image,
            _ => BlockKind::Paragraph,
        };

        Block {
            kind,
            text: raw.text.clone(),
            spans: raw.spans.iter().filter_map(|s| self.span(s)).collect(),
            url: raw.url.clone(),
            alt: raw.alt.clone(),
        }
    }

    fn span(&self, raw: &RawSpan) -> Option<Span> {
        let kind = match raw.kind.as_str() {
            "strong" => SpanKind::Strong,
            "em" => SpanKind::Em,
            "hyperlink" => SpanKind::Hyperlink(
                raw.data
                    .as_ref()
                    .and_then(|d| d.url.clone())
                    .unwrap_or_default(),
            ),
            _ => return None,
        };

        Some(Span {
            start: raw.start,
            end: raw.end,
            kind,
        })
    }
}
