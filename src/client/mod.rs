pub mod http;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::app::Result;

pub use http::HttpContentSource;

/// Sort direction for an ordering expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// An ordering expression understood by the content repository,
/// e.g. `[document.first_publication_date desc]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub field: String,
    pub direction: Direction,
}

impl Ordering {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: Direction::Desc,
        }
    }

    /// Serialized form sent on the wire. Ascending is the repository
    /// default and carries no suffix.
    pub fn to_expression(&self) -> String {
        match self.direction {
            Direction::Asc => format!("[{}]", self.field),
            Direction::Desc => format!("[{} desc]", self.field),
        }
    }
}

/// A predicate query against the content repository.
///
/// Covers the slice of the source's query language this crate uses: filter
/// by document type, optional field selection, page size, one ordering
/// expression, and an `after` document id for relative queries.
#[derive(Debug, Clone)]
pub struct Query {
    pub doc_type: String,
    pub fetch: Vec<String>,
    pub page_size: usize,
    pub ordering: Option<Ordering>,
    pub after: Option<String>,
    pub content_ref: Option<String>,
}

impl Query {
    pub fn documents_of_type(doc_type: &str) -> Self {
        Self {
            doc_type: doc_type.to_string(),
            fetch: Vec::new(),
            page_size: 20,
            ordering: None,
            after: None,
            content_ref: None,
        }
    }

    /// Restrict the fields returned in each document's `data` bag.
    pub fn fetch(mut self, fields: &[&str]) -> Self {
        self.fetch = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn order_by(mut self, ordering: Ordering) -> Self {
        self.ordering = Some(ordering);
        self
    }

    /// Start results after the document with this internal id.
    pub fn after(mut self, id: &str) -> Self {
        self.after = Some(id.to_string());
        self
    }

    /// Pin the query to a content ref (preview mode). `None` resolves to
    /// the published ref.
    pub fn content_ref(mut self, content_ref: Option<String>) -> Self {
        self.content_ref = content_ref;
        self
    }
}

/// One page of results as returned by the repository's search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    /// Fully-formed URL of the next page, or null on the last page.
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub results: Vec<RawDocument>,
}

/// A document exactly as the repository returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDocument {
    /// Internal document id, used by relative (`after`) queries.
    pub id: String,
    /// Human-facing identifier, used as the URL segment.
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub first_publication_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_publication_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: RawPostData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPostData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub banner: RawBanner,
    #[serde(default)]
    pub content: Vec<RawSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBanner {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSection {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub body: Vec<RawBlock>,
}

/// A rich-text fragment: a typed span of text with inline style ranges.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<RawSpan>,
    /// Only present on embedded media blocks.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSpan {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<RawSpanData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSpanData {
    #[serde(default)]
    pub url: Option<String>,
}

/// The seam between this crate and the content repository.
///
/// `fetch_page` takes the cursor URL exactly as the source returned it;
/// cursors are never reconstructed locally.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn search(&self, query: &Query) -> Result<RawSearchResponse>;

    async fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
        content_ref: Option<&str>,
    ) -> Result<RawDocument>;

    async fn fetch_page(&self, url: &str) -> Result<RawSearchResponse>;
}

#[cfg(test)]
pub mod mock;
