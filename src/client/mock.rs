//! In-memory [`ContentSource`] used by unit tests.
//!
//! Emulates the slice of repository behavior this crate depends on:
//! page-size windows with a `next_page` cursor, `after`-relative queries
//! against the internal document order, and uid lookup. Every call is
//! logged so tests can assert which queries were issued and with which
//! content ref.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::app::{Result, SpacewalkError};
use crate::client::{
    ContentSource, Direction, Query, RawBlock, RawDocument, RawPostData, RawSearchResponse,
    RawSection,
};

pub struct MockSource {
    corpus: Vec<RawDocument>,
    pub searches: Mutex<Vec<Query>>,
    pub fetched_cursors: Mutex<Vec<String>>,
    pub uid_requests: Mutex<Vec<(String, Option<String>)>>,
}

/// Cursor that always fails to fetch, for error-path tests.
pub const FAILING_CURSOR: &str = "mock://fail";

impl MockSource {
    pub fn new(corpus: Vec<RawDocument>) -> Self {
        Self {
            corpus,
            searches: Mutex::new(Vec::new()),
            fetched_cursors: Mutex::new(Vec::new()),
            uid_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn search_count(&self) -> usize {
        self.searches.lock().unwrap().len()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched_cursors.lock().unwrap().len()
    }

    /// Refs carried by every logged call, in issue order.
    pub fn logged_refs(&self) -> Vec<Option<String>> {
        let mut refs: Vec<Option<String>> = self
            .searches
            .lock()
            .unwrap()
            .iter()
            .map(|q| q.content_ref.clone())
            .collect();
        refs.extend(self.uid_requests.lock().unwrap().iter().map(|(_, r)| r.clone()));
        refs
    }

    fn ordered(&self, ordering: Option<&crate::client::Ordering>) -> Vec<RawDocument> {
        let mut docs = self.corpus.clone();
        if let Some(ordering) = ordering {
            docs.sort_by_key(|d| d.first_publication_date);
            if ordering.direction == Direction::Desc {
                docs.reverse();
            }
        }
        docs
    }

    fn slice(docs: Vec<RawDocument>, offset: usize, page_size: usize) -> RawSearchResponse {
        let total = docs.len();
        let results: Vec<RawDocument> = docs.into_iter().skip(offset).take(page_size).collect();
        let consumed = offset + results.len();
        let next_page = if consumed < total {
            Some(format!("mock://page/{}/{}", consumed, page_size))
        } else {
            None
        };

        RawSearchResponse {
            page: (offset / page_size.max(1)) as u32 + 1,
            total_pages: total.div_ceil(page_size.max(1)) as u32,
            next_page,
            results,
        }
    }
}

#[async_trait]
impl ContentSource for MockSource {
    async fn search(&self, query: &Query) -> Result<RawSearchResponse> {
        self.searches.lock().unwrap().push(query.clone());

        let mut docs = self.ordered(query.ordering.as_ref());
        if let Some(after) = &query.after {
            match docs.iter().position(|d| &d.id == after) {
                Some(pos) => docs = docs.split_off(pos + 1),
                None => docs.clear(),
            }
        }

        Ok(Self::slice(docs, 0, query.page_size))
    }

    async fn get_by_uid(
        &self,
        _doc_type: &str,
        uid: &str,
        content_ref: Option<&str>,
    ) -> Result<RawDocument> {
        self.uid_requests
            .lock()
            .unwrap()
            .push((uid.to_string(), content_ref.map(String::from)));

        self.corpus
            .iter()
            .find(|d| d.uid.as_deref() == Some(uid))
            .cloned()
            .ok_or_else(|| SpacewalkError::DocumentNotFound(uid.to_string()))
    }

    async fn fetch_page(&self, url: &str) -> Result<RawSearchResponse> {
        self.fetched_cursors.lock().unwrap().push(url.to_string());

        if url == FAILING_CURSOR {
            return Err(SpacewalkError::Api("mock fetch failure".into()));
        }

        let rest = url
            .strip_prefix("mock://page/")
            .ok_or_else(|| SpacewalkError::Api(format!("unknown mock cursor: {url}")))?;
        let (offset, page_size) = rest
            .split_once('/')
            .and_then(|(o, s)| Some((o.parse::<usize>().ok()?, s.parse::<usize>().ok()?)))
            .ok_or_else(|| SpacewalkError::Api(format!("malformed mock cursor: {url}")))?;

        Ok(Self::slice(self.corpus.clone(), offset, page_size))
    }
}

/// Minimal document for listing tests; content body left empty.
pub fn doc(id: &str, uid: &str, date: &str, title: &str) -> RawDocument {
    RawDocument {
        id: id.to_string(),
        uid: Some(uid.to_string()),
        first_publication_date: Some(date.parse().unwrap()),
        last_publication_date: None,
        data: RawPostData {
            title: title.to_string(),
            subtitle: format!("{title} (subtitle)"),
            author: "Ada Lovelace".to_string(),
            ..Default::default()
        },
    }
}

/// A content section of plain paragraphs, for reading-time and render tests.
pub fn section(heading: Option<&str>, paragraphs: &[&str]) -> RawSection {
    RawSection {
        heading: heading.map(String::from),
        body: paragraphs
            .iter()
            .map(|text| RawBlock {
                kind: "paragraph".to_string(),
                text: text.to_string(),
                ..Default::default()
            })
            .collect(),
    }
}
