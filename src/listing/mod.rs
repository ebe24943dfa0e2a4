//! Listing-page data flow: one build-time query for the first page of
//! summaries, then user-triggered fetches of the `next_page` cursor that
//! append to the in-memory list.

use crate::app::Result;
use crate::client::{ContentSource, Query};
use crate::domain::{ArticleListPage, ArticleSummary};
use crate::normalizer::Normalizer;

/// Fields requested for listing entries; everything else stays on the
/// server.
const SUMMARY_FIELDS: [&str; 3] = ["title", "subtitle", "author"];

/// Issue the initial listing query: all documents of the article type,
/// summary fields only, source-default ordering.
pub async fn initial_page(
    source: &dyn ContentSource,
    normalizer: &Normalizer,
    doc_type: &str,
    page_size: usize,
    preview_ref: Option<&str>,
) -> Result<ArticleListPage> {
    let query = Query::documents_of_type(doc_type)
        .fetch(&SUMMARY_FIELDS)
        .page_size(page_size)
        .content_ref(preview_ref.map(String::from));

    let response = source.search(&query).await?;
    Ok(normalizer.summaries(&response))
}

/// In-memory view state of the listing page.
///
/// Appends are strictly ordered: prior entries stay a prefix of the list,
/// nothing is re-sorted or deduplicated, and at most one incremental fetch
/// is in flight at a time.
#[derive(Debug, Default)]
pub struct Listing {
    articles: Vec<ArticleSummary>,
    next_page: Option<String>,
    in_flight: bool,
}

impl Listing {
    pub fn from_page(page: ArticleListPage) -> Self {
        Self {
            articles: page.results,
            next_page: page.next_page,
            in_flight: false,
        }
    }

    pub fn articles(&self) -> &[ArticleSummary] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    /// True while an incremental fetch is outstanding; the UI shows a
    /// loading indication for as long as this holds.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Whether the "load more" affordance may be offered: there is a cursor
    /// and no request is already in flight.
    pub fn can_load_more(&self) -> bool {
        self.next_page.is_some() && !self.in_flight
    }

    /// Claim the cursor for a fetch. Returns `None` (and nothing must be
    /// fetched) when the cursor is exhausted or a fetch is already in
    /// flight.
    pub fn begin_load(&mut self) -> Option<String> {
        if !self.can_load_more() {
            return None;
        }
        self.in_flight = true;
        self.next_page.clone()
    }

    /// Merge a fetched page and release the in-flight claim.
    pub fn complete_load(&mut self, page: ArticleListPage) -> usize {
        let added = page.results.len();
        self.merge(page);
        self.in_flight = false;
        added
    }

    /// Release the in-flight claim after a failed fetch; the cursor is kept
    /// so the action can be offered again.
    pub fn abort_load(&mut self) {
        self.in_flight = false;
    }

    /// Append a page: new results go after the existing ones, in source
    /// order, and the cursor is replaced by the new page's cursor.
    pub fn merge(&mut self, page: ArticleListPage) {
        self.articles.extend(page.results);
        self.next_page = page.next_page;
    }

    /// Fetch the current cursor and append the results. Returns the number
    /// of summaries added; zero without touching the network when no fetch
    /// may run. Errors propagate after releasing the in-flight claim; there
    /// is no retry.
    pub async fn load_more(
        &mut self,
        source: &dyn ContentSource,
        normalizer: &Normalizer,
    ) -> Result<usize> {
        let Some(cursor) = self.begin_load() else {
            return Ok(0);
        };

        match source.fetch_page(&cursor).await {
            Ok(response) => {
                let page = normalizer.summaries(&response);
                Ok(self.complete_load(page))
            }
            Err(e) => {
                self.abort_load();
                Err(e)
            }
        }
    }
}
