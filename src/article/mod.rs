//! Article-page data flow: fetch one document by uid, estimate its reading
//! time, and look up the chronologically adjacent articles.

use crate::app::Result;
use crate::client::{ContentSource, Ordering, Query};
use crate::domain::richtext;
use crate::domain::{ArticleDetail, NeighborLink, Section};
use crate::normalizer::Normalizer;

pub const WORDS_PER_MINUTE: u32 = 200;

const PUBLICATION_DATE: &str = "document.first_publication_date";

/// Everything the article page needs in one place.
#[derive(Debug, Clone)]
pub struct AssembledArticle {
    pub detail: ArticleDetail,
    /// Estimated reading time in whole minutes.
    pub reading_time: u32,
    pub previous: NeighborLink,
    pub next: NeighborLink,
}

/// Estimated reading time: per section, the body is flattened to plain
/// text, whitespace-separated tokens are counted and divided by
/// [`WORDS_PER_MINUTE`], rounded up; section estimates are summed. A
/// section with no tokens contributes zero.
pub fn reading_time(sections: &[Section]) -> u32 {
    sections
        .iter()
        .map(|section| {
            let words = richtext::as_text(&section.body).split_whitespace().count() as u32;
            words.div_ceil(WORDS_PER_MINUTE)
        })
        .sum()
}

/// Look up the chronological neighbors of `detail`.
///
/// Both queries start after the document's internal sequence position, one
/// per direction, limited to a single result each. That trusts the source's
/// internal ordering rather than comparing publication dates directly; the
/// two lookups are independent and run concurrently.
pub async fn neighbors(
    source: &dyn ContentSource,
    normalizer: &Normalizer,
    detail: &ArticleDetail,
    doc_type: &str,
    preview_ref: Option<&str>,
) -> Result<(NeighborLink, NeighborLink)> {
    let previous_query = Query::documents_of_type(doc_type)
        .page_size(1)
        .after(&detail.id)
        .order_by(Ordering::desc(PUBLICATION_DATE))
        .content_ref(preview_ref.map(String::from));

    let next_query = Query::documents_of_type(doc_type)
        .page_size(1)
        .after(&detail.id)
        .order_by(Ordering::asc(PUBLICATION_DATE))
        .content_ref(preview_ref.map(String::from));

    let (previous_response, next_response) =
        tokio::try_join!(source.search(&previous_query), source.search(&next_query))?;

    Ok((
        normalizer.neighbor(previous_response.results.first()),
        normalizer.neighbor(next_response.results.first()),
    ))
}

/// Fetch an article by uid and assemble its full page state.
pub async fn assemble(
    source: &dyn ContentSource,
    normalizer: &Normalizer,
    doc_type: &str,
    uid: &str,
    preview_ref: Option<&str>,
) -> Result<AssembledArticle> {
    let raw = source.get_by_uid(doc_type, uid, preview_ref).await?;
    let detail = normalizer.detail(&raw);

    let (previous, next) = neighbors(source, normalizer, &detail, doc_type, preview_ref).await?;
    let reading_time = reading_time(&detail.content);

    Ok(AssembledArticle {
        detail,
        reading_time,
        previous,
        next,
    })
}
